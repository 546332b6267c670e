//! Small helpers shared by the opcode handler families.

use bytes::Bytes;
use ethereum_types::Address;

use crate::delta::Fault;
use crate::error::EvmError;
use crate::word::Word;

/// Offsets and sizes arrive on the stack as full 256-bit Words, but nothing
/// in this interpreter ever has anywhere near `u64::MAX` bytes of memory.
/// A Word that doesn't fit in a `u64` would demand more gas than any frame
/// could hold, so it is treated the same as running out of gas rather than
/// attempted as a real byte offset.
pub fn word_to_u64(w: Word) -> Result<u64, Fault> {
    if w.bits() > 64 {
        Err(Fault::from(EvmError::OutOfGas))
    } else {
        Ok(w.as_u64())
    }
}

/// Read `size` bytes starting at `offset` from `src`, zero-padding past the
/// end — the same "copy as much as exists, zero-fill the rest" rule
/// CALLDATACOPY/CODECOPY/RETURNDATACOPY/EXTCODECOPY all share.
pub fn copy_padded(src: &[u8], offset: u64, size: u64) -> Bytes {
    let offset = offset as usize;
    let size = size as usize;
    let mut out = vec![0u8; size];
    if offset < src.len() {
        let available = (src.len() - offset).min(size);
        out[..available].copy_from_slice(&src[offset..offset + available]);
    }
    Bytes::from(out)
}

/// `0` maps to `false`, everything else to `true` — the EVM's boolean
/// convention for conditions like JUMPI's second operand.
pub fn is_truthy(w: Word) -> bool {
    !w.is_zero()
}

pub fn bool_word(b: bool) -> Word {
    if b {
        Word::one()
    } else {
        Word::zero()
    }
}

/// A 160-bit address occupies the low-order bits of the 256-bit word it is
/// pushed as.
pub fn address_to_word(addr: Address) -> Word {
    Word::from_big_endian(addr.as_bytes())
}

pub fn word_to_address(w: Word) -> Address {
    let mut bytes = [0u8; 32];
    w.to_big_endian(&mut bytes);
    Address::from_slice(&bytes[12..32])
}
