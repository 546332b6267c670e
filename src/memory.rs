//! Linear byte-addressable memory with quadratic expansion pricing.

use bytes::{Bytes, BytesMut};
use ethereum_types::U256;

use crate::word::Word;

/// One frame's linear memory. Grows in 32-byte increments and is never
/// shrunk.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    buf: BytesMut,
}

/// `words -> gas` via the quadratic `cost(w) = floor(w^2/512) + 3w`.
fn expansion_cost(words: u64) -> u64 {
    (words * words) / 512 + 3 * words
}

fn word_count(bytes_len: u64) -> u64 {
    bytes_len.div_ceil(32)
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Gas required to expand memory to cover `offset + size` bytes,
    /// without mutating `self`. Returns `0` if `size == 0` (must not
    /// trigger expansion) or if no growth is needed.
    pub fn expansion_gas(&self, offset: u64, size: u64) -> u64 {
        if size == 0 {
            return 0;
        }
        let words_old = word_count(self.buf.len() as u64);
        let words_new = word_count(offset.saturating_add(size));
        if words_new <= words_old {
            return 0;
        }
        expansion_cost(words_new) - expansion_cost(words_old)
    }

    /// Grow the buffer (if needed) to cover `offset + size` bytes, rounded
    /// up to a 32-byte multiple. Zero-fills the new region. A `size == 0`
    /// request never grows memory.
    pub fn expand(&mut self, offset: u64, size: u64) {
        if size == 0 {
            return;
        }
        let needed_words = word_count(offset.saturating_add(size));
        let needed_bytes = (needed_words * 32) as usize;
        if needed_bytes > self.buf.len() {
            self.buf.resize(needed_bytes, 0);
        }
    }

    /// Read `size` bytes starting at `offset`, expanding first. A
    /// `size == 0` read never expands and returns an empty slice.
    pub fn read(&mut self, offset: u64, size: u64) -> Bytes {
        if size == 0 {
            return Bytes::new();
        }
        self.expand(offset, size);
        let start = offset as usize;
        let end = start + size as usize;
        Bytes::copy_from_slice(&self.buf[start..end])
    }

    /// Write `data` starting at `offset`, expanding first.
    pub fn write(&mut self, offset: u64, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        self.expand(offset, data.len() as u64);
        let start = offset as usize;
        self.buf[start..start + data.len()].copy_from_slice(data);
    }

    /// `MLOAD`: read a 32-byte word, big-endian.
    pub fn load_word(&mut self, offset: u64) -> Word {
        let bytes = self.read(offset, 32);
        U256::from_big_endian(&bytes)
    }

    /// `MSTORE`: write a 32-byte word, big-endian.
    pub fn store_word(&mut self, offset: u64, value: Word) {
        let mut bytes = [0u8; 32];
        value.to_big_endian(&mut bytes);
        self.write(offset, &bytes);
    }

    /// `MSTORE8`: write only the low byte of `value`.
    pub fn store_byte(&mut self, offset: u64, value: Word) {
        let low_byte = value.byte(0);
        self.write(offset, &[low_byte]);
    }

    /// Snapshot the current contents (used to build RETURN/REVERT data and
    /// CALL argument buffers).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_never_expands() {
        let mut mem = Memory::new();
        mem.expand(1_000_000, 0);
        assert_eq!(mem.len(), 0);
    }

    #[test]
    fn expand_rounds_up_to_32() {
        let mut mem = Memory::new();
        mem.expand(0, 1);
        assert_eq!(mem.len(), 32);
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut mem = Memory::new();
        mem.store_word(0, Word::from(0x42));
        assert_eq!(mem.load_word(0), Word::from(0x42));
    }

    #[test]
    fn mstore8_only_touches_low_byte() {
        let mut mem = Memory::new();
        mem.store_byte(0, Word::from(0xab));
        let bytes = mem.read(0, 1);
        assert_eq!(bytes[0], 0xab);
    }

    #[test]
    fn expansion_gas_matches_scenario_six() {
        // PUSH1 1, PUSH3 0x010000, MSTORE -> growth from 0 to 65568 bytes.
        let mem = Memory::new();
        let gas = mem.expansion_gas(0x010000, 32);
        let words = word_count(0x010000 + 32);
        assert_eq!(words * 32, 65568);
        assert_eq!(gas, expansion_cost(words));
    }

    #[test]
    fn no_expansion_gas_when_already_large_enough() {
        let mut mem = Memory::new();
        mem.expand(0, 64);
        assert_eq!(mem.expansion_gas(0, 32), 0);
    }
}
