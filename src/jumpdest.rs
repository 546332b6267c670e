//! Static valid-jump-destination precomputation.
//!
//! A bit per bytecode offset: set if that offset is a JUMPDEST opcode that
//! is not itself inside a PUSH's immediate data.

use bitvec::vec::BitVec;

use crate::opcodes;

#[derive(Debug, Clone)]
pub struct JumpDestinations {
    valid: BitVec,
}

impl JumpDestinations {
    pub fn analyze(bytecode: &[u8]) -> Self {
        let mut valid = BitVec::repeat(false, bytecode.len());
        let mut pc = 0usize;
        while pc < bytecode.len() {
            let op = bytecode[pc];
            if op == opcodes::JUMPDEST {
                valid.set(pc, true);
                pc += 1;
            } else if opcodes::is_push_with_immediate(op) {
                pc += 1 + opcodes::push_immediate_len(op) as usize;
            } else {
                pc += 1;
            }
        }
        Self { valid }
    }

    /// Whether `pc` is a valid JUMP/JUMPI target: in bounds, equal to
    /// 0x5B, and not inside a PUSH's immediate-data span.
    pub fn is_valid(&self, pc: usize) -> bool {
        self.valid.get(pc).map(|b| *b).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcodes;

    #[test]
    fn jumpdest_outside_push_is_valid() {
        // PUSH1 1, JUMPDEST
        let code = [opcodes::PUSH1, 0x01, opcodes::JUMPDEST];
        let dests = JumpDestinations::analyze(&code);
        assert!(dests.is_valid(2));
        assert!(!dests.is_valid(0));
        assert!(!dests.is_valid(1));
    }

    #[test]
    fn jumpdest_byte_inside_push_immediate_is_not_valid() {
        // PUSH1 0x5b -- the immediate byte happens to equal JUMPDEST's opcode.
        let code = [opcodes::PUSH1, opcodes::JUMPDEST];
        let dests = JumpDestinations::analyze(&code);
        assert!(!dests.is_valid(1));
    }

    #[test]
    fn scenario_four_jumpdest_after_invalid() {
        // 6001600757FE5B6042
        let code = hex::decode("6001600757FE5B6042").unwrap();
        let dests = JumpDestinations::analyze(&code);
        assert!(dests.is_valid(7));
    }
}
