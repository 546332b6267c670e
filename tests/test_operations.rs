//! End-to-end interpreter scenarios and arithmetic invariants.
//!
//! Each scenario runs a short hex program through the public `execute` entry
//! point exactly as the CLI or a JSON fixture would, rather than poking at
//! opcode handlers directly.

use ethereum_types::Address;
use mini_evm::{BlockHeader, Context, EvmError, Word, WorldState};

fn run_code(code_hex: &str) -> mini_evm::ExecutionResult {
    let code = hex::decode(code_hex).expect("valid hex");
    let ctx = Context::top_level(
        Address::zero(),
        Address::zero(),
        Address::zero(),
        Word::zero(),
        10_000_000,
        Word::zero(),
        Default::default(),
        code.into(),
        BlockHeader::default(),
    );
    mini_evm::execute(ctx, WorldState::new())
}

#[test]
fn scenario_push_and_add() {
    // PUSH1 1, PUSH1 2, ADD
    let result = run_code("6001600201");
    assert!(result.success);
    assert_eq!(result.stack, vec![Word::from(3)]);
}

#[test]
fn scenario_unsigned_overflow_wraps_to_zero() {
    // PUSH32 2^256-1, PUSH1 1, ADD
    let code = "7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF600101";
    let result = run_code(code);
    assert!(result.success);
    assert_eq!(result.stack, vec![Word::zero()]);
}

#[test]
fn scenario_division_by_zero_returns_zero_bytes() {
    // PUSH1 0, PUSH1 0, DIV, PUSH1 0, MSTORE, PUSH1 32, PUSH1 0, RETURN
    let result = run_code("600060000460005260206000F3");
    assert!(result.success);
    assert_eq!(result.returndata.as_ref(), [0u8; 32]);
}

#[test]
fn scenario_conditional_jump_taken() {
    // PUSH1 1, PUSH1 7, JUMPI, INVALID, JUMPDEST, PUSH1 0x42
    let result = run_code("6001600757FE5B6042");
    assert!(result.success);
    assert_eq!(result.stack, vec![Word::from(0x42)]);
}

#[test]
fn scenario_stack_underflow_is_fatal() {
    // ADD with an empty stack.
    let result = run_code("01");
    assert!(!result.success);
    assert_eq!(result.error, Some(EvmError::StackUnderflow));
}

#[test]
fn scenario_memory_expansion_gas_matches_quadratic_formula() {
    // PUSH1 1, PUSH3 0x010000, MSTORE: grows memory from 0 to 65568 bytes.
    let result = run_code("60016201000052");
    assert!(result.success);

    let words_new = 65568u64 / 32;
    let expansion = words_new * words_new / 512 + 3 * words_new;
    let expected_consumed = 3 + 3 + 3 + expansion;
    assert_eq!(result.gas_left, 10_000_000 - expected_consumed);
}

#[test]
fn scenario_invalid_opcode_consumes_all_gas() {
    let result = run_code("FE");
    assert!(!result.success);
    assert_eq!(result.gas_left, 0);
    assert_eq!(result.error, Some(EvmError::InvalidOpcode(0xFE)));
}

#[test]
fn scenario_revert_refunds_unused_gas_and_carries_returndata() {
    // PUSH1 0x99, PUSH1 0, MSTORE, PUSH1 32, PUSH1 0, REVERT
    let result = run_code("609960005260206000fd");
    assert!(!result.success);
    assert_eq!(result.error, Some(EvmError::Revert));
    assert!(result.gas_left > 0);
    let mut expected = [0u8; 32];
    expected[31] = 0x99;
    assert_eq!(result.returndata.as_ref(), expected);
}

#[test]
fn scenario_jump_to_out_of_bounds_offset_is_invalid() {
    // PUSH1 4, JUMP -- offset 4 doesn't exist in a 4-byte program.
    let result = run_code("60045600");
    assert!(!result.success);
    assert_eq!(result.error, Some(EvmError::InvalidJump));
}

#[test]
fn scenario_jump_into_push_immediate_is_invalid() {
    // PUSH1 0x5b, PUSH1 1, PUSH1 1, JUMPI -- the condition is truthy and
    // targets offset 1, which is PUSH1's immediate byte (coincidentally the
    // JUMPDEST opcode's value), not a real instruction.
    let result = run_code("605b6001600157");
    assert!(!result.success);
    assert_eq!(result.error, Some(EvmError::InvalidJump));
}

#[test]
fn falling_off_the_end_of_code_terminates_successfully() {
    // PUSH1 1 with no further instructions.
    let result = run_code("6001");
    assert!(result.success);
    assert_eq!(result.stack, vec![Word::one()]);
}

mod invariants {
    use super::run_code;
    use mini_evm::Word;

    fn word_hex(w: Word) -> String {
        let mut bytes = [0u8; 32];
        w.to_big_endian(&mut bytes);
        hex::encode(bytes)
    }

    /// Runs `a <op> b` with the conventional stack-machine meaning (`a` is
    /// the opcode's first popped operand, `b` its second) by pushing `b`
    /// then `a`, so `a` ends up on top.
    fn binop(op: &str, a: Word, b: Word) -> Word {
        let code = format!("7f{}7f{}{op}", word_hex(b), word_hex(a));
        let result = run_code(&code);
        assert!(result.success);
        result.stack[0]
    }

    #[test]
    fn add_wraps_modulo_2_256() {
        assert_eq!(binop("01", Word::max_value(), Word::from(5)), Word::from(4));
    }

    #[test]
    fn mul_by_zero_is_zero() {
        let a = Word::from(123_456_789u64);
        assert_eq!(binop("02", a, Word::zero()), Word::zero());
    }

    #[test]
    fn sub_wraps_modulo_2_256() {
        assert_eq!(binop("03", Word::zero(), Word::one()), Word::max_value());
    }

    #[test]
    fn div_then_mod_reconstructs_dividend() {
        let a = Word::from(100);
        let b = Word::from(7);
        let quotient = binop("04", a, b);
        let remainder = binop("06", a, b);
        assert_eq!(quotient * b + remainder, a);
        assert!(remainder < b);
    }

    #[test]
    fn not_not_is_identity() {
        let a = Word::from(0xDEADBEEFu64);
        let code = format!("7f{}1919", word_hex(a));
        let result = run_code(&code);
        assert!(result.success);
        assert_eq!(result.stack[0], a);
    }

    #[test]
    fn shr_then_shl_zeroes_low_bits() {
        // SHL(s, SHR(s, x)) zeroes the low s bits of x, for s < 256.
        let x = Word::max_value();
        let s = Word::from(8);
        let shr_code = format!("7f{}7f{}1c", word_hex(x), word_hex(s));
        let shr_result = run_code(&shr_code);
        assert!(shr_result.success);
        let shifted = shr_result.stack[0];

        let shl_code = format!("7f{}7f{}1b", word_hex(shifted), word_hex(s));
        let shl_result = run_code(&shl_code);
        assert!(shl_result.success);

        let mask = !Word::from(0xffu64);
        assert_eq!(shl_result.stack[0], x & mask);
    }
}
