//! 0x01-0x0B: ADD through SIGNEXTEND.

use crate::delta::{Delta, HandlerResult};
use crate::jump_table::HandlerArgs;
use crate::word::{self, Word};

pub fn op_add(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(a.overflowing_add(b).0)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_mul(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(a.overflowing_mul(b).0)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_sub(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(a.overflowing_sub(b).0)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_div(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    let result = if b.is_zero() { Word::zero() } else { a / b };
    stack.push(result)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_sdiv(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(word::sdiv(a, b))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_mod(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    let result = if b.is_zero() { Word::zero() } else { a % b };
    stack.push(result)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_smod(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(word::smod(a, b))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_addmod(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    let n = stack.pop()?;
    stack.push(word::addmod(a, b, n))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_mulmod(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    let n = stack.pop()?;
    stack.push(word::mulmod(a, b, n))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_exp(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let base = stack.pop()?;
    let exponent = stack.pop()?;
    stack.push(word::exp(base, exponent))?;
    let dynamic_gas = 50 * word::byte_len(exponent) as u64;
    Ok(Delta::next(stack, args.rs.pc + 1).with_gas(dynamic_gas))
}

pub fn op_signextend(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let b = stack.pop()?;
    let x = stack.pop()?;
    stack.push(word::signextend(b, x))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}
