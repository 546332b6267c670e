//! 0x10-0x15: LT through ISZERO.

use crate::delta::{Delta, HandlerResult};
use crate::jump_table::HandlerArgs;
use crate::word;

use super::support::bool_word;

pub fn op_lt(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(bool_word(a < b))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_gt(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(bool_word(a > b))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_slt(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(bool_word(word::slt(a, b)))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_sgt(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(bool_word(word::sgt(a, b)))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_eq(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(bool_word(a == b))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_iszero(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    stack.push(bool_word(a.is_zero()))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}
