//! 0x16-0x1D: AND through SAR.

use crate::delta::{Delta, HandlerResult};
use crate::jump_table::HandlerArgs;
use crate::word;

pub fn op_and(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(a & b)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_or(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(a | b)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_xor(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    let b = stack.pop()?;
    stack.push(a ^ b)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_not(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let a = stack.pop()?;
    stack.push(!a)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_byte(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let index = stack.pop()?;
    let value = stack.pop()?;
    stack.push(word::byte(index, value))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_shl(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let shift = stack.pop()?;
    let value = stack.pop()?;
    stack.push(word::shl(shift, value))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_shr(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let shift = stack.pop()?;
    let value = stack.pop()?;
    stack.push(word::shr(shift, value))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_sar(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let shift = stack.pop()?;
    let value = stack.pop()?;
    stack.push(word::sar(shift, value))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}
