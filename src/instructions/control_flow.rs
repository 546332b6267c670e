//! STOP, JUMP, JUMPI, PC, GAS, JUMPDEST, INVALID.

use bytes::Bytes;

use crate::delta::{Delta, Fault, HandlerResult};
use crate::error::EvmError;
use crate::jump_table::HandlerArgs;
use crate::word::Word;

use super::support::{is_truthy, word_to_u64};

pub fn op_stop(args: HandlerArgs) -> HandlerResult {
    let stack = args.rs.stack.clone();
    Ok(Delta::next(stack, args.rs.pc)
        .with_returndata(Bytes::new())
        .halting())
}

pub fn op_jump(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let dest = word_to_u64(stack.pop()?)? as usize;
    if !args.jumpdests.is_valid(dest) {
        return Err(Fault::from(EvmError::InvalidJump));
    }
    Ok(Delta::next(stack, dest))
}

pub fn op_jumpi(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let dest = word_to_u64(stack.pop()?)? as usize;
    let cond = stack.pop()?;
    if is_truthy(cond) {
        if !args.jumpdests.is_valid(dest) {
            return Err(Fault::from(EvmError::InvalidJump));
        }
        Ok(Delta::next(stack, dest))
    } else {
        Ok(Delta::next(stack, args.rs.pc + 1))
    }
}

pub fn op_pc(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(Word::from(args.rs.pc as u64))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

/// GAS pushes the frame's remaining gas as it will stand *after* this
/// instruction's own (fixed, 2 gas) cost is charged.
pub fn op_gas(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(Word::from(args.ctx.gas_left.saturating_sub(2)))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_jumpdest(args: HandlerArgs) -> HandlerResult {
    Ok(Delta::next(args.rs.stack.clone(), args.rs.pc + 1))
}

pub fn op_invalid(args: HandlerArgs) -> HandlerResult {
    let op = args.ctx.bytecode.get(args.rs.pc).copied().unwrap_or(0xFE);
    Err(Fault::from(EvmError::InvalidOpcode(op)))
}
