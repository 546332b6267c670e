//! MLOAD, MSTORE, MSTORE8, MSIZE.

use crate::delta::{Delta, HandlerResult};
use crate::jump_table::HandlerArgs;
use crate::word::Word;

use super::support::word_to_u64;

pub fn op_mload(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let offset = word_to_u64(stack.pop()?)?;

    let gas = args.rs.memory.expansion_gas(offset, 32);
    let mut memory = args.rs.memory.clone();
    let value = memory.load_word(offset);
    stack.push(value)?;

    Ok(Delta::next(stack, args.rs.pc + 1)
        .with_memory(memory)
        .with_gas(gas))
}

pub fn op_mstore(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let offset = word_to_u64(stack.pop()?)?;
    let value = stack.pop()?;

    let gas = args.rs.memory.expansion_gas(offset, 32);
    let mut memory = args.rs.memory.clone();
    memory.store_word(offset, value);

    Ok(Delta::next(stack, args.rs.pc + 1)
        .with_memory(memory)
        .with_gas(gas))
}

pub fn op_mstore8(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let offset = word_to_u64(stack.pop()?)?;
    let value = stack.pop()?;

    let gas = args.rs.memory.expansion_gas(offset, 1);
    let mut memory = args.rs.memory.clone();
    memory.store_byte(offset, value);

    Ok(Delta::next(stack, args.rs.pc + 1)
        .with_memory(memory)
        .with_gas(gas))
}

pub fn op_msize(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(Word::from(args.rs.memory.len() as u64))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}
