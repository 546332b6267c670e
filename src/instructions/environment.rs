//! 0x30-0x48: context, environment, and block queries.

use sha3::{Digest, Keccak256};

use crate::delta::{Delta, HandlerResult};
use crate::jump_table::HandlerArgs;
use crate::word::Word;

use super::support::{address_to_word, copy_padded, word_to_address, word_to_u64};

/// Real-EVM per-word copy cost shared by CALLDATACOPY/CODECOPY/
/// EXTCODECOPY/RETURNDATACOPY, on top of memory expansion.
fn copy_word_gas(size: u64) -> u64 {
    3 * size.div_ceil(32)
}

pub fn op_address(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(address_to_word(args.ctx.address))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_balance(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let addr = word_to_address(stack.pop()?);
    stack.push(args.state.get_balance(&addr))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_origin(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(address_to_word(args.ctx.origin))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_caller(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(address_to_word(args.ctx.caller))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_callvalue(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(args.ctx.call_value)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_calldataload(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let offset = word_to_u64(stack.pop()?)?;
    let bytes = copy_padded(&args.ctx.call_data, offset, 32);
    stack.push(Word::from_big_endian(&bytes))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_calldatasize(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(Word::from(args.ctx.call_data.len() as u64))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_calldatacopy(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let dest_offset = word_to_u64(stack.pop()?)?;
    let offset = word_to_u64(stack.pop()?)?;
    let size = word_to_u64(stack.pop()?)?;

    let gas = args.rs.memory.expansion_gas(dest_offset, size) + copy_word_gas(size);
    let mut memory = args.rs.memory.clone();
    let data = copy_padded(&args.ctx.call_data, offset, size);
    memory.write(dest_offset, &data);

    Ok(Delta::next(stack, args.rs.pc + 1)
        .with_memory(memory)
        .with_gas(gas))
}

pub fn op_codesize(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(Word::from(args.ctx.bytecode.len() as u64))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_codecopy(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let dest_offset = word_to_u64(stack.pop()?)?;
    let offset = word_to_u64(stack.pop()?)?;
    let size = word_to_u64(stack.pop()?)?;

    let gas = args.rs.memory.expansion_gas(dest_offset, size) + copy_word_gas(size);
    let mut memory = args.rs.memory.clone();
    let data = copy_padded(&args.ctx.bytecode, offset, size);
    memory.write(dest_offset, &data);

    Ok(Delta::next(stack, args.rs.pc + 1)
        .with_memory(memory)
        .with_gas(gas))
}

pub fn op_gasprice(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(args.ctx.gas_price)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_extcodesize(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let addr = word_to_address(stack.pop()?);
    stack.push(Word::from(args.state.get_code(&addr).len() as u64))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_extcodecopy(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let addr = word_to_address(stack.pop()?);
    let dest_offset = word_to_u64(stack.pop()?)?;
    let offset = word_to_u64(stack.pop()?)?;
    let size = word_to_u64(stack.pop()?)?;

    let gas = args.rs.memory.expansion_gas(dest_offset, size) + copy_word_gas(size);
    let mut memory = args.rs.memory.clone();
    let data = copy_padded(args.state.get_code(&addr), offset, size);
    memory.write(dest_offset, &data);

    Ok(Delta::next(stack, args.rs.pc + 1)
        .with_memory(memory)
        .with_gas(gas))
}

pub fn op_returndatasize(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(Word::from(args.rs.returndata.len() as u64))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_returndatacopy(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let dest_offset = word_to_u64(stack.pop()?)?;
    let offset = word_to_u64(stack.pop()?)?;
    let size = word_to_u64(stack.pop()?)?;

    let gas = args.rs.memory.expansion_gas(dest_offset, size) + copy_word_gas(size);
    let mut memory = args.rs.memory.clone();
    let data = copy_padded(&args.rs.returndata, offset, size);
    memory.write(dest_offset, &data);

    Ok(Delta::next(stack, args.rs.pc + 1)
        .with_memory(memory)
        .with_gas(gas))
}

pub fn op_extcodehash(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let addr = word_to_address(stack.pop()?);
    let hash = if args.state.account_exists(&addr) {
        let mut hasher = Keccak256::new();
        hasher.update(args.state.get_code(&addr));
        Word::from_big_endian(&hasher.finalize())
    } else {
        Word::zero()
    };
    stack.push(hash)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_blockhash(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.pop()?;
    stack.push(Word::zero())?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_coinbase(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(address_to_word(args.ctx.block.coinbase))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_timestamp(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(args.ctx.block.timestamp)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_number(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(args.ctx.block.number)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_difficulty(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(args.ctx.block.difficulty)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_gaslimit(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(args.ctx.block.gas_limit)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_chainid(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(args.ctx.block.chain_id)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_selfbalance(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(args.state.get_balance(&args.ctx.address))?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_basefee(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    stack.push(args.ctx.block.basefee)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}
