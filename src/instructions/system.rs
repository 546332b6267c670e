//! SHA3, CALL, RETURN, DELEGATECALL, STATICCALL, REVERT.

use bytes::Bytes;
use ethereum_types::Address;
use sha3::{Digest, Keccak256};

use crate::call_dispatcher;
use crate::context::Context;
use crate::delta::{Delta, Fault, HandlerResult};
use crate::error::EvmError;
use crate::frame;
use crate::jump_table::HandlerArgs;
use crate::word::Word;
use crate::world_state::WorldState;

use super::support::{bool_word, word_to_address, word_to_u64};

pub fn op_sha3(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let offset = word_to_u64(stack.pop()?)?;
    let size = word_to_u64(stack.pop()?)?;

    let gas = args.rs.memory.expansion_gas(offset, size) + 6 * size.div_ceil(32);
    let mut memory = args.rs.memory.clone();
    let data = memory.read(offset, size);

    let mut hasher = Keccak256::new();
    hasher.update(&data);
    stack.push(Word::from_big_endian(&hasher.finalize()))?;

    Ok(Delta::next(stack, args.rs.pc + 1)
        .with_memory(memory)
        .with_gas(gas))
}

pub fn op_return(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let offset = word_to_u64(stack.pop()?)?;
    let size = word_to_u64(stack.pop()?)?;

    let gas = args.rs.memory.expansion_gas(offset, size);
    let mut memory = args.rs.memory.clone();
    let data = memory.read(offset, size);

    Ok(Delta::next(stack, args.rs.pc)
        .with_memory(memory)
        .with_returndata(data)
        .with_gas(gas)
        .halting())
}

pub fn op_revert(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let offset = word_to_u64(stack.pop()?)?;
    let size = word_to_u64(stack.pop()?)?;

    let gas = args.rs.memory.expansion_gas(offset, size);
    let mut memory = args.rs.memory.clone();
    let data = memory.read(offset, size);

    Ok(Delta::next(stack, args.rs.pc)
        .with_memory(memory)
        .with_returndata(data)
        .with_gas(gas)
        .revert())
}

enum CallKind {
    Call,
    DelegateCall,
    StaticCall,
}

pub fn op_call(args: HandlerArgs) -> HandlerResult {
    call_like(args, CallKind::Call)
}

pub fn op_delegatecall(args: HandlerArgs) -> HandlerResult {
    call_like(args, CallKind::DelegateCall)
}

pub fn op_staticcall(args: HandlerArgs) -> HandlerResult {
    call_like(args, CallKind::StaticCall)
}

fn transfer(state: &mut WorldState, from: Address, to: Address, value: Word) {
    let from_balance = state.get_balance(&from);
    if from_balance < value {
        return;
    }
    state.set_balance(from, from_balance - value);
    let to_balance = state.get_balance(&to);
    state.set_balance(to, to_balance + value);
}

fn call_like(args: HandlerArgs, kind: CallKind) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let gas_requested = word_to_u64(stack.pop()?)?;
    let to = word_to_address(stack.pop()?);
    let value = match kind {
        CallKind::Call => stack.pop()?,
        CallKind::DelegateCall | CallKind::StaticCall => Word::zero(),
    };
    if matches!(kind, CallKind::Call) && args.ctx.is_static && !value.is_zero() {
        return Err(Fault::from(EvmError::StaticViolation));
    }

    let args_offset = word_to_u64(stack.pop()?)?;
    let args_size = word_to_u64(stack.pop()?)?;
    let ret_offset = word_to_u64(stack.pop()?)?;
    let ret_size = word_to_u64(stack.pop()?)?;

    let mut memory = args.rs.memory.clone();
    let args_gas = memory.expansion_gas(args_offset, args_size);
    memory.expand(args_offset, args_size);
    let ret_gas = memory.expansion_gas(ret_offset, ret_size);
    memory.expand(ret_offset, ret_size);
    let mem_gas = args_gas + ret_gas;

    let call_data = memory.read(args_offset, args_size);

    // Depth-bounded failure is recoverable by the caller, like an
    // empty-code call: push 0 rather than raising a frame-fatal error.
    if args.ctx.depth + 1 > 1024 {
        stack.push(bool_word(false))?;
        return Ok(Delta::next(stack, args.rs.pc + 1)
            .with_memory(memory)
            .with_gas(mem_gas));
    }

    let code = args.state.get_code(&to).to_vec();
    if code.is_empty() {
        if matches!(kind, CallKind::Call) && !value.is_zero() {
            transfer(args.state, args.ctx.address, to, value);
        }
        stack.push(bool_word(true))?;
        return Ok(Delta::next(stack, args.rs.pc + 1)
            .with_memory(memory)
            .with_gas(mem_gas));
    }

    if matches!(kind, CallKind::Call) && !value.is_zero() {
        transfer(args.state, args.ctx.address, to, value);
    }

    let available = args.ctx.gas_left.saturating_sub(100);
    let forwarded = call_dispatcher::forwarded_gas(gas_requested, available);

    let sub_ctx = build_sub_context(&kind, args.ctx, to, value, call_data, code, forwarded);
    let sub_result = frame::run(&sub_ctx, args.state);

    let copy_len = (ret_size as usize).min(sub_result.returndata.len());
    memory.write(ret_offset, &sub_result.returndata[..copy_len]);

    stack.push(bool_word(sub_result.success))?;
    let consumed = forwarded.saturating_sub(sub_result.gas_left);

    Ok(Delta::next(stack, args.rs.pc + 1)
        .with_memory(memory)
        .with_returndata(sub_result.returndata.clone())
        .with_gas(mem_gas + consumed))
}

#[allow(clippy::too_many_arguments)]
fn build_sub_context(
    kind: &CallKind,
    caller_ctx: &Context,
    to: Address,
    value: Word,
    call_data: Bytes,
    code: Vec<u8>,
    forwarded: u64,
) -> Context {
    let bytecode = Bytes::from(code);
    match kind {
        CallKind::Call => Context {
            address: to,
            caller: caller_ctx.address,
            origin: caller_ctx.origin,
            gas_price: caller_ctx.gas_price,
            gas_left: forwarded,
            is_static: caller_ctx.is_static,
            call_value: value,
            call_data,
            bytecode,
            block: caller_ctx.block.clone(),
            depth: caller_ctx.depth + 1,
        },
        CallKind::DelegateCall => Context {
            address: caller_ctx.address,
            caller: caller_ctx.caller,
            origin: caller_ctx.origin,
            gas_price: caller_ctx.gas_price,
            gas_left: forwarded,
            is_static: caller_ctx.is_static,
            call_value: caller_ctx.call_value,
            call_data,
            bytecode,
            block: caller_ctx.block.clone(),
            depth: caller_ctx.depth + 1,
        },
        CallKind::StaticCall => Context {
            address: to,
            caller: caller_ctx.address,
            origin: caller_ctx.origin,
            gas_price: caller_ctx.gas_price,
            gas_left: forwarded,
            is_static: true,
            call_value: Word::zero(),
            call_data,
            bytecode,
            block: caller_ctx.block.clone(),
            depth: caller_ctx.depth + 1,
        },
    }
}
