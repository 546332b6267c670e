//! The fetch-decode-dispatch loop: one frame's worth of execution.

use bytes::Bytes;
use tracing::{debug, trace};

use crate::context::{Context, RunState};
use crate::error::EvmError;
use crate::jump_table::{HandlerArgs, JUMP_TABLE};
use crate::jumpdest::JumpDestinations;
use crate::result::ExecutionResult;
use crate::world_state::WorldState;

/// Run one frame to completion: either a top-level invocation or a
/// CALL/DELEGATECALL/STATICCALL sub-frame. `state` is shared by reference
/// with every other frame of the same top-level call.
pub fn run(ctx: &Context, state: &mut WorldState) -> ExecutionResult {
    let mut ctx = ctx.clone();
    let mut rs = RunState::new();
    let jumpdests = JumpDestinations::analyze(&ctx.bytecode);

    loop {
        if rs.pc >= ctx.bytecode.len() {
            debug!(depth = ctx.depth, "frame fell off the end of the code");
            return ExecutionResult::success(
                &rs.stack,
                &rs.memory,
                ctx.gas_left,
                rs.returndata,
                rs.logs,
                state.clone(),
            );
        }

        let opcode = ctx.bytecode[rs.pc];
        let entry = &JUMP_TABLE[opcode as usize];

        trace!(
            target: "mini_evm::trace::step",
            pc = rs.pc,
            opcode = entry.mnemonic,
            "step"
        );
        trace!(
            target: "mini_evm::trace::state",
            stack = ?rs.stack.top_first(),
            memory_len = rs.memory.len(),
            gas_left = ctx.gas_left,
            "state"
        );
        trace!(
            target: "mini_evm::trace::detail",
            call_data_len = ctx.call_data.len(),
            logs_so_far = rs.logs.len(),
            returndata_len = rs.returndata.len(),
            "detail"
        );

        let args = HandlerArgs {
            rs: &rs,
            ctx: &ctx,
            state: &mut *state,
            jumpdests: &jumpdests,
        };

        match entry.dispatch(args) {
            Ok(delta) => {
                let total_gas = entry.min_gas + delta.additional_gas;
                if total_gas > ctx.gas_left {
                    debug!(depth = ctx.depth, pc = rs.pc, "out of gas");
                    return ExecutionResult::failure(
                        &rs.stack,
                        &rs.memory,
                        0,
                        Bytes::new(),
                        rs.logs,
                        state.clone(),
                        EvmError::OutOfGas,
                    );
                }
                ctx.gas_left -= total_gas;
                rs.pc = delta.pc;
                rs.stack = delta.stack;
                if let Some(memory) = delta.memory {
                    rs.memory = memory;
                }
                if let Some(returndata) = delta.returndata {
                    rs.returndata = returndata;
                }
                rs.logs.extend(delta.logs);

                if delta.reverted {
                    debug!(depth = ctx.depth, pc = rs.pc, "frame reverted");
                    return ExecutionResult::failure(
                        &rs.stack,
                        &rs.memory,
                        ctx.gas_left,
                        rs.returndata,
                        rs.logs,
                        state.clone(),
                        EvmError::Revert,
                    );
                }
                if !delta.continue_execution {
                    return ExecutionResult::success(
                        &rs.stack,
                        &rs.memory,
                        ctx.gas_left,
                        rs.returndata,
                        rs.logs,
                        state.clone(),
                    );
                }
            }
            Err(fault) => {
                let gas_left = if fault.error.consumes_all_gas() {
                    0
                } else {
                    ctx.gas_left
                };
                debug!(depth = ctx.depth, pc = rs.pc, error = %fault.error, "frame failed");
                return ExecutionResult::failure(
                    &rs.stack,
                    &rs.memory,
                    gas_left,
                    fault.returndata,
                    rs.logs,
                    state.clone(),
                    fault.error,
                );
            }
        }
    }
}
