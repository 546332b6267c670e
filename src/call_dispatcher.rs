//! The recursive entry point: one top-level call and, via CALL/DELEGATECALL/
//! STATICCALL, every nested sub-call it spawns.

use tracing::debug;

use crate::context::Context;
use crate::frame;
use crate::result::ExecutionResult;
use crate::world_state::WorldState;

/// All but one 64th of `available` (the gas left after the CALL-family
/// opcode's own fixed cost is set aside), capped at what the stack
/// requested. This is the yellow paper's EIP-150 "63/64 rule":
/// `requested.min(available - available/64)`, not the superficially
/// similar but wrong `requested.min(available/64)`.
pub fn forwarded_gas(requested: u64, available: u64) -> u64 {
    let max_forwardable = available - available / 64;
    requested.min(max_forwardable)
}

/// Build an empty frame over `ctx` and run it to completion. Used both for
/// a fresh top-level invocation and, conceptually, describes what each
/// CALL-family handler does to recurse (those call `frame::run` directly
/// since they already hold the `&mut WorldState` borrow).
pub fn execute(ctx: Context, mut state: WorldState) -> ExecutionResult {
    debug!(address = ?ctx.address, gas = ctx.gas_left, "entering top-level frame");
    let result = frame::run(&ctx, &mut state);
    debug!(
        success = result.success,
        gas_left = result.gas_left,
        "top-level frame finished"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_all_but_one_64th() {
        assert_eq!(forwarded_gas(u64::MAX, 6400), 6400 - 100);
    }

    #[test]
    fn caps_at_requested() {
        assert_eq!(forwarded_gas(10, 6400), 10);
    }
}
