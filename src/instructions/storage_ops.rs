//! SLOAD, SSTORE.

use crate::delta::{Delta, Fault, HandlerResult};
use crate::error::EvmError;
use crate::jump_table::HandlerArgs;

pub fn op_sload(args: HandlerArgs) -> HandlerResult {
    let mut stack = args.rs.stack.clone();
    let key = stack.pop()?;
    let value = args.state.get_storage(&args.ctx.address, key);
    stack.push(value)?;
    Ok(Delta::next(stack, args.rs.pc + 1))
}

pub fn op_sstore(args: HandlerArgs) -> HandlerResult {
    if args.ctx.is_static {
        return Err(Fault::from(EvmError::StaticViolation));
    }
    let mut stack = args.rs.stack.clone();
    let key = stack.pop()?;
    let value = stack.pop()?;
    args.state.set_storage(args.ctx.address, key, value);
    Ok(Delta::next(stack, args.rs.pc + 1))
}
