//! LOG0-LOG4.

use crate::context::LogEntry;
use crate::delta::{Delta, Fault, HandlerResult};
use crate::error::EvmError;
use crate::jump_table::HandlerArgs;
use bytes::Bytes;

use super::support::word_to_u64;

pub fn log_n(args: HandlerArgs, topic_count: usize) -> HandlerResult {
    if args.ctx.is_static {
        return Err(Fault::from(EvmError::StaticViolation));
    }
    let mut stack = args.rs.stack.clone();
    let offset = word_to_u64(stack.pop()?)?;
    let size = word_to_u64(stack.pop()?)?;
    let mut topics = Vec::with_capacity(topic_count);
    for _ in 0..topic_count {
        topics.push(stack.pop()?);
    }

    let gas = args.rs.memory.expansion_gas(offset, size) + 8 * size;
    let mut memory = args.rs.memory.clone();
    let data = Bytes::copy_from_slice(&memory.read(offset, size));

    let log = LogEntry {
        address: args.ctx.address,
        data,
        topics,
    };

    Ok(Delta::next(stack, args.rs.pc + 1)
        .with_memory(memory)
        .with_log(log)
        .with_gas(gas))
}
