//! The interpreter's top-level output.

use bytes::Bytes;

use crate::context::LogEntry;
use crate::error::EvmError;
use crate::memory::Memory;
use crate::stack::Stack;
use crate::word::Word;
use crate::world_state::WorldState;

/// What `execute()` (the call dispatcher's entry point) hands back to its
/// caller, whether that caller is the CLI, the test harness, or a parent
/// frame reconciling a sub-call.
pub struct ExecutionResult {
    pub success: bool,
    pub stack: Vec<Word>,
    pub memory: Bytes,
    pub gas_left: u64,
    pub returndata: Bytes,
    pub logs: Vec<LogEntry>,
    pub state: WorldState,
    /// `None` on success; the frame-fatal reason otherwise. Kept alongside
    /// `success` rather than folded into it so callers that only care about
    /// the boolean (e.g. the CALL opcode's push-1-or-0 rule) don't need to
    /// match on it.
    pub error: Option<EvmError>,
}

impl ExecutionResult {
    pub fn success(
        stack: &Stack,
        memory: &Memory,
        gas_left: u64,
        returndata: Bytes,
        logs: Vec<LogEntry>,
        state: WorldState,
    ) -> Self {
        Self {
            success: true,
            stack: stack.top_first(),
            memory: Bytes::copy_from_slice(memory.as_bytes()),
            gas_left,
            returndata,
            logs,
            state,
            error: None,
        }
    }

    pub fn failure(
        stack: &Stack,
        memory: &Memory,
        gas_left: u64,
        returndata: Bytes,
        logs: Vec<LogEntry>,
        state: WorldState,
        error: EvmError,
    ) -> Self {
        Self {
            success: false,
            stack: stack.top_first(),
            memory: Bytes::copy_from_slice(memory.as_bytes()),
            gas_left,
            returndata,
            logs,
            state,
            error: Some(error),
        }
    }
}
