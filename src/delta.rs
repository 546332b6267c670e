//! The value an opcode handler returns: a description of how the frame's
//! local state should change, without the handler applying it itself. The
//! frame executor charges gas first and only then merges a `Delta` into
//! the live `RunState` — see `frame::run`.
//!
//! World-state writes (SSTORE, and whatever a nested CALL mutates) are the
//! one exception: they go through `&mut WorldState` directly inside the
//! handler, since there is no journal/snapshot mechanism to undo them on a
//! later OOG or error. Only the purely local pieces of RunState — stack,
//! PC, memory, logs, returndata — are staged in `Delta` and can be thrown
//! away if the instruction turns out unaffordable.

use bytes::Bytes;

use crate::context::LogEntry;
use crate::error::EvmError;
use crate::memory::Memory;
use crate::stack::Stack;

/// The staged outcome of one opcode handler, applied by the frame executor
/// once gas has been confirmed affordable.
pub struct Delta {
    pub stack: Stack,
    pub pc: usize,
    pub memory: Option<Memory>,
    pub returndata: Option<Bytes>,
    pub logs: Vec<LogEntry>,
    pub additional_gas: u64,
    pub continue_execution: bool,
    /// Set only by REVERT. Its gas is charged through the normal pipeline
    /// (unlike every other frame-fatal condition, which zeroes `gasLeft`),
    /// so it travels as a flag on a successfully-charged `Delta` rather
    /// than as a `Fault`.
    pub reverted: bool,
}

impl Delta {
    /// The common case: stack/pc updated, nothing else, keep running.
    pub fn next(stack: Stack, pc: usize) -> Self {
        Self {
            stack,
            pc,
            memory: None,
            returndata: None,
            logs: Vec::new(),
            additional_gas: 0,
            continue_execution: true,
            reverted: false,
        }
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.additional_gas = gas;
        self
    }

    pub fn with_memory(mut self, memory: Memory) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn with_returndata(mut self, data: Bytes) -> Self {
        self.returndata = Some(data);
        self
    }

    pub fn with_log(mut self, log: LogEntry) -> Self {
        self.logs.push(log);
        self
    }

    pub fn halting(mut self) -> Self {
        self.continue_execution = false;
        self
    }

    /// REVERT: halts, and tells the frame executor to report
    /// `EvmError::Revert` instead of success once this delta is applied.
    pub fn revert(mut self) -> Self {
        self.continue_execution = false;
        self.reverted = true;
        self
    }
}

/// A frame-fatal outcome other than REVERT (which travels through `Delta`
/// instead — see `Delta::revert`). Always consumes all remaining gas.
pub struct Fault {
    pub error: EvmError,
    pub returndata: Bytes,
}

impl Fault {
    pub fn new(error: EvmError) -> Self {
        Self {
            error,
            returndata: Bytes::new(),
        }
    }
}

impl From<EvmError> for Fault {
    fn from(error: EvmError) -> Self {
        Fault::new(error)
    }
}

pub type HandlerResult = Result<Delta, Fault>;
