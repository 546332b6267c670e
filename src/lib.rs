//! A single-threaded interpreter for EVM bytecode targeting the Shanghai
//! instruction set (word arithmetic, linear memory, the instruction table,
//! the frame executor, and the recursive call dispatcher), plus the
//! ambient CLI/test-harness shell built around it.

pub mod call_dispatcher;
pub mod context;
pub mod delta;
pub mod error;
pub mod frame;
pub mod instructions;
pub mod jump_table;
pub mod jumpdest;
pub mod memory;
pub mod opcodes;
pub mod result;
pub mod stack;
pub mod word;
pub mod world_state;

pub use call_dispatcher::execute;
pub use context::{BlockHeader, Context, LogEntry, RunState};
pub use error::EvmError;
pub use result::ExecutionResult;
pub use word::Word;
pub use world_state::{AccountState, WorldState};
