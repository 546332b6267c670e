//! The per-frame execution environment (`Context`, block header, log
//! entries) and the per-frame mutable machine state (`RunState`).

use bytes::Bytes;
use ethereum_types::Address;

use crate::memory::Memory;
use crate::stack::Stack;
use crate::word::Word;

/// Block header fields an opcode can project onto the stack (COINBASE,
/// TIMESTAMP, NUMBER, ...).
#[derive(Debug, Clone, Default)]
pub struct BlockHeader {
    pub basefee: Word,
    pub coinbase: Address,
    pub timestamp: Word,
    pub number: Word,
    pub difficulty: Word,
    pub gas_limit: Word,
    pub chain_id: Word,
}

/// One (address, data, topics) log entry, in emission order.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub address: Address,
    pub data: Bytes,
    pub topics: Vec<Word>,
}

/// The immutable-within-a-frame execution environment. A CALL/DELEGATECALL/
/// STATICCALL builds a derived `Context` for its sub-frame; the `state`
/// map is the one part that is shared, by reference, across every frame of
/// a top-level call.
#[derive(Debug, Clone)]
pub struct Context {
    pub address: Address,
    pub caller: Address,
    pub origin: Address,
    pub gas_price: Word,
    pub gas_left: u64,
    pub is_static: bool,
    pub call_value: Word,
    pub call_data: Bytes,
    pub bytecode: Bytes,
    pub block: BlockHeader,
    pub depth: u32,
}

impl Context {
    /// Build the top-level context for a single CLI/test-harness
    /// invocation.
    #[allow(clippy::too_many_arguments)]
    pub fn top_level(
        address: Address,
        caller: Address,
        origin: Address,
        gas_price: Word,
        gas_left: u64,
        call_value: Word,
        call_data: Bytes,
        bytecode: Bytes,
        block: BlockHeader,
    ) -> Self {
        Self {
            address,
            caller,
            origin,
            gas_price,
            gas_left,
            is_static: false,
            call_value,
            call_data,
            bytecode,
            block,
            depth: 0,
        }
    }
}

/// The mutable-per-frame machine state: program counter, stack, memory,
/// returndata, and the logs emitted so far in this frame.
pub struct RunState {
    pub pc: usize,
    pub stack: Stack,
    pub memory: Memory,
    pub returndata: Bytes,
    pub logs: Vec<LogEntry>,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            pc: 0,
            stack: Stack::new(),
            memory: Memory::new(),
            returndata: Bytes::new(),
            logs: Vec::new(),
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
