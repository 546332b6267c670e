//! The dense opcode -> handler table.
//!
//! Built once behind a `once_cell::sync::Lazy`. This is a plain 256-entry
//! array indexed directly by the opcode byte — there is no hashing and no
//! "opcode not present" case to special-case, since every one of the 256
//! slots is populated (with `invalid` where an opcode byte is unmapped).

use once_cell::sync::Lazy;

use crate::context::{Context, RunState};
use crate::delta::HandlerResult;
use crate::jumpdest::JumpDestinations;
use crate::opcodes;
use crate::world_state::WorldState;

use crate::instructions::{
    arithmetic, bitwise, comparison, control_flow, environment, log_ops, memory_ops, stack_ops,
    storage_ops, system,
};

/// Everything an opcode handler needs. `state` is the one field handlers
/// mutate directly (see `delta` module docs for why).
pub struct HandlerArgs<'a> {
    pub rs: &'a RunState,
    pub ctx: &'a Context,
    pub state: &'a mut WorldState,
    pub jumpdests: &'a JumpDestinations,
}

pub type Handler = fn(HandlerArgs) -> HandlerResult;

/// The PUSH/DUP/SWAP/LOG families are not written out 32/16/16/5 times;
/// each is a single parameterized handler keyed on its one varying field.
pub enum OpKind {
    Simple(Handler),
    Push(u8),
    Dup(usize),
    Swap(usize),
    Log(usize),
}

pub struct OpEntry {
    pub mnemonic: &'static str,
    pub min_gas: u64,
    pub kind: OpKind,
}

impl OpEntry {
    pub fn dispatch(&self, args: HandlerArgs) -> HandlerResult {
        match &self.kind {
            OpKind::Simple(handler) => handler(args),
            OpKind::Push(len) => stack_ops::push_n(args, *len),
            OpKind::Dup(n) => stack_ops::dup_n(args, *n),
            OpKind::Swap(n) => stack_ops::swap_n(args, *n),
            OpKind::Log(n) => log_ops::log_n(args, *n),
        }
    }
}

fn simple(mnemonic: &'static str, min_gas: u64, handler: Handler) -> OpEntry {
    OpEntry {
        mnemonic,
        min_gas,
        kind: OpKind::Simple(handler),
    }
}

fn invalid() -> OpEntry {
    OpEntry {
        mnemonic: "INVALID",
        min_gas: 0,
        kind: OpKind::Simple(control_flow::op_invalid),
    }
}

pub static JUMP_TABLE: Lazy<[OpEntry; 256]> = Lazy::new(build_table);

fn build_table() -> [OpEntry; 256] {
    let mut table: Vec<OpEntry> = (0..256).map(|_| invalid()).collect();

    table[opcodes::STOP as usize] = simple("STOP", 0, control_flow::op_stop);
    table[opcodes::ADD as usize] = simple("ADD", 3, arithmetic::op_add);
    table[opcodes::MUL as usize] = simple("MUL", 5, arithmetic::op_mul);
    table[opcodes::SUB as usize] = simple("SUB", 3, arithmetic::op_sub);
    table[opcodes::DIV as usize] = simple("DIV", 5, arithmetic::op_div);
    table[opcodes::SDIV as usize] = simple("SDIV", 5, arithmetic::op_sdiv);
    table[opcodes::MOD as usize] = simple("MOD", 5, arithmetic::op_mod);
    table[opcodes::SMOD as usize] = simple("SMOD", 5, arithmetic::op_smod);
    table[opcodes::ADDMOD as usize] = simple("ADDMOD", 8, arithmetic::op_addmod);
    table[opcodes::MULMOD as usize] = simple("MULMOD", 8, arithmetic::op_mulmod);
    table[opcodes::EXP as usize] = simple("EXP", 10, arithmetic::op_exp);
    table[opcodes::SIGNEXTEND as usize] = simple("SIGNEXTEND", 5, arithmetic::op_signextend);

    table[opcodes::LT as usize] = simple("LT", 3, comparison::op_lt);
    table[opcodes::GT as usize] = simple("GT", 3, comparison::op_gt);
    table[opcodes::SLT as usize] = simple("SLT", 3, comparison::op_slt);
    table[opcodes::SGT as usize] = simple("SGT", 3, comparison::op_sgt);
    table[opcodes::EQ as usize] = simple("EQ", 3, comparison::op_eq);
    table[opcodes::ISZERO as usize] = simple("ISZERO", 3, comparison::op_iszero);
    table[opcodes::AND as usize] = simple("AND", 3, bitwise::op_and);
    table[opcodes::OR as usize] = simple("OR", 3, bitwise::op_or);
    table[opcodes::XOR as usize] = simple("XOR", 3, bitwise::op_xor);
    table[opcodes::NOT as usize] = simple("NOT", 3, bitwise::op_not);
    table[opcodes::BYTE as usize] = simple("BYTE", 3, bitwise::op_byte);
    table[opcodes::SHL as usize] = simple("SHL", 3, bitwise::op_shl);
    table[opcodes::SHR as usize] = simple("SHR", 3, bitwise::op_shr);
    table[opcodes::SAR as usize] = simple("SAR", 3, bitwise::op_sar);

    table[opcodes::SHA3 as usize] = simple("SHA3", 30, system::op_sha3);

    table[opcodes::ADDRESS as usize] = simple("ADDRESS", 2, environment::op_address);
    table[opcodes::BALANCE as usize] = simple("BALANCE", 100, environment::op_balance);
    table[opcodes::ORIGIN as usize] = simple("ORIGIN", 2, environment::op_origin);
    table[opcodes::CALLER as usize] = simple("CALLER", 2, environment::op_caller);
    table[opcodes::CALLVALUE as usize] = simple("CALLVALUE", 2, environment::op_callvalue);
    table[opcodes::CALLDATALOAD as usize] =
        simple("CALLDATALOAD", 3, environment::op_calldataload);
    table[opcodes::CALLDATASIZE as usize] =
        simple("CALLDATASIZE", 2, environment::op_calldatasize);
    table[opcodes::CALLDATACOPY as usize] =
        simple("CALLDATACOPY", 3, environment::op_calldatacopy);
    table[opcodes::CODESIZE as usize] = simple("CODESIZE", 2, environment::op_codesize);
    table[opcodes::CODECOPY as usize] = simple("CODECOPY", 3, environment::op_codecopy);
    table[opcodes::GASPRICE as usize] = simple("GASPRICE", 2, environment::op_gasprice);
    table[opcodes::EXTCODESIZE as usize] = simple("EXTCODESIZE", 100, environment::op_extcodesize);
    table[opcodes::EXTCODECOPY as usize] = simple("EXTCODECOPY", 100, environment::op_extcodecopy);
    table[opcodes::RETURNDATASIZE as usize] =
        simple("RETURNDATASIZE", 2, environment::op_returndatasize);
    table[opcodes::RETURNDATACOPY as usize] =
        simple("RETURNDATACOPY", 3, environment::op_returndatacopy);
    table[opcodes::EXTCODEHASH as usize] = simple("EXTCODEHASH", 100, environment::op_extcodehash);
    table[opcodes::BLOCKHASH as usize] = simple("BLOCKHASH", 20, environment::op_blockhash);
    table[opcodes::COINBASE as usize] = simple("COINBASE", 2, environment::op_coinbase);
    table[opcodes::TIMESTAMP as usize] = simple("TIMESTAMP", 2, environment::op_timestamp);
    table[opcodes::NUMBER as usize] = simple("NUMBER", 2, environment::op_number);
    table[opcodes::DIFFICULTY as usize] = simple("DIFFICULTY", 2, environment::op_difficulty);
    table[opcodes::GASLIMIT as usize] = simple("GASLIMIT", 2, environment::op_gaslimit);
    table[opcodes::CHAINID as usize] = simple("CHAINID", 2, environment::op_chainid);
    table[opcodes::SELFBALANCE as usize] = simple("SELFBALANCE", 5, environment::op_selfbalance);
    table[opcodes::BASEFEE as usize] = simple("BASEFEE", 2, environment::op_basefee);

    table[opcodes::POP as usize] = simple("POP", 2, stack_ops::op_pop);
    table[opcodes::MLOAD as usize] = simple("MLOAD", 3, memory_ops::op_mload);
    table[opcodes::MSTORE as usize] = simple("MSTORE", 3, memory_ops::op_mstore);
    table[opcodes::MSTORE8 as usize] = simple("MSTORE8", 3, memory_ops::op_mstore8);
    table[opcodes::SLOAD as usize] = simple("SLOAD", 100, storage_ops::op_sload);
    table[opcodes::SSTORE as usize] = simple("SSTORE", 100, storage_ops::op_sstore);
    table[opcodes::JUMP as usize] = simple("JUMP", 8, control_flow::op_jump);
    table[opcodes::JUMPI as usize] = simple("JUMPI", 10, control_flow::op_jumpi);
    table[opcodes::PC as usize] = simple("PC", 2, control_flow::op_pc);
    table[opcodes::MSIZE as usize] = simple("MSIZE", 2, memory_ops::op_msize);
    table[opcodes::GAS as usize] = simple("GAS", 2, control_flow::op_gas);
    table[opcodes::JUMPDEST as usize] = simple("JUMPDEST", 1, control_flow::op_jumpdest);

    table[opcodes::PUSH0 as usize] = OpEntry {
        mnemonic: "PUSH0",
        min_gas: 2,
        kind: OpKind::Push(0),
    };
    for op in opcodes::PUSH1..=opcodes::PUSH32 {
        let len = opcodes::push_immediate_len(op);
        table[op as usize] = OpEntry {
            mnemonic: "PUSHn",
            min_gas: 3,
            kind: OpKind::Push(len),
        };
    }

    for op in opcodes::DUP1..=opcodes::DUP16 {
        let n = (op - opcodes::DUP1 + 1) as usize;
        table[op as usize] = OpEntry {
            mnemonic: "DUPn",
            min_gas: 3,
            kind: OpKind::Dup(n),
        };
    }

    for op in opcodes::SWAP1..=opcodes::SWAP16 {
        let n = (op - opcodes::SWAP1 + 1) as usize;
        table[op as usize] = OpEntry {
            mnemonic: "SWAPn",
            min_gas: 3,
            kind: OpKind::Swap(n),
        };
    }

    for op in opcodes::LOG0..=opcodes::LOG4 {
        let n = (op - opcodes::LOG0) as usize;
        table[op as usize] = OpEntry {
            mnemonic: "LOGn",
            min_gas: 375 * (n as u64 + 1),
            kind: OpKind::Log(n),
        };
    }

    table[opcodes::CALL as usize] = simple("CALL", 100, system::op_call);
    table[opcodes::RETURN as usize] = simple("RETURN", 0, system::op_return);
    table[opcodes::DELEGATECALL as usize] = simple("DELEGATECALL", 100, system::op_delegatecall);
    table[opcodes::STATICCALL as usize] = simple("STATICCALL", 100, system::op_staticcall);
    table[opcodes::REVERT as usize] = simple("REVERT", 0, system::op_revert);
    table[opcodes::INVALID as usize] = invalid();

    table
        .try_into()
        .unwrap_or_else(|_| unreachable!("table always has exactly 256 entries"))
}
