//! Fixture harness shared by the integration tests.
//!
//! A fixture is a small JSON document describing one bytecode run: the code
//! itself, an optional transaction override, an optional pre-populated
//! world state (for CALL/DELEGATECALL/STATICCALL scenarios), and the
//! expected outcome. This mirrors the shape of `--code`/`--tx`/`--json` on
//! the CLI closely enough that a fixture doubles as a worked CLI example.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use ethereum_types::Address;
use mini_evm::{BlockHeader, Context, Word, WorldState};
use serde::Deserialize;

fn decode_hex(input: &str) -> Vec<u8> {
    let trimmed = input.strip_prefix("0x").unwrap_or(input);
    hex::decode(trimmed).expect("fixture hex field must be valid hex")
}

fn parse_address(input: &str) -> Address {
    Address::from_slice(&decode_hex(input))
}

fn parse_word(input: &str) -> Word {
    if let Some(hex_part) = input.strip_prefix("0x") {
        Word::from_big_endian(&hex::decode(hex_part).expect("fixture hex word"))
    } else {
        Word::from_dec_str(input).expect("fixture decimal word")
    }
}

#[derive(Deserialize)]
pub struct Fixture {
    #[allow(dead_code)]
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub tx: TxField,
    #[serde(default)]
    pub state: HashMap<String, PreAccount>,
    pub expect: Expect,
}

#[derive(Deserialize, Default)]
pub struct TxField {
    pub from: Option<String>,
    pub to: Option<String>,
    pub value: Option<String>,
    pub data: Option<String>,
    pub gas_left: Option<u64>,
}

#[derive(Deserialize)]
pub struct PreAccount {
    pub balance: Option<String>,
    pub code: Option<String>,
    #[serde(default)]
    pub storage: HashMap<String, String>,
}

#[derive(Deserialize)]
pub struct Expect {
    pub success: bool,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(rename = "return")]
    pub return_data: Option<String>,
    pub logs: Option<usize>,
}

/// Load `tests/data/<name>.json`, run it, and assert the outcome it
/// declares.
pub fn run_fixture(name: &str) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(format!("{name}.json"));
    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("reading fixture {}: {e}", path.display()));
    let fixture: Fixture = serde_json::from_str(&raw)
        .unwrap_or_else(|e| panic!("parsing fixture {}: {e}", path.display()));

    let mut state = WorldState::new();
    for (addr, account) in &fixture.state {
        let address = parse_address(addr);
        if let Some(code) = &account.code {
            state.set_code(address, decode_hex(code));
        }
        if let Some(balance) = &account.balance {
            state.set_balance(address, parse_word(balance));
        }
        for (key, value) in &account.storage {
            state.set_storage(address, parse_word(key), parse_word(value));
        }
    }

    let to = fixture.tx.to.as_deref().map(parse_address).unwrap_or_default();
    let from = fixture.tx.from.as_deref().map(parse_address).unwrap_or_default();
    let value = fixture.tx.value.as_deref().map(parse_word).unwrap_or_default();
    let call_data = fixture.tx.data.as_deref().map(decode_hex).unwrap_or_default();
    let gas_left = fixture.tx.gas_left.unwrap_or(10_000_000);

    let ctx = Context::top_level(
        to,
        from,
        from,
        Word::zero(),
        gas_left,
        value,
        call_data.into(),
        decode_hex(&fixture.code).into(),
        BlockHeader::default(),
    );

    let result = mini_evm::execute(ctx, state);

    assert_eq!(
        result.success, fixture.expect.success,
        "fixture {name}: success mismatch (error: {:?})",
        result.error
    );
    if !fixture.expect.stack.is_empty() {
        let expected: Vec<Word> = fixture.expect.stack.iter().map(|s| parse_word(s)).collect();
        assert_eq!(result.stack, expected, "fixture {name}: stack mismatch");
    }
    if let Some(expected_return) = &fixture.expect.return_data {
        assert_eq!(
            result.returndata.as_ref(),
            decode_hex(expected_return).as_slice(),
            "fixture {name}: returndata mismatch"
        );
    }
    if let Some(expected_logs) = fixture.expect.logs {
        assert_eq!(result.logs.len(), expected_logs, "fixture {name}: log count mismatch");
    }
}
