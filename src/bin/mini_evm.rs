//! CLI entry point: parse one invocation's worth of arguments, build a
//! `Context`, run the interpreter, and report the result.
//!
//! This binary is the only place in the crate that installs a global
//! `tracing` subscriber or writes to stdout/stderr — library code never
//! does either, so embedding the interpreter elsewhere never fights over
//! process-wide logging state.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use clap::{ArgGroup, Parser};
use colored::Colorize;
use ethereum_types::Address;
use mini_evm::{BlockHeader, Context as EvmContext, LogEntry, Word, WorldState};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// A single interpreter invocation described entirely by argv.
#[derive(Parser, Debug)]
#[command(name = "mini-evm")]
#[command(about = "Interpret a single piece of EVM bytecode", long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["code", "code_file"])))]
#[command(group(ArgGroup::new("tx_source").args(["tx", "tx_file"])))]
struct Cli {
    /// Hex-encoded bytecode, with or without a 0x prefix.
    #[arg(short, long)]
    code: Option<String>,

    /// Path to a file containing hex-encoded bytecode.
    #[arg(long)]
    code_file: Option<PathBuf>,

    /// Trace verbosity: 0 silent, 1 opcode/PC, 2 adds stack/memory/gas,
    /// 3 adds calldata/logs/returndata.
    #[arg(short, long, default_value_t = 1)]
    verbose: u8,

    /// Structured transaction/block override, as a JSON string.
    #[arg(long)]
    tx: Option<String>,

    /// Same as --tx, read from a file.
    #[arg(long)]
    tx_file: Option<PathBuf>,

    /// Print the final Result as a single JSON document on stdout.
    #[arg(long)]
    json: bool,
}

/// The `--tx`/`--tx-file` override bundle. Every field is optional;
/// anything left unset keeps the interpreter's zeroed default.
#[derive(Debug, Default, Deserialize)]
struct TxOverride {
    from: Option<String>,
    to: Option<String>,
    value: Option<String>,
    #[serde(alias = "gas")]
    gas_left: Option<u64>,
    origin: Option<String>,
    gasprice: Option<String>,
    data: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
struct CliLog {
    address: String,
    topics: Vec<String>,
    data: String,
}

impl From<&LogEntry> for CliLog {
    fn from(log: &LogEntry) -> Self {
        Self {
            address: format!("0x{:x}", log.address),
            topics: log.topics.iter().map(|t| format!("0x{:x}", t)).collect(),
            data: format!("0x{}", hex::encode(&log.data)),
        }
    }
}

/// The wire shape of `--json`'s output.
#[derive(Debug, Serialize)]
struct CliResult {
    success: bool,
    stack: Vec<String>,
    memory: String,
    gas_left: u64,
    returndata: String,
    logs: Vec<CliLog>,
    error: Option<String>,
}

fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.strip_prefix("0x").unwrap_or(input);
    hex::decode(trimmed).context("invalid hex string")
}

fn parse_address(input: &str) -> Result<Address> {
    let bytes = decode_hex(input)?;
    if bytes.len() != 20 {
        bail!("address must be exactly 20 bytes, got {}", bytes.len());
    }
    Ok(Address::from_slice(&bytes))
}

fn parse_word(input: &str) -> Result<Word> {
    if let Some(hex_part) = input.strip_prefix("0x") {
        Ok(Word::from_big_endian(&hex::decode(hex_part).context("invalid hex word")?))
    } else {
        Word::from_dec_str(input).context("invalid decimal word")
    }
}

fn build_verbosity_filter(verbosity: u8) -> EnvFilter {
    let directives = match verbosity {
        0 => "off",
        1 => "mini_evm::trace::step=debug",
        2 => "mini_evm::trace::step=debug,mini_evm::trace::state=trace",
        _ => "mini_evm::trace::step=debug,mini_evm::trace::state=trace,mini_evm::trace::detail=trace",
    };
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("off"))
}

fn load_bytecode(cli: &Cli) -> Result<Vec<u8>> {
    match (&cli.code, &cli.code_file) {
        (Some(code), None) => decode_hex(code),
        (None, Some(path)) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading bytecode file {}", path.display()))?;
            decode_hex(contents.trim())
        }
        _ => bail!("exactly one of --code or --code-file must be given"),
    }
}

fn load_tx_override(cli: &Cli) -> Result<TxOverride> {
    let raw = match (&cli.tx, &cli.tx_file) {
        (Some(json), None) => json.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("reading tx file {}", path.display()))?,
        (None, None) => return Ok(TxOverride::default()),
        (Some(_), Some(_)) => bail!("--tx and --tx-file are mutually exclusive"),
    };
    serde_json::from_str(&raw).context("invalid --tx JSON")
}

fn build_context(bytecode: Vec<u8>, tx: TxOverride) -> Result<EvmContext> {
    let to = tx.to.as_deref().map(parse_address).transpose()?.unwrap_or_default();
    let from = tx.from.as_deref().map(parse_address).transpose()?.unwrap_or_default();
    let origin = tx
        .origin
        .as_deref()
        .map(parse_address)
        .transpose()?
        .unwrap_or(from);
    let value = tx.value.as_deref().map(parse_word).transpose()?.unwrap_or_default();
    let gas_price = tx
        .gasprice
        .as_deref()
        .map(parse_word)
        .transpose()?
        .unwrap_or_default();
    let call_data = tx
        .data
        .as_deref()
        .map(decode_hex)
        .transpose()?
        .unwrap_or_default();
    let gas_left = tx.gas_left.unwrap_or(10_000_000);

    Ok(EvmContext::top_level(
        to,
        from,
        origin,
        gas_price,
        gas_left,
        value,
        call_data.into(),
        bytecode.into(),
        BlockHeader::default(),
    ))
}

fn print_human_summary(result: &mini_evm::ExecutionResult) {
    if result.success {
        eprintln!("{}", "execution succeeded".green().bold());
    } else {
        let reason = result
            .error
            .as_ref()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        eprintln!("{} {}", "execution failed:".red().bold(), reason.red());
    }
    eprintln!("gas left: {}", result.gas_left);
    eprintln!("stack: {:?}", result.stack);
    if !result.returndata.is_empty() {
        eprintln!("returndata: 0x{}", hex::encode(&result.returndata));
    }
    for log in &result.logs {
        eprintln!("log: {:?}", CliLog::from(log));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(build_verbosity_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let bytecode = load_bytecode(&cli)?;
    let tx = load_tx_override(&cli)?;
    let ctx = build_context(bytecode, tx)?;

    let result = mini_evm::execute(ctx, WorldState::new());

    if cli.json {
        let output = CliResult {
            success: result.success,
            stack: result.stack.iter().map(|w| format!("0x{:x}", w)).collect(),
            memory: format!("0x{}", hex::encode(&result.memory)),
            gas_left: result.gas_left,
            returndata: format!("0x{}", hex::encode(&result.returndata)),
            logs: result.logs.iter().map(CliLog::from).collect(),
            error: result.error.as_ref().map(|e| e.to_string()),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print_human_summary(&result);
    }

    Ok(())
}
