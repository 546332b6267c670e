//! End-to-end CLI tests: spawn the `mini-evm` binary the way a user or CI
//! job would, and parse its `--json` output.

use std::process::Command;

use hex_literal::hex;

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_mini-evm"))
        .args(args)
        .output()
        .expect("spawning mini-evm")
}

#[test]
fn json_output_reports_success_and_final_stack() {
    // PUSH1 1, PUSH1 2, ADD
    let output = run(&["--code", "6001600201", "--json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid json");
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["stack"][0], "0x3");
}

#[test]
fn json_output_reports_invalid_opcode_failure() {
    let output = run(&["--code", "FE", "--json"]);
    assert!(output.status.success(), "the process itself exits 0 even on VM failure");

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid json");
    assert_eq!(parsed["success"], false);
    assert_eq!(parsed["gas_left"], 0);
    assert!(parsed["error"].as_str().unwrap().contains("invalid opcode"));
}

#[test]
fn code_file_and_tx_override_are_read_from_disk() {
    let dir = std::env::temp_dir().join(format!("mini-evm-cli-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("scratch dir");
    let code_path = dir.join("code.hex");
    let tx_path = dir.join("tx.json");
    // CALLVALUE, PUSH1 0, MSTORE, PUSH1 32, PUSH1 0, RETURN
    std::fs::write(&code_path, "3460005260206000F3").expect("write code file");
    std::fs::write(&tx_path, r#"{"value": "0x2a"}"#).expect("write tx file");

    let output = run(&[
        "--code-file",
        code_path.to_str().unwrap(),
        "--tx-file",
        tx_path.to_str().unwrap(),
        "--json",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid json");
    assert_eq!(parsed["success"], true);
    let expected = format!("0x{}", hex::encode(hex!("000000000000000000000000000000000000000000000000000000000000002a")));
    assert_eq!(parsed["returndata"], expected);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_code_argument_is_a_cli_usage_error() {
    let output = run(&["--json"]);
    assert!(!output.status.success());
}
