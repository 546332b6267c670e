//! JSON fixture-driven suite: CALL/DELEGATECALL/STATICCALL nesting,
//! static-context propagation, and value transfer, expressed as fixture
//! files under `tests/data/` rather than raw hex inlined in test bodies.

mod common;

#[test]
fn staticcall_blocks_sstore() {
    common::run_fixture("staticcall_blocks_sstore");
}

#[test]
fn delegatecall_preserves_caller_storage() {
    common::run_fixture("delegatecall_preserves_caller_storage");
}

#[test]
fn call_forwards_returndata_and_value() {
    common::run_fixture("call_forwards_returndata_and_value");
}
