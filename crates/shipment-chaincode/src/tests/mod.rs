//! Behavioural tests for the shipment chaincode.
//!
//! - `harness.rs`   - shared fixtures and a fault-injecting ledger
//! - `lifecycle.rs` - init, registration, lookup and dispatch
//! - `updates.rs`   - the single-field update operations
//! - `history.rs`   - the JSON audit trail
//! - `failures.rs`  - ledger failures and iterator release

mod lifecycle;

use shipment_ledger::MemoryLedger;

use harness::{invoke, payload_json, S1_REGISTRATION};

/// Basic workflow: register, update, read back, audit.
#[test]
fn basic_workflow() {
    let ledger = MemoryLedger::new();

    let registered = invoke(&ledger, "registerShipment", &S1_REGISTRATION);
    assert!(registered.is_success(), "{}", registered.message);
    assert!(registered.payload_bytes().is_empty());

    let updated = invoke(&ledger, "updateTemperature", &["S1", "5C"]);
    assert!(updated.is_success(), "{}", updated.message);

    let details = payload_json(&invoke(&ledger, "getShipmentDetails", &["S1"]));
    assert_eq!(details["Temperature"], "5C");
    assert_eq!(details["Humidity"], "NA");

    let history = payload_json(&invoke(&ledger, "queryHistory", &["S1"]));
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["Value"]["Temperature"], "NA");
    assert_eq!(entries[1]["Value"]["Temperature"], "5C");
    assert!(entries.iter().all(|e| e["IsDelete"] == "false"));
}
