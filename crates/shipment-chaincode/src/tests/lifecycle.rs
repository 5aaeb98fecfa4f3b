//! Init, registration, lookup and dispatch.

use shipment_ledger::{Ledger, MemoryLedger, SqliteLedger};

use super::harness::{
    invoke, ledger_with_s1, payload_json, stored, write_count, S1_REGISTRATION,
};
use crate::{dispatch, ChaincodeError, Method, ShipmentChaincode, NOT_AVAILABLE, SHIPMENT_DOC_TYPE};

#[test]
fn register_normalizes_missing_readings() {
    let ledger = ledger_with_s1();
    let shipment = stored(&ledger, "S1");

    assert_eq!(shipment.doc_type, SHIPMENT_DOC_TYPE);
    assert_eq!(shipment.shipment_id, "S1");
    assert_eq!(shipment.buyer, "Buyer Co");
    assert_eq!(shipment.seller, "Seller Co");
    assert_eq!(shipment.current_location, "Warehouse 7");
    assert_eq!(shipment.destination_city, "Berlin");
    assert_eq!(shipment.origin_city, "Lisbon");
    assert_eq!(shipment.condition, "ok");
    assert_eq!(shipment.temperature, NOT_AVAILABLE);
    assert_eq!(shipment.humidity, NOT_AVAILABLE);
    assert_eq!(shipment.luminosity, NOT_AVAILABLE);
}

#[test]
fn register_keeps_real_readings() {
    let ledger = MemoryLedger::new();
    let mut args = S1_REGISTRATION;
    args[7] = "4C";
    args[8] = "55%";
    args[9] = "NULL";
    assert!(invoke(&ledger, "registerShipment", &args).is_success());

    let shipment = stored(&ledger, "S1");
    assert_eq!(shipment.temperature, "4C");
    assert_eq!(shipment.humidity, "55%");
    // Only the exact lowercase placeholders are normalized.
    assert_eq!(shipment.luminosity, "NULL");
}

#[test]
fn register_twice_is_rejected_without_write() {
    let ledger = ledger_with_s1();
    let before = ledger.get_state("S1").unwrap();

    let mut args = S1_REGISTRATION;
    args[1] = "Someone Else";
    let response = invoke(&ledger, "registerShipment", &args);

    assert!(!response.is_success());
    assert_eq!(response.message, "This shipment already exists: S1");
    assert_eq!(ledger.get_state("S1").unwrap(), before);
    assert_eq!(write_count(&ledger, "S1"), 1);
}

#[test]
fn register_requires_ten_arguments() {
    let ledger = MemoryLedger::new();
    let response = invoke(&ledger, "registerShipment", &S1_REGISTRATION[..9]);

    assert!(!response.is_success());
    assert_eq!(
        response.message,
        "Incorrect number of arguments. Expecting 10, got 9"
    );
    assert_eq!(write_count(&ledger, "S1"), 0);
}

#[test]
fn register_rejects_empty_id() {
    let ledger = MemoryLedger::new();
    let mut args = S1_REGISTRATION;
    args[0] = "";
    let response = invoke(&ledger, "registerShipment", &args);
    assert!(!response.is_success());
    assert!(response.message.contains("must not be empty"));
}

#[test]
fn get_details_returns_stored_bytes_verbatim() {
    let ledger = ledger_with_s1();
    let response = invoke(&ledger, "getShipmentDetails", &["S1"]);

    assert!(response.is_success());
    assert_eq!(
        Some(response.payload_bytes().to_vec()),
        ledger.get_state("S1").unwrap()
    );
    let json = payload_json(&response);
    assert_eq!(json["docType"], "Shipment");
    assert_eq!(json["ShipmentCondition"], "ok");
}

#[test]
fn get_details_of_missing_shipment_is_json_error() {
    let ledger = MemoryLedger::new();
    let response = invoke(&ledger, "getShipmentDetails", &["S9"]);

    assert!(!response.is_success());
    let body: serde_json::Value = serde_json::from_str(&response.message).unwrap();
    assert_eq!(body["Error"], "shipment does not exist: S9");
}

#[test]
fn get_details_argument_count_is_plain_text() {
    let ledger = ledger_with_s1();
    let response = invoke(&ledger, "getShipmentDetails", &["S1", "S2"]);
    assert_eq!(
        response.message,
        "Incorrect number of arguments. Expecting shipment Id to query, got 2"
    );
}

#[test]
fn unknown_operation_is_rejected() {
    let ledger = ledger_with_s1();
    let response = invoke(&ledger, "deleteShipment", &["S1"]);

    assert!(!response.is_success());
    assert_eq!(
        response.message,
        "Received unknown function invocation: deleteShipment"
    );
    assert_eq!(write_count(&ledger, "S1"), 1);
}

#[test]
fn operation_names_are_case_sensitive() {
    let ledger = ledger_with_s1();
    assert!(!invoke(&ledger, "RegisterShipment", &S1_REGISTRATION).is_success());
    assert!(!invoke(&ledger, "getshipmentdetails", &["S1"]).is_success());
}

#[test]
fn dispatch_runs_typed_methods() {
    let ledger = ledger_with_s1();
    let payload = dispatch(&ledger, Method::GetShipmentDetails, &["S1"]).unwrap();
    assert!(payload.is_some());

    let payload = dispatch(&ledger, Method::UpdateLuminosity, &["S1", "300lx"]).unwrap();
    assert!(payload.is_none());

    let err = dispatch(&ledger, Method::QueryHistory, &[]).unwrap_err();
    assert!(matches!(err, ChaincodeError::MalformedArguments(_)));
}

#[test]
fn read_only_operations_never_write() {
    let ledger = ledger_with_s1();
    for method in Method::ALL.into_iter().filter(Method::is_read_only) {
        assert!(invoke(&ledger, method.as_str(), &["S1"]).is_success());
    }
    assert_eq!(write_count(&ledger, "S1"), 1);
}

#[test]
fn init_without_arguments_is_a_noop() {
    let ledger = MemoryLedger::new();
    let response = ShipmentChaincode::new().init::<_, &str>(&ledger, &[]);
    assert!(response.is_success());
    assert!(!ledger.has_state("S1").unwrap());
}

#[test]
fn init_with_registration_arguments_seeds_and_overwrites() {
    let ledger = ledger_with_s1();
    let mut args = S1_REGISTRATION;
    args[6] = "damaged";

    let response = ShipmentChaincode::new().init(&ledger, &args);

    assert!(response.is_success(), "{}", response.message);
    assert_eq!(write_count(&ledger, "S1"), 2);
    let shipment = stored(&ledger, "S1");
    assert_eq!(shipment.condition, "damaged");
    assert_eq!(shipment.temperature, NOT_AVAILABLE);
}

#[test]
fn init_rejects_other_argument_counts() {
    let ledger = MemoryLedger::new();
    let response = ShipmentChaincode::new().init(&ledger, &["S1", "B", "S"]);
    assert!(!response.is_success());
    assert_eq!(
        response.message,
        "Incorrect number of arguments. Expecting 0 or 10, got 3"
    );
}

#[test]
fn owned_string_arguments_are_accepted() {
    let ledger = MemoryLedger::new();
    let args: Vec<String> = S1_REGISTRATION.iter().map(|s| s.to_string()).collect();
    let response = ShipmentChaincode::new().invoke(&ledger, "registerShipment", &args);
    assert!(response.is_success());
}

#[test]
fn sqlite_backend_runs_the_same_operations() {
    let ledger = SqliteLedger::in_memory().unwrap();
    assert!(invoke(&ledger, "registerShipment", &S1_REGISTRATION).is_success());
    assert!(invoke(&ledger, "updateShipmentStatus", &["S1", "delivered"]).is_success());

    assert_eq!(stored(&ledger, "S1").condition, "delivered");
    let history = payload_json(&invoke(&ledger, "queryHistory", &["S1"]));
    assert_eq!(history.as_array().map(Vec::len), Some(2));
}
