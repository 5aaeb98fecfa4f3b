//! # Shipment Chaincode
//!
//! Record-management logic for a single mutable record type, the shipment,
//! kept in a versioned ledger that retains every write per key.
//!
//! ## Pipeline
//!
//! ```text
//! invoke(name, args)
//!   → Method::from_str          (dispatcher, closed set of operations)
//!   → manager::* | history::*   (handler validates its own args)
//!   → Ledger                    (get_state / put_state / history_for_key)
//!   → Response                  (success + payload, or failure message)
//! ```
//!
//! ## Operations
//!
//! | Wire name | Args | Payload |
//! |-----------|------|---------|
//! | `registerShipment` | 10 | - |
//! | `getShipmentDetails` | 1 | stored record |
//! | `updateTemparature` / `updateTemperature` | 2+ | - |
//! | `updateHumidity` | 2+ | - |
//! | `updateLuminosity` | 2+ | - |
//! | `updateCurrentLocation` | 2+ | - |
//! | `updateDestinationCity` | 2+ | - |
//! | `updateOriginCity` | 2+ | - |
//! | `updateShipmentStatus` | 2+ | - |
//! | `queryHistory` | 1 | JSON audit trail |
//!
//! ## Example
//!
//! ```rust
//! use shipment_chaincode::ShipmentChaincode;
//! use shipment_ledger::MemoryLedger;
//!
//! let ledger = MemoryLedger::new();
//! let cc = ShipmentChaincode::new();
//!
//! let response = cc.invoke(
//!     &ledger,
//!     "registerShipment",
//!     &["S1", "B", "S", "LocA", "CityB", "CityA", "ok", "undefined", "", "null"],
//! );
//! assert!(response.is_success());
//!
//! let details = cc.invoke(&ledger, "getShipmentDetails", &["S1"]);
//! assert!(String::from_utf8_lossy(details.payload_bytes()).contains(r#""Temperature":"NA""#));
//! ```

mod chaincode;
mod error;
pub mod history;
pub mod manager;
mod method;
mod response;
pub mod shipment;

#[cfg(test)]
mod tests;

pub use chaincode::{dispatch, ShipmentChaincode};
pub use error::{ChaincodeError, ChaincodeResult};
pub use method::Method;
pub use response::{status, Response};
pub use shipment::{Shipment, ShipmentField, NOT_AVAILABLE, SHIPMENT_DOC_TYPE};
