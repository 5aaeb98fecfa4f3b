//! Record manager: registration, lookup and single-field updates.
//!
//! Every handler validates its own arguments, reads straight from the ledger
//! and writes whole records back. Nothing is cached between calls, and a
//! failure before the write leaves the stored record untouched.

use shipment_ledger::Ledger;
use tracing::{debug, info};

use crate::error::{ChaincodeError, ChaincodeResult};
use crate::shipment::{Shipment, ShipmentField};

/// Creates a shipment; fails if the id already holds a value.
pub fn register<L: Ledger + ?Sized>(ledger: &L, args: &[&str]) -> ChaincodeResult<()> {
    let shipment = Shipment::from_registration_args(args)?;
    let id = shipment.shipment_id.as_str();
    debug!(shipment_id = id, "registering shipment");

    let exists = ledger
        .has_state(id)
        .map_err(|e| ChaincodeError::storage("Failed to register shipment", e))?;
    if exists {
        return Err(ChaincodeError::AlreadyExists(id.to_string()));
    }

    let bytes = shipment.encode()?;
    ledger
        .put_state(id, &bytes)
        .map_err(|e| ChaincodeError::storage("Failed to save shipment", e))?;

    info!(shipment_id = id, "shipment registered");
    Ok(())
}

/// Writes a shipment unconditionally; used to seed state at instantiation.
pub fn seed<L: Ledger + ?Sized>(ledger: &L, args: &[&str]) -> ChaincodeResult<()> {
    let shipment = Shipment::from_registration_args(args)?;
    let bytes = shipment.encode()?;
    ledger
        .put_state(&shipment.shipment_id, &bytes)
        .map_err(|e| ChaincodeError::storage("Failed to seed shipment", e))?;

    info!(shipment_id = %shipment.shipment_id, "shipment seeded");
    Ok(())
}

/// Returns the stored record bytes exactly as the ledger holds them.
pub fn get_details<L: Ledger + ?Sized>(ledger: &L, args: &[&str]) -> ChaincodeResult<Vec<u8>> {
    let [id] = args else {
        return Err(ChaincodeError::argument_count("shipment Id to query", args.len()));
    };
    let id = require_id(id)?;

    let bytes = ledger
        .get_state(id)
        .map_err(|e| ChaincodeError::storage(format!("Failed to get state for {id}"), e))?;
    bytes.ok_or_else(|| ChaincodeError::NotFound(id.to_string()))
}

/// Read-modify-write of one field. Arguments: id, new value; extras ignored.
///
/// The new value is stored verbatim, with no placeholder normalization.
pub fn update_field<L: Ledger + ?Sized>(
    ledger: &L,
    args: &[&str],
    field: ShipmentField,
) -> ChaincodeResult<()> {
    let [id, value, ..] = args else {
        return Err(ChaincodeError::argument_count("2", args.len()));
    };
    let id = require_id(id)?;
    debug!(shipment_id = id, %field, value, "updating shipment field");

    let stored = ledger
        .get_state(id)
        .map_err(|e| ChaincodeError::storage("Failed to get shipment details", e))?
        .ok_or_else(|| ChaincodeError::NotFound(id.to_string()))?;

    let mut shipment = Shipment::decode(&stored)?;
    *field.slot(&mut shipment) = value.to_string();

    let bytes = shipment.encode()?;
    ledger
        .put_state(id, &bytes)
        .map_err(|e| ChaincodeError::storage("Failed to save shipment", e))?;

    info!(shipment_id = id, %field, "shipment field updated");
    Ok(())
}

pub(crate) fn require_id<'a>(id: &'a str) -> ChaincodeResult<&'a str> {
    if id.is_empty() {
        return Err(ChaincodeError::MalformedArguments(
            "shipment id must not be empty".to_string(),
        ));
    }
    Ok(id)
}
