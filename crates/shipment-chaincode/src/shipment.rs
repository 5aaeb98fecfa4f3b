//! The shipment record and its ledger encoding.
//!
//! Records are stored as compact JSON objects whose field order follows the
//! struct declaration, so re-encoding a decoded record reproduces it.

use serde::{Deserialize, Serialize};

use crate::error::{ChaincodeError, ChaincodeResult};

/// Discriminator written into every record's `docType` field.
pub const SHIPMENT_DOC_TYPE: &str = "Shipment";

/// Sentinel stored for environmental readings that were not supplied.
pub const NOT_AVAILABLE: &str = "NA";

/// Inputs treated as "no reading" at registration time.
const PLACEHOLDER_READINGS: [&str; 3] = ["undefined", "", "null"];

/// Number of positional arguments taken by registration.
pub const REGISTRATION_ARG_COUNT: usize = 10;

/// A tracked shipment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Shipment {
    #[serde(rename = "docType")]
    pub doc_type: String,
    pub shipment_id: String,
    pub buyer: String,
    pub seller: String,
    pub current_location: String,
    pub destination_city: String,
    pub origin_city: String,
    #[serde(rename = "ShipmentCondition")]
    pub condition: String,
    pub temperature: String,
    pub humidity: String,
    pub luminosity: String,
}

impl Shipment {
    /// Builds a new record from registration arguments, in order:
    /// id, buyer, seller, current location, destination city, origin city,
    /// condition, temperature, humidity, luminosity.
    ///
    /// Placeholder environmental readings are replaced with [`NOT_AVAILABLE`].
    pub fn from_registration_args(args: &[&str]) -> ChaincodeResult<Self> {
        let [id, buyer, seller, current_location, destination_city, origin_city, condition, temperature, humidity, luminosity] =
            args
        else {
            return Err(ChaincodeError::argument_count(
                &REGISTRATION_ARG_COUNT.to_string(),
                args.len(),
            ));
        };
        if id.is_empty() {
            return Err(ChaincodeError::MalformedArguments(
                "shipment id must not be empty".to_string(),
            ));
        }

        Ok(Self {
            doc_type: SHIPMENT_DOC_TYPE.to_string(),
            shipment_id: id.to_string(),
            buyer: buyer.to_string(),
            seller: seller.to_string(),
            current_location: current_location.to_string(),
            destination_city: destination_city.to_string(),
            origin_city: origin_city.to_string(),
            condition: condition.to_string(),
            temperature: normalize_reading(temperature),
            humidity: normalize_reading(humidity),
            luminosity: normalize_reading(luminosity),
        })
    }

    /// Decodes a record from its stored bytes.
    pub fn decode(bytes: &[u8]) -> ChaincodeResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| ChaincodeError::Serialization(format!("Deserialization error: {e}")))
    }

    /// Encodes the record for storage.
    pub fn encode(&self) -> ChaincodeResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Maps placeholder readings to [`NOT_AVAILABLE`], passes anything else through.
pub fn normalize_reading(value: &str) -> String {
    if PLACEHOLDER_READINGS.contains(&value) {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

/// The fields a single-field update may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipmentField {
    Temperature,
    Humidity,
    Luminosity,
    CurrentLocation,
    DestinationCity,
    OriginCity,
    Condition,
}

impl ShipmentField {
    /// Mutable access to the targeted field.
    pub fn slot(self, shipment: &mut Shipment) -> &mut String {
        match self {
            ShipmentField::Temperature => &mut shipment.temperature,
            ShipmentField::Humidity => &mut shipment.humidity,
            ShipmentField::Luminosity => &mut shipment.luminosity,
            ShipmentField::CurrentLocation => &mut shipment.current_location,
            ShipmentField::DestinationCity => &mut shipment.destination_city,
            ShipmentField::OriginCity => &mut shipment.origin_city,
            ShipmentField::Condition => &mut shipment.condition,
        }
    }

    /// Field name as it appears in the stored record.
    pub fn as_str(self) -> &'static str {
        match self {
            ShipmentField::Temperature => "Temperature",
            ShipmentField::Humidity => "Humidity",
            ShipmentField::Luminosity => "Luminosity",
            ShipmentField::CurrentLocation => "CurrentLocation",
            ShipmentField::DestinationCity => "DestinationCity",
            ShipmentField::OriginCity => "OriginCity",
            ShipmentField::Condition => "ShipmentCondition",
        }
    }
}

impl std::fmt::Display for ShipmentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARGS: [&str; 10] = [
        "S1", "B", "S", "LocA", "CityB", "CityA", "ok", "undefined", "", "null",
    ];

    #[test]
    fn registration_normalizes_placeholder_readings() {
        let shipment = Shipment::from_registration_args(&ARGS).unwrap();
        assert_eq!(shipment.doc_type, SHIPMENT_DOC_TYPE);
        assert_eq!(shipment.shipment_id, "S1");
        assert_eq!(shipment.condition, "ok");
        assert_eq!(shipment.temperature, NOT_AVAILABLE);
        assert_eq!(shipment.humidity, NOT_AVAILABLE);
        assert_eq!(shipment.luminosity, NOT_AVAILABLE);
    }

    #[test]
    fn registration_keeps_real_readings() {
        let mut args = ARGS;
        args[7] = "21C";
        args[8] = "NULL";
        args[9] = "300lx";
        let shipment = Shipment::from_registration_args(&args).unwrap();
        assert_eq!(shipment.temperature, "21C");
        // Only the exact lowercase literals are placeholders.
        assert_eq!(shipment.humidity, "NULL");
        assert_eq!(shipment.luminosity, "300lx");
    }

    #[test]
    fn registration_requires_ten_args() {
        let err = Shipment::from_registration_args(&ARGS[..9]).unwrap_err();
        assert!(matches!(err, ChaincodeError::MalformedArguments(_)));

        let mut eleven = ARGS.to_vec();
        eleven.push("extra");
        assert!(Shipment::from_registration_args(&eleven).is_err());
    }

    #[test]
    fn registration_rejects_empty_id() {
        let mut args = ARGS;
        args[0] = "";
        let err = Shipment::from_registration_args(&args).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn encoding_uses_ledger_field_names_in_order() {
        let shipment = Shipment::from_registration_args(&ARGS).unwrap();
        let json = String::from_utf8(shipment.encode().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"docType":"Shipment","ShipmentId":"S1","Buyer":"B","Seller":"S","CurrentLocation":"LocA","DestinationCity":"CityB","OriginCity":"CityA","ShipmentCondition":"ok","Temperature":"NA","Humidity":"NA","Luminosity":"NA"}"#
        );
    }

    #[test]
    fn decode_then_encode_reproduces_bytes() {
        let stored = Shipment::from_registration_args(&ARGS)
            .unwrap()
            .encode()
            .unwrap();
        let reencoded = Shipment::decode(&stored).unwrap().encode().unwrap();
        assert_eq!(stored, reencoded);
    }

    #[test]
    fn decode_rejects_malformed_bytes() {
        let err = Shipment::decode(b"{not json").unwrap_err();
        assert!(err.to_string().contains("Deserialization error"));
    }

    #[test]
    fn decode_tolerates_missing_fields() {
        let shipment = Shipment::decode(br#"{"docType":"Shipment","ShipmentId":"S9"}"#).unwrap();
        assert_eq!(shipment.shipment_id, "S9");
        assert!(shipment.buyer.is_empty());
    }

    #[test]
    fn field_slot_targets_one_field() {
        let mut shipment = Shipment::from_registration_args(&ARGS).unwrap();
        let before = shipment.clone();
        *ShipmentField::OriginCity.slot(&mut shipment) = "CityZ".into();
        assert_eq!(shipment.origin_city, "CityZ");
        shipment.origin_city = before.origin_city.clone();
        assert_eq!(shipment, before);
    }
}
