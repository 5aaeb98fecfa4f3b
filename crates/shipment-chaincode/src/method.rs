//! Operation names accepted by the chaincode.

use std::fmt;
use std::str::FromStr;

use crate::error::ChaincodeError;

/// Every operation the chaincode can run, one variant per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    RegisterShipment,
    GetShipmentDetails,
    UpdateTemperature,
    UpdateHumidity,
    UpdateLuminosity,
    UpdateCurrentLocation,
    UpdateDestinationCity,
    UpdateOriginCity,
    UpdateShipmentStatus,
    QueryHistory,
}

impl Method {
    pub const ALL: [Method; 10] = [
        Method::RegisterShipment,
        Method::GetShipmentDetails,
        Method::UpdateTemperature,
        Method::UpdateHumidity,
        Method::UpdateLuminosity,
        Method::UpdateCurrentLocation,
        Method::UpdateDestinationCity,
        Method::UpdateOriginCity,
        Method::UpdateShipmentStatus,
        Method::QueryHistory,
    ];

    /// Wire name sent by hosts.
    ///
    /// `updateTemparature` keeps the spelling deployed clients already use;
    /// `updateTemperature` is accepted as an alias when parsing.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::RegisterShipment => "registerShipment",
            Method::GetShipmentDetails => "getShipmentDetails",
            Method::UpdateTemperature => "updateTemparature",
            Method::UpdateHumidity => "updateHumidity",
            Method::UpdateLuminosity => "updateLuminosity",
            Method::UpdateCurrentLocation => "updateCurrentLocation",
            Method::UpdateDestinationCity => "updateDestinationCity",
            Method::UpdateOriginCity => "updateOriginCity",
            Method::UpdateShipmentStatus => "updateShipmentStatus",
            Method::QueryHistory => "queryHistory",
        }
    }

    /// Whether the operation leaves the ledger untouched.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Method::GetShipmentDetails | Method::QueryHistory)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ChaincodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registerShipment" => Ok(Method::RegisterShipment),
            "getShipmentDetails" => Ok(Method::GetShipmentDetails),
            "updateTemparature" | "updateTemperature" => Ok(Method::UpdateTemperature),
            "updateHumidity" => Ok(Method::UpdateHumidity),
            "updateLuminosity" => Ok(Method::UpdateLuminosity),
            "updateCurrentLocation" => Ok(Method::UpdateCurrentLocation),
            "updateDestinationCity" => Ok(Method::UpdateDestinationCity),
            "updateOriginCity" => Ok(Method::UpdateOriginCity),
            "updateShipmentStatus" => Ok(Method::UpdateShipmentStatus),
            "queryHistory" => Ok(Method::QueryHistory),
            other => Err(ChaincodeError::UnknownOperation(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_wire_name_parses_back() {
        for method in Method::ALL {
            let parsed: Method = method.as_str().parse().unwrap();
            assert_eq!(parsed, method, "{} should parse to itself", method);
        }
    }

    #[test]
    fn temperature_alias() {
        assert_eq!(
            "updateTemperature".parse::<Method>().unwrap(),
            Method::UpdateTemperature
        );
    }

    #[test]
    fn unknown_names_are_rejected() {
        for name in ["", "deleteShipment", "RegisterShipment", "queryhistory"] {
            let err = name.parse::<Method>().unwrap_err();
            assert!(matches!(err, ChaincodeError::UnknownOperation(ref n) if n == name));
        }
    }

    #[test]
    fn read_only_methods() {
        let read_only: Vec<_> = Method::ALL.into_iter().filter(Method::is_read_only).collect();
        assert_eq!(
            read_only,
            vec![Method::GetShipmentDetails, Method::QueryHistory]
        );
    }
}
