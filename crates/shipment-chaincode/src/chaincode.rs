//! The chaincode entry points: `init` and the `invoke` dispatcher.

use shipment_ledger::Ledger;
use tracing::{debug, info_span, warn};

use crate::error::{ChaincodeError, ChaincodeResult};
use crate::history;
use crate::manager;
use crate::method::Method;
use crate::response::Response;
use crate::shipment::{ShipmentField, REGISTRATION_ARG_COUNT};

/// Shipment chaincode.
///
/// Holds no state; every call reads from and writes to the ledger it is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShipmentChaincode;

impl ShipmentChaincode {
    pub fn new() -> Self {
        Self
    }

    /// Instantiation hook.
    ///
    /// No arguments is a no-op. Ten arguments seed one shipment (same order
    /// and normalization as `registerShipment`), overwriting any prior value.
    pub fn init<L, A>(&self, ledger: &L, args: &[A]) -> Response
    where
        L: Ledger + ?Sized,
        A: AsRef<str>,
    {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let _span = info_span!("chaincode_init", args = args.len()).entered();

        let result = match args.len() {
            0 => Ok(()),
            REGISTRATION_ARG_COUNT => manager::seed(ledger, &args),
            n => Err(ChaincodeError::argument_count("0 or 10", n)),
        };

        match result {
            Ok(()) => Response::success(None),
            Err(err) => {
                warn!(error = %err, "init rejected");
                Response::error(err.to_string())
            }
        }
    }

    /// Runs the operation named `function` with positional `args`.
    pub fn invoke<L, A>(&self, ledger: &L, function: &str, args: &[A]) -> Response
    where
        L: Ledger + ?Sized,
        A: AsRef<str>,
    {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let _span = info_span!("chaincode_invoke", function).entered();
        debug!(args = args.len(), "invoke is running");

        let method = match function.parse::<Method>() {
            Ok(method) => method,
            Err(err) => {
                warn!(error = %err, "invoke did not find function");
                return Response::error(err.to_string());
            }
        };

        match dispatch(ledger, method, &args) {
            Ok(payload) => Response::success(payload),
            Err(err) => {
                warn!(%method, error = %err, "invocation failed");
                Response::error(render_error(method, &err))
            }
        }
    }
}

/// Runs exactly one handler for `method`. Argument checks belong to the handlers.
pub fn dispatch<L: Ledger + ?Sized>(
    ledger: &L,
    method: Method,
    args: &[&str],
) -> ChaincodeResult<Option<Vec<u8>>> {
    let update = |field: ShipmentField| -> ChaincodeResult<Option<Vec<u8>>> {
        manager::update_field(ledger, args, field).map(|()| None)
    };

    match method {
        Method::RegisterShipment => manager::register(ledger, args).map(|()| None),
        Method::GetShipmentDetails => manager::get_details(ledger, args).map(Some),
        Method::UpdateTemperature => update(ShipmentField::Temperature),
        Method::UpdateHumidity => update(ShipmentField::Humidity),
        Method::UpdateLuminosity => update(ShipmentField::Luminosity),
        Method::UpdateCurrentLocation => update(ShipmentField::CurrentLocation),
        Method::UpdateDestinationCity => update(ShipmentField::DestinationCity),
        Method::UpdateOriginCity => update(ShipmentField::OriginCity),
        Method::UpdateShipmentStatus => update(ShipmentField::Condition),
        Method::QueryHistory => history::query_history(ledger, args).map(Some),
    }
}

/// Lookup failures on `getShipmentDetails` are reported as `{"Error":"…"}`.
fn render_error(method: Method, err: &ChaincodeError) -> String {
    match (method, err) {
        (Method::GetShipmentDetails, ChaincodeError::NotFound(_) | ChaincodeError::Storage { .. }) => {
            serde_json::json!({ "Error": err.to_string() }).to_string()
        }
        _ => err.to_string(),
    }
}
