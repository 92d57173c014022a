use serde_json::Value;
use tracing::info;

use crate::http::Response;
use crate::peer::sync_incoming_request;

use super::{ROUTES_TARGET, RouteError, Router, parse_json_body};

/// Forwards the re-serialised payload to the unit named by `target_unit`.
///
/// Nothing is sent unless the unit is online.
pub(super) fn handle(router: &Router, body: Option<&[u8]>) -> Result<Response, RouteError> {
    let document = parse_json_body(body)?;
    // A missing or non-string target names no unit and so is never online.
    let name = document
        .get("target_unit")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let unit = router
        .registry
        .lookup(name, router.clock.now())
        .ok_or_else(|| RouteError::UnitUnavailable {
            name: name.to_owned(),
        })?;

    let payload =
        serde_json::to_vec(&document).map_err(|source| RouteError::EncodePayload { source })?;
    let request = sync_incoming_request(&unit.address, unit.port, &payload)
        .map_err(|source| RouteError::OutOfMemory { source })?;
    router
        .peers
        .request(&unit.address, unit.port, &request)
        .map_err(|source| RouteError::SyncRejected { source })?;
    info!(
        target: ROUTES_TARGET,
        unit = name,
        bytes = payload.len(),
        "sync forwarded"
    );
    Ok(Response::status("sync forwarded"))
}
