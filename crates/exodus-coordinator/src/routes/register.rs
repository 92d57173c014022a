use std::net::IpAddr;

use serde_json::Value;
use tracing::info;

use crate::http::Response;
use crate::registry::{MAX_UNIT_NAME_BYTES, Registration};

use super::{ROUTES_TARGET, RouteError, Router, parse_json_body};

pub(super) fn handle(
    router: &Router,
    body: Option<&[u8]>,
    caller: IpAddr,
) -> Result<Response, RouteError> {
    let document = parse_json_body(body)?;
    let name = document.get("unit_name").and_then(Value::as_str);
    let port = document
        .get("listen_port")
        .and_then(Value::as_f64)
        .and_then(listen_port);
    let (Some(name), Some(port)) = (name, port) else {
        return Err(RouteError::MissingRegistrationFields);
    };
    if name.len() > MAX_UNIT_NAME_BYTES {
        return Err(RouteError::UnitNameTooLong {
            length: name.len(),
            limit: MAX_UNIT_NAME_BYTES,
        });
    }

    let address = caller.to_canonical().to_string();
    let outcome = router
        .registry
        .register(name, &address, port, router.clock.now());
    info!(
        target: ROUTES_TARGET,
        unit = name,
        %address,
        port,
        updated = outcome == Registration::Updated,
        "unit registered"
    );
    Ok(Response::status("registered"))
}

/// Truncates a JSON number toward zero and keeps it only if it is a TCP port.
fn listen_port(raw: f64) -> Option<u16> {
    let truncated = raw.trunc();
    if (1.0..=f64::from(u16::MAX)).contains(&truncated) {
        Some(truncated as u16)
    } else {
        None
    }
}
