use tracing::debug;

use crate::http::{Response, StatusCode};
use crate::peer::nodes_list_request;

use super::{ROUTES_TARGET, RouteError, Router};

/// Relays the target unit's `/nodes_list` body verbatim.
///
/// `name` is taken as-is from the request target; no percent-decoding is
/// applied.
pub(super) fn handle(router: &Router, name: &str) -> Result<Response, RouteError> {
    let unit = router
        .registry
        .lookup(name, router.clock.now())
        .ok_or_else(|| RouteError::UnitUnavailable {
            name: name.to_owned(),
        })?;

    let request = nodes_list_request(&unit.address, unit.port);
    let reply = router
        .peers
        .request(&unit.address, unit.port, &request)
        .map_err(|source| RouteError::NodesUnreachable { source })?;
    let body = reply.body().ok_or(RouteError::InvalidPeerReply)?;
    debug!(
        target: ROUTES_TARGET,
        unit = name,
        bytes = body.len(),
        "relaying node listing"
    );
    Ok(Response::json(StatusCode::Ok, body.to_vec()))
}
