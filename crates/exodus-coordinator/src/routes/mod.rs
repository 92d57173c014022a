//! Route dispatch for the coordinator's HTTP surface.
//!
//! | Route                              | Effect                               |
//! |------------------------------------|--------------------------------------|
//! | `POST /register`                   | Record the caller as a unit          |
//! | `GET /units`                       | List units with liveness             |
//! | `GET /nodes?target_unit=<name>`    | Relay the unit's `/nodes_list` reply |
//! | `POST /sync`                       | Forward the payload to the unit      |

mod errors;
mod nodes;
mod register;
mod sync;
mod units;

use std::net::IpAddr;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::http::{Request, Response, StatusCode};
use crate::peer::PeerClient;
use crate::registry::UnitRegistry;

pub use errors::RouteError;

const ROUTES_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::routes");

/// Literal prefix of the node relay route; the remainder is the unit name.
pub const NODES_PREFIX: &str = "/nodes?target_unit=";

/// Maps parsed requests onto registry operations and unit relays.
#[derive(Clone)]
pub struct Router {
    registry: UnitRegistry,
    clock: Arc<dyn Clock>,
    peers: Arc<dyn PeerClient>,
}

impl Router {
    /// Builds a router over the shared registry and collaborators.
    #[must_use]
    pub fn new(registry: UnitRegistry, clock: Arc<dyn Clock>, peers: Arc<dyn PeerClient>) -> Self {
        Self {
            registry,
            clock,
            peers,
        }
    }

    /// Registry the router mutates.
    #[must_use]
    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    /// Serves one request from a connection whose peer address is `caller`.
    ///
    /// Failures are resolved into error responses; this never panics on
    /// client input.
    pub fn dispatch(&self, request: &Request<'_>, caller: IpAddr) -> Response {
        match self.route(request, caller) {
            Ok(response) => response,
            Err(error) => {
                let status = error.status();
                if status == StatusCode::InternalServerError || status == StatusCode::GatewayTimeout
                {
                    warn!(
                        target: ROUTES_TARGET,
                        method = request.method(),
                        path = request.target(),
                        status = status.code(),
                        error = %error,
                        "request failed"
                    );
                } else {
                    debug!(
                        target: ROUTES_TARGET,
                        method = request.method(),
                        path = request.target(),
                        status = status.code(),
                        error = %error,
                        "request rejected"
                    );
                }
                Response::error(status, error.client_message())
            }
        }
    }

    fn route(&self, request: &Request<'_>, caller: IpAddr) -> Result<Response, RouteError> {
        match (request.method(), request.target()) {
            ("POST", "/register") => register::handle(self, request.body(), caller),
            ("GET", "/units") => Ok(units::handle(self)),
            ("POST", "/sync") => sync::handle(self, request.body()),
            ("GET", target) if target.starts_with(NODES_PREFIX) => {
                nodes::handle(self, &target[NODES_PREFIX.len()..])
            }
            (method, target) => Err(RouteError::UnknownEndpoint {
                method: method.to_owned(),
                target: target.to_owned(),
            }),
        }
    }
}

fn parse_json_body(body: Option<&[u8]>) -> Result<Value, RouteError> {
    let body = body.ok_or(RouteError::MissingBody)?;
    serde_json::from_slice(body).map_err(|source| RouteError::InvalidJson { source })
}
