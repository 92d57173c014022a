//! Exodus coordinator: a LAN registry and relay for peer units.
//!
//! Units announce themselves with `POST /register`; the coordinator records
//! the caller's address and the advertised port and treats the unit as online
//! for a configurable window after each registration. Clients list units with
//! `GET /units`, fetch a unit's node listing through the coordinator with
//! `GET /nodes?target_unit=<name>`, and push sync payloads to a unit with
//! `POST /sync`.
//!
//! Each accepted connection is served by its own worker thread: one read,
//! one request, one response, then close. Shutdown on SIGINT or SIGTERM stops
//! the acceptor and drains in-flight workers up to a deadline.

mod bootstrap;
mod clock;
mod health;
mod http;
mod peer;
mod process;
mod registry;
mod routes;
mod telemetry;
mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Coordinator, StaticConfigLoader, SystemConfigLoader,
    bootstrap_with,
};
pub use clock::{Clock, SystemClock};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use http::{ParseError, Request, Response, StatusCode};
pub use peer::{PeerClient, PeerError, PeerResponse, TcpPeerClient};
pub use process::{
    Collaborators, LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal,
    run_coordinator, run_coordinator_with,
};
pub use registry::{Liveness, Registration, UnitAddress, UnitRegistry, UnitStatus};
pub use routes::{RouteError, Router};
pub use telemetry::TelemetryError;

#[cfg(test)]
mod tests;
