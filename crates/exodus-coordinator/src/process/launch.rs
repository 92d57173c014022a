//! Supervises coordinator launch sequencing and shutdown.

use std::sync::Arc;

use tracing::info;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::clock::{Clock, SystemClock};
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::peer::{PeerClient, TcpPeerClient};
use crate::routes::Router;
use crate::transport::{CoordinatorConnectionHandler, SocketListener, WorkerSet};

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Collaborators needed to run the coordinator.
pub struct Collaborators<L, S> {
    /// Source of configuration.
    pub loader: L,
    /// Receives lifecycle events.
    pub reporter: Arc<dyn HealthReporter>,
    /// Client for unit relays. `None` builds a [`TcpPeerClient`] sized by
    /// `peer_response_bytes`.
    pub peers: Option<Arc<dyn PeerClient>>,
    /// Time source for liveness.
    pub clock: Arc<dyn Clock>,
    /// Blocks until shutdown is requested.
    pub shutdown: S,
}

/// Runs the coordinator using the production collaborators.
pub fn run_coordinator() -> Result<(), LaunchError> {
    let shutdown = SystemShutdownSignal::install()?;
    run_coordinator_with(Collaborators {
        loader: SystemConfigLoader,
        reporter: Arc::new(StructuredHealthReporter::new()),
        peers: None,
        clock: Arc::new(SystemClock),
        shutdown,
    })
}

/// Runs the coordinator with injected collaborators.
///
/// Bootstraps, binds the listener, serves until `shutdown` returns, then
/// stops the acceptor and waits up to the drain timeout for in-flight
/// connections.
pub fn run_coordinator_with<L, S>(collaborators: Collaborators<L, S>) -> Result<(), LaunchError>
where
    L: ConfigLoader,
    S: ShutdownSignal,
{
    let Collaborators {
        loader,
        reporter,
        peers,
        clock,
        shutdown,
    } = collaborators;

    let coordinator = bootstrap_with(&loader, reporter)?;
    let reporter = coordinator.reporter();
    let config = coordinator.config();
    let peers = peers
        .unwrap_or_else(|| Arc::new(TcpPeerClient::new(config.peer_response_bytes())));
    let router = Router::new(coordinator.registry().clone(), clock, peers);
    let handler = Arc::new(CoordinatorConnectionHandler::new(
        router,
        config.max_request_bytes(),
    ));

    let listener = SocketListener::bind(config.listen())?;
    let address = listener.local_addr();
    let workers = WorkerSet::new();
    let listener_handle = listener.start(handler, workers.clone())?;
    reporter.listener_ready(address);

    let waited = shutdown.wait();
    reporter.shutdown_requested();
    listener_handle.shutdown();
    listener_handle.join()?;
    let abandoned = workers.drain(config.drain_timeout());
    reporter.shutdown_completed(abandoned);
    info!(
        target: PROCESS_TARGET,
        units = coordinator.registry().len(),
        abandoned,
        "shutdown sequence completed"
    );
    waited?;
    Ok(())
}
