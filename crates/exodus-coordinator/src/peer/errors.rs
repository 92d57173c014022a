use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Failures while calling a unit.
#[derive(Debug, Error)]
pub enum PeerError {
    #[error("failed to resolve unit address {host}:{port}: {source}")]
    Resolve {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("no addresses resolved for unit {host}:{port}")]
    ResolveEmpty { host: String, port: u16 },
    #[error("failed to connect to unit at {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to send request to unit at {addr}: {source}")]
    Write {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to read reply from unit at {addr}: {source}")]
    Read {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("unit at {addr} did not answer 200 OK")]
    Rejected { addr: SocketAddr },
}
