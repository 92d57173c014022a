//! Outbound calls from the coordinator to registered units.
//!
//! Each call opens a fresh connection, writes one request, performs one read,
//! and closes. There are no retries and no timeouts.

mod client;
mod errors;
mod requests;

pub use client::{PeerClient, PeerResponse, TcpPeerClient};
pub use errors::PeerError;
pub use requests::{nodes_list_request, sync_incoming_request};

const PEER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::peer");
