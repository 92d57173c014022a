use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};

use tracing::debug;

use crate::http::body_after_headers;
use crate::transport::read_with_retry;

use super::{PEER_TARGET, PeerError};

const SUCCESS_MARKER: &[u8] = b"HTTP/1.1 200 OK";

/// Sends a raw request to a unit and returns its reply.
pub trait PeerClient: Send + Sync {
    /// Delivers `request` to `host:port` and returns the bytes of one read.
    ///
    /// # Errors
    ///
    /// Returns [`PeerError`] when the unit cannot be reached or its reply
    /// does not contain `HTTP/1.1 200 OK`.
    fn request(&self, host: &str, port: u16, request: &[u8]) -> Result<PeerResponse, PeerError>;
}

/// Bytes returned by a unit that answered `200 OK`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerResponse {
    raw: Vec<u8>,
}

impl PeerResponse {
    /// Wraps the bytes of a successful reply.
    #[must_use]
    pub fn new(raw: Vec<u8>) -> Self {
        Self { raw }
    }

    /// Reply body, if the header block was terminated within the read.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        body_after_headers(&self.raw)
    }
}

/// [`PeerClient`] over blocking TCP.
#[derive(Debug, Clone, Copy)]
pub struct TcpPeerClient {
    response_limit: usize,
}

impl TcpPeerClient {
    /// Builds a client that reads at most `response_limit` bytes per reply.
    #[must_use]
    pub fn new(response_limit: usize) -> Self {
        Self { response_limit }
    }
}

impl PeerClient for TcpPeerClient {
    fn request(&self, host: &str, port: u16, request: &[u8]) -> Result<PeerResponse, PeerError> {
        let addr = (host, port)
            .to_socket_addrs()
            .map_err(|source| PeerError::Resolve {
                host: host.to_owned(),
                port,
                source,
            })?
            .next()
            .ok_or_else(|| PeerError::ResolveEmpty {
                host: host.to_owned(),
                port,
            })?;

        let mut stream =
            TcpStream::connect(addr).map_err(|source| PeerError::Connect { addr, source })?;
        stream
            .write_all(request)
            .map_err(|source| PeerError::Write { addr, source })?;

        let mut buffer = vec![0_u8; self.response_limit];
        let read = read_with_retry(&mut stream, &mut buffer)
            .map_err(|source| PeerError::Read { addr, source })?;
        buffer.truncate(read);
        debug!(target: PEER_TARGET, %addr, bytes = read, "unit replied");

        if !contains(&buffer, SUCCESS_MARKER) {
            return Err(PeerError::Rejected { addr });
        }
        Ok(PeerResponse::new(buffer))
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}
