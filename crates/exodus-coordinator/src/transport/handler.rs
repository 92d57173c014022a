//! Per-connection request handling.

use std::io::{self, Read};
use std::net::{SocketAddr, TcpStream};

use tracing::{debug, warn};

use crate::http::{Request, Response, StatusCode};
use crate::routes::Router;

use super::LISTENER_TARGET;

/// Handles accepted connections.
pub(crate) trait ConnectionHandler: Send + Sync + 'static {
    /// Handles a single connection. Implementations should avoid panicking.
    fn handle(&self, stream: TcpStream, peer: SocketAddr);
}

/// Reads one request, routes it, and writes one response.
pub(crate) struct CoordinatorConnectionHandler {
    router: Router,
    max_request_bytes: usize,
}

impl CoordinatorConnectionHandler {
    pub(crate) fn new(router: Router, max_request_bytes: usize) -> Self {
        Self {
            router,
            max_request_bytes,
        }
    }
}

impl ConnectionHandler for CoordinatorConnectionHandler {
    fn handle(&self, mut stream: TcpStream, peer: SocketAddr) {
        let mut buffer = vec![0_u8; self.max_request_bytes];
        // Bytes beyond this single read are not part of the request.
        let read = match read_with_retry(&mut stream, &mut buffer) {
            Ok(0) => {
                debug!(target: LISTENER_TARGET, %peer, "connection closed without data");
                return;
            }
            Ok(read) => read,
            Err(error) => {
                warn!(
                    target: LISTENER_TARGET,
                    %peer,
                    error = %error,
                    "failed to read request"
                );
                return;
            }
        };

        let response = match Request::parse(&buffer[..read]) {
            Ok(request) => self.router.dispatch(&request, peer.ip()),
            Err(error) => {
                debug!(
                    target: LISTENER_TARGET,
                    %peer,
                    error = %error,
                    "malformed request"
                );
                Response::error(StatusCode::BadRequest, "malformed request")
            }
        };

        if let Err(error) = response.write_to(&mut stream) {
            warn!(
                target: LISTENER_TARGET,
                %peer,
                error = %error,
                "failed to write response"
            );
        }
    }
}

/// Performs one read, retrying only when interrupted by a signal.
pub(crate) fn read_with_retry<R: Read>(reader: &mut R, buffer: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buffer) {
            Ok(read) => return Ok(read),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::{Shutdown, TcpListener};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::clock::SystemClock;
    use crate::peer::TcpPeerClient;
    use crate::registry::UnitRegistry;

    struct InterruptOnce {
        interrupted: bool,
        data: &'static [u8],
    }

    impl Read for InterruptOnce {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            let len = self.data.len().min(buf.len());
            buf[..len].copy_from_slice(&self.data[..len]);
            Ok(len)
        }
    }

    #[test]
    fn read_retries_after_interrupt() {
        let mut reader = InterruptOnce {
            interrupted: false,
            data: b"GET /units",
        };
        let mut buffer = [0_u8; 32];
        let read = read_with_retry(&mut reader, &mut buffer).expect("read");
        assert_eq!(&buffer[..read], b"GET /units");
    }

    fn exchange(max_request_bytes: usize, request: &[u8]) -> Vec<u8> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
        let addr = listener.local_addr().expect("addr");
        let router = Router::new(
            UnitRegistry::new(Duration::from_secs(90)),
            Arc::new(SystemClock),
            Arc::new(TcpPeerClient::new(8192)),
        );
        let handler = CoordinatorConnectionHandler::new(router, max_request_bytes);
        let server = thread::spawn(move || {
            let (stream, peer) = listener.accept().expect("accept");
            handler.handle(stream, peer);
        });

        let mut client = TcpStream::connect(addr).expect("connect");
        client.write_all(request).expect("write");
        client.shutdown(Shutdown::Write).expect("half close");
        let mut reply = Vec::new();
        client.read_to_end(&mut reply).expect("read reply");
        server.join().expect("join server");
        reply
    }

    #[test]
    fn answers_units_listing() {
        let reply = exchange(4096, b"GET /units HTTP/1.1\r\nHost: x\r\n\r\n");
        assert!(reply.starts_with(b"HTTP/1.1 200 OK\r\n"));
        assert!(reply.ends_with(b"\r\n\r\n[]"));
    }

    #[test]
    fn malformed_request_gets_bad_request() {
        let reply = exchange(4096, b"GET\r\n\r\n");
        assert!(reply.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));
        assert!(reply.ends_with(br#"{"error":"malformed request"}"#));
    }

    #[test]
    fn empty_connection_closes_silently() {
        let reply = exchange(4096, b"");
        assert!(reply.is_empty());
    }
}
