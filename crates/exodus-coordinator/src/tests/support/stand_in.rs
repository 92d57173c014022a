//! Stand-in unit that answers coordinator relays with a fixed reply.

use std::io::{ErrorKind, Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Loopback server that counts connections and captures requests.
pub struct StandInUnit {
    port: u16,
    connections: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Vec<u8>>>>,
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl StandInUnit {
    /// Starts a unit replying `200 OK` with `body`.
    pub fn answering(body: &str) -> Self {
        let reply = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        Self::replying(reply.into_bytes())
    }

    /// Starts a unit replying with `reply` verbatim.
    pub fn replying(reply: Vec<u8>) -> Self {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind stand-in unit");
        listener
            .set_nonblocking(true)
            .expect("non-blocking stand-in");
        let port = listener.local_addr().expect("stand-in address").port();
        let connections = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let connections = Arc::clone(&connections);
            let requests = Arc::clone(&requests);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                while !stop.load(Ordering::SeqCst) {
                    match listener.accept() {
                        Ok((mut stream, _)) => {
                            connections.fetch_add(1, Ordering::SeqCst);
                            stream.set_nonblocking(false).expect("blocking stream");
                            let mut buffer = vec![0_u8; 64 * 1024];
                            let read = stream.read(&mut buffer).unwrap_or(0);
                            buffer.truncate(read);
                            requests.lock().expect("requests lock").push(buffer);
                            let _ = stream.write_all(&reply);
                        }
                        Err(error) if error.kind() == ErrorKind::WouldBlock => {
                            thread::sleep(Duration::from_millis(5));
                        }
                        Err(_) => break,
                    }
                }
            })
        };

        Self {
            port,
            connections,
            requests,
            stop,
            handle: Some(handle),
        }
    }

    /// Port of a loopback address nothing listens on.
    pub fn closed_port() -> u16 {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind probe");
        listener.local_addr().expect("probe address").port()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<Vec<u8>> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Drop for StandInUnit {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
