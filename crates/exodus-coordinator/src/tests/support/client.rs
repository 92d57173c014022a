//! Minimal HTTP client for driving a running coordinator.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

/// Status and body of a coordinator reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpReply {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends `raw` and reads the whole reply.
pub fn send_raw(address: SocketAddr, raw: &[u8]) -> HttpReply {
    let mut stream = TcpStream::connect(address).expect("connect to coordinator");
    stream.write_all(raw).expect("write request");
    stream.shutdown(Shutdown::Write).expect("half close");
    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).expect("read reply");

    let text = String::from_utf8_lossy(&reply);
    let status = text
        .split(' ')
        .nth(1)
        .and_then(|code| code.parse().ok())
        .expect("reply has a status code");
    let boundary = reply
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .expect("reply has a header boundary");
    HttpReply {
        status,
        body: reply[boundary + 4..].to_vec(),
    }
}
