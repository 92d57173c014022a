//! Minimal HTTP/1.1 framing for the coordinator.
//!
//! Only what a single request per connection needs: a request line, a
//! header/body boundary, and a response with a fixed header set. Header values
//! are never interpreted and every response closes the connection.

mod errors;
mod request;
mod response;

pub use errors::ParseError;
pub use request::Request;
pub use response::{Response, StatusCode};

/// Separator between the header block and the body.
pub(crate) const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Returns the bytes following the first header terminator, if any.
pub(crate) fn body_after_headers(bytes: &[u8]) -> Option<&[u8]> {
    bytes
        .windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR)
        .map(|index| &bytes[index + HEADER_TERMINATOR.len()..])
}
