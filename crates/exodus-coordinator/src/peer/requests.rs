use std::collections::TryReserveError;
use std::net::Ipv6Addr;

/// Builds the `GET /nodes_list` request sent to a unit.
#[must_use]
pub fn nodes_list_request(host: &str, port: u16) -> Vec<u8> {
    let host_header = authority(host, port);
    format!("GET /nodes_list HTTP/1.1\r\nHost: {host_header}\r\nConnection: close\r\n\r\n")
        .into_bytes()
}

/// Builds the `POST /sync_incoming` request carrying `body` to a unit.
///
/// # Errors
///
/// Returns [`TryReserveError`] when the request buffer cannot be allocated.
pub fn sync_incoming_request(
    host: &str,
    port: u16,
    body: &[u8],
) -> Result<Vec<u8>, TryReserveError> {
    let host_header = authority(host, port);
    let head = format!(
        "POST /sync_incoming HTTP/1.1\r\nHost: {host_header}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    let mut request = Vec::new();
    request.try_reserve_exact(head.len() + body.len())?;
    request.extend_from_slice(head.as_bytes());
    request.extend_from_slice(body);
    Ok(request)
}

/// `Host` header value; IPv6 literals are bracketed.
fn authority(host: &str, port: u16) -> String {
    if host.parse::<Ipv6Addr>().is_ok() {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}
