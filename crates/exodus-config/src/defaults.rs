use crate::listen::ListenEndpoint;

/// Host the coordinator binds when no listen endpoint is configured.
pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";

/// TCP port the coordinator listens on by default.
pub const DEFAULT_LISTEN_PORT: u16 = 8080;

/// Seconds after the last registration before a unit is reported offline.
pub const DEFAULT_UNIT_TIMEOUT_SECS: u64 = 90;

/// Upper bound on the single read performed for each inbound request.
///
/// Sized for a 50 MiB body plus a kilobyte of request line and headers.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 50 * 1024 * 1024 + 1024;

/// Upper bound on the single read performed for each peer reply.
pub const DEFAULT_PEER_RESPONSE_BYTES: usize = 8192;

/// Seconds the daemon waits for in-flight workers during shutdown.
pub const DEFAULT_DRAIN_TIMEOUT_SECS: u64 = 10;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binaries.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Computes the default listening endpoint for the coordinator.
#[must_use]
pub fn default_listen_endpoint() -> ListenEndpoint {
    ListenEndpoint::tcp(DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT)
}
