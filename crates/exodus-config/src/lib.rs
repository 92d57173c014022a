//! Shared configuration for the Exodus coordinator.
//!
//! Settings are layered by `ortho_config`: built-in defaults, then an optional
//! TOML file (`--config-path` or `EXODUS_CONFIG_PATH`), then `EXODUS_*`
//! environment variables, and finally command-line flags.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

mod defaults;
mod listen;
mod logging;
mod validation;

pub use defaults::{
    DEFAULT_DRAIN_TIMEOUT_SECS, DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT, DEFAULT_LOG_FILTER,
    DEFAULT_MAX_REQUEST_BYTES, DEFAULT_PEER_RESPONSE_BYTES, DEFAULT_UNIT_TIMEOUT_SECS,
    default_listen_endpoint, default_log_filter, default_log_filter_string, default_log_format,
};
pub use listen::{ListenEndpoint, ListenEndpointParseError};
pub use logging::{LogFormat, LogFormatParseError};
pub use validation::ConfigValidationError;

/// Runtime settings for the coordinator daemon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "EXODUS")]
pub struct Config {
    /// Endpoint the coordinator accepts connections on.
    #[ortho_config(default = defaults::default_listen_endpoint())]
    pub listen: ListenEndpoint,
    /// Seconds a unit stays online after its last registration.
    #[ortho_config(default = DEFAULT_UNIT_TIMEOUT_SECS)]
    pub unit_timeout_secs: u64,
    /// Capacity of the single read performed for each inbound request.
    #[ortho_config(default = DEFAULT_MAX_REQUEST_BYTES)]
    pub max_request_bytes: usize,
    /// Capacity of the single read performed for each peer reply.
    #[ortho_config(default = DEFAULT_PEER_RESPONSE_BYTES)]
    pub peer_response_bytes: usize,
    /// Seconds to wait for in-flight connections during shutdown.
    #[ortho_config(default = DEFAULT_DRAIN_TIMEOUT_SECS)]
    pub drain_timeout_secs: u64,
    /// `tracing` filter expression.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log records.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen_endpoint(),
            unit_timeout_secs: DEFAULT_UNIT_TIMEOUT_SECS,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            peer_response_bytes: DEFAULT_PEER_RESPONSE_BYTES,
            drain_timeout_secs: DEFAULT_DRAIN_TIMEOUT_SECS,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Endpoint the coordinator listens on.
    #[must_use]
    pub fn listen(&self) -> &ListenEndpoint {
        &self.listen
    }

    /// Liveness window applied to registered units.
    #[must_use]
    pub fn unit_timeout(&self) -> Duration {
        Duration::from_secs(self.unit_timeout_secs)
    }

    /// Size of the inbound request buffer.
    #[must_use]
    pub fn max_request_bytes(&self) -> usize {
        self.max_request_bytes
    }

    /// Size of the peer reply buffer.
    #[must_use]
    pub fn peer_response_bytes(&self) -> usize {
        self.peer_response_bytes
    }

    /// Budget for draining in-flight connections at shutdown.
    #[must_use]
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.drain_timeout_secs)
    }

    /// Log filter expression applied to the subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Preferred log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Rejects settings the coordinator cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError::ZeroValue`] when the liveness window or
    /// either read buffer is configured as zero.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        validation::validate(self)
    }
}
