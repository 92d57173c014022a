use thiserror::Error;

use crate::Config;

/// Raised when a loaded configuration cannot drive the coordinator.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A setting that sizes a buffer or a liveness window was zero.
    #[error("configuration value '{field}' must be greater than zero")]
    ZeroValue {
        /// Name of the offending setting.
        field: &'static str,
    },
}

pub(crate) fn validate(config: &Config) -> Result<(), ConfigValidationError> {
    require_non_zero("unit_timeout_secs", config.unit_timeout_secs)?;
    require_non_zero("max_request_bytes", config.max_request_bytes as u64)?;
    require_non_zero("peer_response_bytes", config.peer_response_bytes as u64)?;
    Ok(())
}

fn require_non_zero(field: &'static str, value: u64) -> Result<(), ConfigValidationError> {
    if value == 0 {
        return Err(ConfigValidationError::ZeroValue { field });
    }
    Ok(())
}
