//! Test configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};

use exodus_config::{Config, ListenEndpoint};

use crate::bootstrap::ConfigLoader;

/// Loader binding an ephemeral loopback port with quiet logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestConfigLoader;

impl TestConfigLoader {
    pub fn config() -> Config {
        Config {
            listen: ListenEndpoint::tcp("127.0.0.1", 0),
            drain_timeout_secs: 2,
            log_filter: "error".to_owned(),
            ..Config::default()
        }
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Self::config())
    }
}

/// Loader that fails by passing an unsupported listen scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("exodus-coordinator"),
            OsString::from("--listen"),
            OsString::from("unix:///tmp/exodus.sock"),
        ];
        Config::load_from_iter(args)
    }
}

/// Loader producing a configuration that fails validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvalidConfigLoader;

impl ConfigLoader for InvalidConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            unit_timeout_secs: 0,
            ..TestConfigLoader::config()
        })
    }
}
