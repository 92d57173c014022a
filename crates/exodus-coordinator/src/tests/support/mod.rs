//! Test harness utilities for the coordinator behavioural suites.

mod client;
mod config_loader;
mod reporter;
mod shutdown;
mod stand_in;

pub use client::{HttpReply, send_raw};
pub use config_loader::{FailingConfigLoader, InvalidConfigLoader, TestConfigLoader};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use shutdown::TestShutdownSignal;
pub use stand_in::StandInUnit;
