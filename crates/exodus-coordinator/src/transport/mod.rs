//! TCP listener and per-connection workers.
//!
//! The acceptor thread blocks in `accept` and hands every connection to its
//! own worker thread. Shutdown raises a flag and opens one loopback
//! connection so the blocked `accept` returns straight away.

mod errors;
mod handler;
mod listener;
#[cfg(test)]
mod test_utils;
mod workers;

pub(crate) use self::errors::ListenerError;
pub(crate) use self::handler::{ConnectionHandler, CoordinatorConnectionHandler, read_with_retry};
pub(crate) use self::listener::{ListenerHandle, SocketListener};
#[cfg(test)]
pub(crate) use self::test_utils::CountingHandler;
pub(crate) use self::workers::WorkerSet;

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
