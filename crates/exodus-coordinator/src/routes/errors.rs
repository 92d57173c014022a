//! Failures a route resolves into an error response.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::http::StatusCode;
use crate::peer::PeerError;

/// Errors surfaced while serving a route.
///
/// Each variant maps to a status code and a fixed client-facing message. The
/// underlying cause is kept for logging only.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Request carried no body.
    #[error("request has no body")]
    MissingBody,
    /// Body was not valid JSON.
    #[error("request body is not valid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
    /// Registration lacked a string `unit_name` or a valid `listen_port`.
    #[error("registration lacks unit_name or a valid listen_port")]
    MissingRegistrationFields,
    /// Registration named a unit longer than the registry accepts.
    #[error("unit_name is {length} bytes, exceeding {limit}")]
    UnitNameTooLong { length: usize, limit: usize },
    /// Target unit is unknown or offline.
    #[error("unit '{name}' is not registered or offline")]
    UnitUnavailable { name: String },
    /// No route matches the method and target.
    #[error("no route for {method} {target}")]
    UnknownEndpoint { method: String, target: String },
    /// Node listing could not be fetched from the unit.
    #[error("node listing request failed: {source}")]
    NodesUnreachable {
        #[source]
        source: PeerError,
    },
    /// Unit answered 200 without a header/body boundary.
    #[error("unit reply has no body boundary")]
    InvalidPeerReply,
    /// Unit did not accept the forwarded sync payload.
    #[error("sync forwarding failed: {source}")]
    SyncRejected {
        #[source]
        source: PeerError,
    },
    /// Sync payload could not be re-serialised.
    #[error("failed to encode sync payload: {source}")]
    EncodePayload {
        #[source]
        source: serde_json::Error,
    },
    /// Forwarded request buffer could not be allocated.
    #[error("failed to allocate forwarded request: {source}")]
    OutOfMemory {
        #[source]
        source: TryReserveError,
    },
}

impl RouteError {
    /// Status code sent to the client.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingBody
            | Self::InvalidJson { .. }
            | Self::MissingRegistrationFields
            | Self::UnitNameTooLong { .. } => StatusCode::BadRequest,
            Self::UnitUnavailable { .. } | Self::UnknownEndpoint { .. } => StatusCode::NotFound,
            Self::NodesUnreachable { .. } | Self::SyncRejected { .. } => StatusCode::GatewayTimeout,
            Self::InvalidPeerReply | Self::EncodePayload { .. } | Self::OutOfMemory { .. } => {
                StatusCode::InternalServerError
            }
        }
    }

    /// Message placed in the `error` member of the response body.
    #[must_use]
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::MissingBody => "missing body",
            Self::InvalidJson { .. } => "invalid json",
            Self::MissingRegistrationFields => "missing unit_name or listen_port",
            Self::UnitNameTooLong { .. } => "unit_name too long",
            Self::UnitUnavailable { .. } => "target unit not found or offline",
            Self::UnknownEndpoint { .. } => "endpoint not found",
            Self::NodesUnreachable { .. } => "could not reach target unit",
            Self::InvalidPeerReply => "invalid response from target unit",
            Self::SyncRejected { .. } => "target unit did not accept sync",
            Self::EncodePayload { .. } => "internal error",
            Self::OutOfMemory { .. } => "out of memory",
        }
    }
}
