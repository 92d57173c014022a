use std::io::{self, Write};

use serde::Serialize;

/// Content type attached to every coordinator response.
const JSON_CONTENT_TYPE: &str = "application/json";

/// Status codes the coordinator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200.
    Ok,
    /// 400.
    BadRequest,
    /// 404.
    NotFound,
    /// 500.
    InternalServerError,
    /// 504.
    GatewayTimeout,
}

impl StatusCode {
    /// Numeric status code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalServerError => 500,
            Self::GatewayTimeout => 504,
        }
    }

    /// Reason phrase for the status line.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::InternalServerError => "Internal Server Error",
            Self::GatewayTimeout => "Gateway Timeout",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

#[derive(Serialize)]
struct StatusBody<'a> {
    status: &'a str,
}

/// Response written back before the connection closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Response {
    /// Builds a JSON response from already serialised bytes.
    #[must_use]
    pub fn json(status: StatusCode, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: JSON_CONTENT_TYPE,
            body,
        }
    }

    /// Builds `{"error": message}`.
    #[must_use]
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::json(status, encode(&ErrorBody { error: message }))
    }

    /// Builds a 200 `{"status": message}`.
    #[must_use]
    pub fn status(message: &str) -> Self {
        Self::json(StatusCode::Ok, encode(&StatusBody { status: message }))
    }

    /// Status of the response.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Serialises the status line, the fixed headers, and the body.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status.code(),
            self.status.reason(),
            self.content_type,
            self.body.len(),
        );
        let mut bytes = Vec::with_capacity(head.len() + self.body.len());
        bytes.extend_from_slice(head.as_bytes());
        bytes.extend_from_slice(&self.body);
        bytes
    }

    /// Writes the serialised response to `writer`.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }
}

fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    // Plain string-keyed structs cannot fail to serialise.
    serde_json::to_vec(value).unwrap_or_default()
}
