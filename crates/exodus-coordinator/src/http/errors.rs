use thiserror::Error;

/// Reasons a request line could not be parsed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The buffer held nothing but line terminators.
    #[error("request is empty")]
    Empty,
    /// The request line was not valid UTF-8.
    #[error("request line is not valid UTF-8")]
    NotUtf8,
    /// The request line carried no method token.
    #[error("request line has no method")]
    MissingMethod,
    /// The request line carried no request target.
    #[error("request line has no target")]
    MissingTarget,
}
