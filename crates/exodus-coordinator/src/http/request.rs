use super::{ParseError, body_after_headers};

/// Request parsed from a single read of a connection.
///
/// Borrowed from the read buffer; nothing is copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    method: &'a str,
    target: &'a str,
    version: Option<&'a str>,
    body: Option<&'a [u8]>,
}

impl<'a> Request<'a> {
    /// Parses `METHOD SP TARGET [SP VERSION]` followed by optional headers and
    /// a body.
    ///
    /// Leading CR and LF bytes are skipped and request-line tokens may be
    /// separated by runs of spaces. The body is whatever follows the first
    /// blank line; without one the body is absent. `Content-Length` is not
    /// consulted.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the request line is empty, not UTF-8, or
    /// lacks a method or target.
    pub fn parse(buffer: &'a [u8]) -> Result<Self, ParseError> {
        let start = buffer
            .iter()
            .position(|byte| !is_line_break(*byte))
            .ok_or(ParseError::Empty)?;
        let message = &buffer[start..];
        let line_end = message
            .iter()
            .position(|byte| is_line_break(*byte))
            .unwrap_or(message.len());
        let line = std::str::from_utf8(&message[..line_end]).map_err(|_| ParseError::NotUtf8)?;

        let mut tokens = line.split(' ').filter(|token| !token.is_empty());
        let method = tokens.next().ok_or(ParseError::MissingMethod)?;
        let target = tokens.next().ok_or(ParseError::MissingTarget)?;
        let version = tokens.next();

        Ok(Self {
            method,
            target,
            version,
            body: body_after_headers(message),
        })
    }

    /// Request method, such as `GET`.
    #[must_use]
    pub fn method(&self) -> &'a str {
        self.method
    }

    /// Request target including any query suffix.
    #[must_use]
    pub fn target(&self) -> &'a str {
        self.target
    }

    /// Protocol version token when one was sent.
    #[must_use]
    pub fn version(&self) -> Option<&'a str> {
        self.version
    }

    /// Bytes after the header block, if the block was terminated.
    #[must_use]
    pub fn body(&self) -> Option<&'a [u8]> {
        self.body
    }
}

fn is_line_break(byte: u8) -> bool {
    matches!(byte, b'\r' | b'\n')
}
