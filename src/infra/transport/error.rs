use std::fmt;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No response was received (connect failure, timeout, reset).
    Network,
    /// The server answered with a non-2xx status.
    Server,
    /// A 2xx body could not be decoded into the expected shape.
    Decode,
    /// The request could not be built (bad URL, unserializable body).
    InvalidRequest,
    /// A required input was missing; no request was sent.
    Precondition,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Network => "network error",
            Self::Server => "server error",
            Self::Decode => "decode error",
            Self::InvalidRequest => "invalid request",
            Self::Precondition => "precondition failed",
        };
        f.write_str(label)
    }
}

/// Normalized failure of an API call.
///
/// Built once at the transport boundary so callers never inspect raw
/// responses: `message` holds the server-supplied human-readable message
/// when the error body carried one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct ApiError {
    kind: ErrorKind,
    status: Option<u16>,
    message: Option<String>,
    detail: String,
}

impl ApiError {
    pub fn network(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, None, None, detail)
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, None, None, detail)
    }

    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, None, None, detail)
    }

    pub fn precondition(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Precondition, None, None, detail)
    }

    /// Builds a server error from a non-2xx status and its raw body.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = extract_message(body);
        let text = String::from_utf8_lossy(body);
        let detail = if text.trim().is_empty() {
            format!("status {status}")
        } else {
            format!("status {status} body {text}")
        };
        Self::new(ErrorKind::Server, Some(status), message, detail)
    }

    fn new(
        kind: ErrorKind,
        status: Option<u16>,
        message: Option<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            status,
            message,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Server-supplied message, if the error body carried one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else if err.is_builder() {
            Self::invalid_request(err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        Self::invalid_request(format!("invalid URL: {err}"))
    }
}

/// Pulls `message` out of an error body. Validation errors send a list of
/// messages, which are joined with `; `.
fn extract_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let message = match value.get("message")? {
        Value::String(text) => text.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        _ => return None,
    };
    (!message.is_empty()).then_some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_extracted() {
        let err = ApiError::from_status(409, br#"{"statusCode":409,"message":"Room is occupied"}"#);
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.message(), Some("Room is occupied"));
        assert!(err.to_string().contains("status 409"));
    }

    #[test]
    fn message_list_is_joined() {
        let err = ApiError::from_status(
            400,
            br#"{"message":["name must not be empty","price must be positive"]}"#,
        );
        assert_eq!(
            err.message(),
            Some("name must not be empty; price must be positive")
        );
    }

    #[test]
    fn missing_or_blank_message_is_none() {
        assert_eq!(ApiError::from_status(500, b"").message(), None);
        assert_eq!(ApiError::from_status(500, b"<html>oops</html>").message(), None);
        assert_eq!(ApiError::from_status(500, br#"{"message":"  "}"#).message(), None);
        assert_eq!(ApiError::from_status(500, br#"{"error":"x"}"#).message(), None);
    }

    #[test]
    fn unauthorized_is_detected() {
        assert!(ApiError::from_status(401, b"").is_unauthorized());
        assert!(!ApiError::network("reset").is_unauthorized());
    }
}
