//! Client error types.

use serde_json::Value;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Client error type.
///
/// Every operation on the client returns one of these; nothing is retried or
/// swallowed internally.
#[derive(Debug, Error)]
pub enum Error {
    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The HTTP call itself failed (connection, DNS, timeout).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server reported an error in the `error` field of the body.
    ///
    /// Takes precedence over the HTTP status: the API returns logical errors
    /// with a 2xx status too.
    #[error("{0}")]
    Server(String),

    /// Non-2xx status without an `error` field.
    #[error("status {status} and response received: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body (lossy UTF-8).
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decoding(#[source] serde_json::Error),

    /// The receive socket could not be opened.
    #[error("failed to dial websocket: {0}")]
    Dial(#[source] tungstenite::Error),

    /// The receive socket failed after it was opened.
    #[error("error reading from websocket: {0}")]
    Read(#[from] ReadError),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why the streaming receiver stopped reading.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The socket returned an error.
    #[error("{0}")]
    Socket(#[source] tungstenite::Error),

    /// The server closed the connection.
    #[error("connection closed")]
    Closed,

    /// A frame was not a valid message object.
    #[error("malformed frame: {0}")]
    Frame(#[source] serde_json::Error),
}

impl Error {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this is a rate limit error.
    ///
    /// The API reports rate limiting either as a 429 or as an `error` message
    /// on an otherwise successful response.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            Error::Server(message) => message.to_ascii_lowercase().contains("rate limit"),
            _ => self.status() == Some(429),
        }
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error body the API may attach to any response.
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// The non-empty `error` message of `body`, with newlines removed.
    ///
    /// Only a JSON object is an error envelope; arrays and scalars never are.
    pub(crate) fn message(body: &[u8]) -> Option<String> {
        let Ok(tree @ Value::Object(_)) = serde_json::from_slice::<Value>(body) else {
            return None;
        };
        let response: ErrorResponse = serde_json::from_value(tree).ok()?;
        response
            .error
            .filter(|message| !message.is_empty())
            .map(|message| message.replace('\n', ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        let err = Error::HttpStatus {
            status: 404,
            body: String::new(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_server_error());

        let err = Error::HttpStatus {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert!(err.is_server_error());
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_rate_limit_from_error_field() {
        let err = Error::Server("Rate limit exceeded".to_string());
        assert!(err.is_rate_limited());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    #[test]
    fn test_error_envelope_must_be_an_object() {
        assert_eq!(
            ErrorResponse::message(br#"{"error":"bad\nnumber"}"#),
            Some("badnumber".to_string())
        );
        assert_eq!(ErrorResponse::message(br#"{"error":""}"#), None);
        assert_eq!(ErrorResponse::message(br#"{"error":42}"#), None);
        assert_eq!(ErrorResponse::message(br#"["+1555"]"#), None);
        assert_eq!(ErrorResponse::message(br#""oops""#), None);
        assert_eq!(ErrorResponse::message(b""), None);
    }

    #[test]
    fn test_read_error_display() {
        let err = Error::from(ReadError::Closed);
        assert_eq!(
            err.to_string(),
            "error reading from websocket: connection closed"
        );
    }
}
