//! Client error types.

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing or joining failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The service answered with a status other than the one the operation expects.
    #[error("unexpected HTTP status: expected {expected}, got {actual}")]
    UnexpectedStatus {
        /// Status the operation documents as success.
        expected: u16,
        /// Status the service actually returned.
        actual: u16,
    },

    /// Response body was not valid JSON for the expected type.
    #[error("unable to decode json: {0}")]
    Decode(#[source] serde_json::Error),

    /// Strict decoding found fields the typed model does not know about.
    #[error("unknown fields in {type_name}: {}", fields.join(", "))]
    UnknownFields {
        /// Type that carried the unknown fields.
        type_name: &'static str,
        /// Dotted paths of every unknown field.
        fields: Vec<String>,
    },

    /// An id cannot be placed in a URL path as a single segment.
    #[error("invalid path segment: {0:?}")]
    InvalidSegment(String),

    /// Request body could not be serialized.
    #[error("unable to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Credentials are missing or cannot be attached to a request.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this is a status mismatch error.
    pub fn is_status_mismatch(&self) -> bool {
        matches!(self, Error::UnexpectedStatus { .. })
    }

    /// Check if the response body failed to decode, in either mode.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Error::Decode(_) | Error::UnknownFields { .. })
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth(_)) || matches!(self, Error::UnexpectedStatus { actual: 401, .. })
    }

    /// Status code pair for a mismatch, as `(expected, actual)`.
    pub fn status_codes(&self) -> Option<(u16, u16)> {
        match self {
            Error::UnexpectedStatus { expected, actual } => Some((*expected, *actual)),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mismatch_display() {
        let err = Error::UnexpectedStatus {
            expected: 200,
            actual: 403,
        };
        assert!(err.is_status_mismatch());
        assert_eq!(err.status_codes(), Some((200, 403)));
        assert!(err.to_string().contains("expected 200"));
        assert!(err.to_string().contains("got 403"));
    }

    #[test]
    fn test_unknown_fields_display() {
        let err = Error::UnknownFields {
            type_name: "MessagesResponse",
            fields: vec!["extra".to_string(), "messages[0].surprise".to_string()],
        };
        assert!(err.is_decode_error());
        assert_eq!(
            err.to_string(),
            "unknown fields in MessagesResponse: extra, messages[0].surprise"
        );
    }

    #[test]
    fn test_auth_predicates() {
        assert!(Error::Auth("no token".into()).is_auth_error());
        assert!(
            Error::UnexpectedStatus {
                expected: 200,
                actual: 401
            }
            .is_auth_error()
        );
        assert!(!Error::Config("x".into()).is_auth_error());
    }

    #[test]
    fn test_invalid_segment_display() {
        let err = Error::InvalidSegment("..".to_string());
        assert_eq!(err.to_string(), "invalid path segment: \"..\"");
        assert!(!err.is_status_mismatch());
        assert!(!err.is_decode_error());
    }

    #[test]
    fn test_json_error_is_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = Error::Decode(json_err);
        assert!(err.is_decode_error());
        assert!(!err.is_status_mismatch());
    }
}
