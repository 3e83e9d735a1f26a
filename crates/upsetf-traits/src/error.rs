//! Error types for trait operations.

use thiserror::Error;

/// Common error type for holdings sources.
#[derive(Debug, Error)]
pub enum TraitError {
    /// Connection to external service failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Requested resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Provider refused the request because of its rate limit
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Provider answered with a message instead of data
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Operation timed out
    #[error("timeout")]
    Timeout,

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Authentication failed
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
}

impl TraitError {
    /// Returns true if retrying the same request later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RateLimited(_) | Self::Timeout
        )
    }
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        TraitError::IoError(e.to_string())
    }
}

impl From<serde_json::Error> for TraitError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            TraitError::IoError(e.to_string())
        } else {
            TraitError::ParseError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TraitError::RateLimited("5 calls per minute".into());
        assert_eq!(err.to_string(), "rate limited: 5 calls per minute");
        assert_eq!(TraitError::Timeout.to_string(), "timeout");
    }

    #[test]
    fn test_transient() {
        assert!(TraitError::Timeout.is_transient());
        assert!(TraitError::RateLimited(String::new()).is_transient());
        assert!(!TraitError::NotFound("SPY".into()).is_transient());
    }

    #[test]
    fn test_from_json_error() {
        let err: TraitError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, TraitError::ParseError(_)));
    }
}
