//! Unified search error type.

use thiserror::Error;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::stream::StreamError;

/// Any failure surfaced by a search.
///
/// Decode problems inside a stream never reach this type: malformed frames
/// are dropped where they are interpreted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The request could not be completed
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// The response body failed after the request was accepted
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Invalid configuration value
    #[error("Invalid configuration for {key}: {message}")]
    Config { key: String, message: String },
}

impl SearchError {
    /// Build a configuration error for `key`.
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        SearchError::Config {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SearchError::Network(err) if err.is_auth() => ErrorCategory::User,
            SearchError::Network(err) if err.is_server_side() => ErrorCategory::Server,
            SearchError::Network(NetworkError::HttpStatus { .. })
            | SearchError::Network(NetworkError::InvalidUrl { .. }) => ErrorCategory::Client,
            SearchError::Network(_) => ErrorCategory::Network,
            SearchError::Stream(StreamError::NoBody)
            | SearchError::Stream(StreamError::InvalidJson { .. }) => ErrorCategory::Server,
            SearchError::Stream(_) => ErrorCategory::Network,
            SearchError::Config { .. } => ErrorCategory::Configuration,
        }
    }

    /// Check if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SearchError::Network(err) => err.is_retryable(),
            SearchError::Stream(err) => err.is_retryable(),
            SearchError::Config { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Network(err) => err.user_message(),
            SearchError::Stream(err) => err.user_message(),
            SearchError::Config { key, message } => {
                format!("Configuration value {} is invalid: {}", key, message)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SearchError::Network(err) => err.error_code(),
            SearchError::Stream(err) => err.error_code(),
            SearchError::Config { .. } => "E_CONFIG",
        }
    }

    /// Suggested next step for the user.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err: SearchError = NetworkError::ConnectionFailed {
            url: "http://x".to_string(),
            message: "refused".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Network);

        let err: SearchError = NetworkError::HttpStatus {
            status: 503,
            message: String::new(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Server);

        let err: SearchError = NetworkError::HttpStatus {
            status: 401,
            message: String::new(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::User);

        let err: SearchError = NetworkError::HttpStatus {
            status: 422,
            message: String::new(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Client);

        let err: SearchError = StreamError::ConnectionLost {
            message: "eof".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Network);

        let err: SearchError = StreamError::NoBody.into();
        assert_eq!(err.category(), ErrorCategory::Server);

        let err = SearchError::config("PROSPECT_IDLE_TIMEOUT_SECS", "not a number");
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_display_is_transparent() {
        let err: SearchError = StreamError::Timeout { duration_ms: 5_000 }.into();
        assert_eq!(err.to_string(), "Stream timeout after 5 seconds");

        let err = SearchError::config("PROSPECT_API_URL", "empty");
        assert_eq!(err.to_string(), "Invalid configuration for PROSPECT_API_URL: empty");
    }

    #[test]
    fn test_codes_and_retry() {
        let err: SearchError = StreamError::ConnectionLost {
            message: "reset".to_string(),
        }
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "E_STREAM_CONN");

        let err = SearchError::config("k", "v");
        assert!(!err.is_retryable());
        assert_eq!(err.error_code(), "E_CONFIG");
        assert!(err.recovery_hint().contains("PROSPECT_"));
    }
}
