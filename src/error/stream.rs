//! Streaming-related error types.
//!
//! Errors that occur once a response was accepted: the body is missing, the
//! connection drops mid-stream, or the stream goes quiet.

use std::fmt;

/// Stream-specific error variants.
///
/// Malformed frames are not errors: the session drops them and keeps
/// reading. Cancellation is not an error either.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// The response carried no body to read.
    NoBody,

    /// Stream connection was lost before it ended.
    ConnectionLost { message: String },

    /// No chunk arrived within the idle timeout.
    Timeout { duration_ms: u64 },

    /// A buffered (non-streaming) body was not valid JSON.
    InvalidJson { message: String },

    /// Generic stream error.
    Other { message: String },
}

impl StreamError {
    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StreamError::ConnectionLost { .. } | StreamError::Timeout { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::NoBody => "The search service returned an empty response.".to_string(),
            StreamError::ConnectionLost { .. } => {
                "The connection was lost while results were loading.".to_string()
            }
            StreamError::Timeout { duration_ms } => format!(
                "No response from the search service for {}.",
                describe_duration(*duration_ms)
            ),
            StreamError::InvalidJson { .. } => {
                "Received invalid data from the search service.".to_string()
            }
            StreamError::Other { message } => format!("Stream error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::NoBody => "E_STREAM_NOBODY",
            StreamError::ConnectionLost { .. } => "E_STREAM_CONN",
            StreamError::Timeout { .. } => "E_STREAM_TIMEOUT",
            StreamError::InvalidJson { .. } => "E_STREAM_JSON",
            StreamError::Other { .. } => "E_STREAM_OTHER",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::NoBody => write!(f, "Response has no body"),
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::Timeout { duration_ms } => {
                write!(f, "Stream timeout after {}", describe_duration(*duration_ms))
            }
            StreamError::InvalidJson { message } => {
                write!(f, "Invalid JSON response body: {}", message)
            }
            StreamError::Other { message } => write!(f, "Stream error: {}", message),
        }
    }
}

impl std::error::Error for StreamError {}

fn describe_duration(ms: u64) -> String {
    if ms % 1000 == 0 {
        format!("{} seconds", ms / 1000)
    } else {
        format!("{} ms", ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_lost_is_retryable() {
        let err = StreamError::ConnectionLost {
            message: "reset by peer".to_string(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "E_STREAM_CONN");
    }

    #[test]
    fn test_no_body_not_retryable() {
        assert!(!StreamError::NoBody.is_retryable());
        assert_eq!(StreamError::NoBody.error_code(), "E_STREAM_NOBODY");
    }

    #[test]
    fn test_timeout_message() {
        let err = StreamError::Timeout { duration_ms: 45_000 };
        assert!(err.user_message().contains("45 seconds"));
        assert_eq!(err.to_string(), "Stream timeout after 45 seconds");
    }

    #[test]
    fn test_sub_second_timeout_message() {
        let err = StreamError::Timeout { duration_ms: 50 };
        assert_eq!(err.to_string(), "Stream timeout after 50 ms");
        assert!(err.user_message().contains("50 ms"));
    }
}
