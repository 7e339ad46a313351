//! Error types for the docquery client core.

use thiserror::Error;

/// A shared error type for the docquery client core.
///
/// Every coordinator operation resolves to a definite `Result` built from
/// these variants; no backend failure is allowed to escape a coordinator as
/// a panic or to leave a busy phase stuck.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocqueryError {
    /// A local precondition failed before any network call was made
    /// (empty ask draft, empty upload submission, oversized file selection,
    /// re-entrant invocation of an in-flight operation).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network failure or a non-2xx response from the backend, other than
    /// the ask endpoint's 429.
    #[error("Backend request failed: {message}")]
    Transport {
        /// HTTP status code, when a response was received at all.
        status: Option<u16>,
        message: String,
    },

    /// HTTP 429 from the ask endpoint specifically.
    #[error("Rate limit reached on the ask endpoint")]
    RateLimited,
}

impl DocqueryError {
    /// Creates a Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Transport error with no status code (connection-level
    /// failure, no response received).
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Transport error carrying the response status code.
    pub fn transport_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Check if this is a Validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Transport error.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is the rate-limit outcome.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }

    /// A short message suitable for showing directly to the user.
    ///
    /// Transport details go to the logs; the user only needs to know the
    /// operation failed, except for rate limiting which gets its own more
    /// specific notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Transport { .. } => "The request failed. Please try again.".to_string(),
            Self::RateLimited => {
                "Rate limit reached. Please try again in a few minutes.".to_string()
            }
        }
    }
}

/// A type alias for `Result<T, DocqueryError>`.
pub type Result<T> = std::result::Result<T, DocqueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_is_distinct_from_transport() {
        let rate_limited = DocqueryError::RateLimited;
        let server_error = DocqueryError::transport_status(500, "internal server error");

        assert!(rate_limited.is_rate_limited());
        assert!(!rate_limited.is_transport());
        assert!(server_error.is_transport());
        assert!(!server_error.is_rate_limited());
        assert_ne!(rate_limited, server_error);
    }

    #[test]
    fn user_message_distinguishes_rate_limiting() {
        let generic = DocqueryError::transport("connection refused").user_message();
        let limited = DocqueryError::RateLimited.user_message();

        assert_ne!(generic, limited);
        assert!(limited.contains("Rate limit"));
    }
}
