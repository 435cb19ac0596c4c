//! Client error types

use thiserror::Error;

/// Errors returned by controller operations
#[derive(Debug, Error)]
pub enum Error {
    /// The requested object does not exist on the controller
    #[error("ErrNotFound")]
    NotFound,

    /// The controller answered with `return: false`
    #[error("rest API {action} failed: {reason}")]
    Api { action: String, reason: String },

    /// The controller answered with something that could not be interpreted
    #[error("invalid response for {action}: {message}")]
    InvalidResponse { action: String, message: String },
}

impl Error {
    pub fn api(action: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Api {
            action: action.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_response(action: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            action: action.into(),
            message: message.into(),
        }
    }

    /// Returns true for the not-found sentinel
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Result type for controller operations
pub type Result<T> = std::result::Result<T, Error>;
