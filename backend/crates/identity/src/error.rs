//! Identity Error Types
//!
//! Identity-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::storage::StorageError;
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Identifier is too short after stripping separators
    #[error("Identifier has {length} characters after normalization, minimum is {minimum}")]
    InvalidIdentifier { length: usize, minimum: usize },

    /// A login flow is already running on this controller
    #[error("A login flow is already in progress")]
    FlowBusy,

    /// Session slot could not be written or cleared
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),

    /// Session record could not be encoded
    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Remote profile endpoint unreachable or body unreadable
    #[error("Remote profile request failed: {0}")]
    RemoteFetch(#[from] reqwest::Error),

    /// Remote profile endpoint answered with a non-success status
    #[error("Remote profile request returned status {0}")]
    RemoteStatus(u16),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::InvalidIdentifier { .. } => ErrorKind::UnprocessableEntity,
            IdentityError::FlowBusy => ErrorKind::Conflict,
            IdentityError::Storage(_) | IdentityError::RemoteFetch(_) => {
                ErrorKind::ServiceUnavailable
            }
            IdentityError::RemoteStatus(401) => ErrorKind::Unauthorized,
            IdentityError::RemoteStatus(404) => ErrorKind::NotFound,
            IdentityError::RemoteStatus(_) => ErrorKind::BadGateway,
            IdentityError::Serialization(_) | IdentityError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError with a message suitable for display
    pub fn to_app_error(&self) -> AppError {
        match self {
            IdentityError::InvalidIdentifier { .. } => {
                AppError::new(self.kind(), "Please enter a valid Emirates ID number.")
            }
            IdentityError::FlowBusy => {
                AppError::new(self.kind(), "Authentication is already in progress.")
            }
            IdentityError::RemoteFetch(_) | IdentityError::RemoteStatus(_) => {
                AppError::new(self.kind(), "Unable to load your profile.")
                    .with_action("Please try again.")
            }
            IdentityError::Storage(_)
            | IdentityError::Serialization(_)
            | IdentityError::Internal(_) => AppError::new(self.kind(), "Authentication failed.")
                .with_action("Please try again."),
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            IdentityError::Storage(e) => {
                tracing::error!(error = %e, "Session storage error");
            }
            IdentityError::Serialization(e) => {
                tracing::error!(error = %e, "Session serialization error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::RemoteFetch(e) => {
                tracing::warn!(error = %e, "Remote profile fetch failed");
            }
            IdentityError::RemoteStatus(status) => {
                tracing::warn!(status, "Remote profile endpoint rejected request");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}
