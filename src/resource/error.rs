//! Error types for resource resolution

use axum::http::StatusCode;
use thiserror::Error;

/// Result type for resource operations
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors that can occur when resolving a requested resource
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The path starts with a separator or contains `..`
    #[error("forbidden path {0}")]
    ForbiddenPath(String),

    /// Missing, unreadable, or vanished between stat and read
    #[error("not found [{0}]")]
    ResourceNotFound(String),
}

impl ResourceError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ForbiddenPath(_) => StatusCode::FORBIDDEN,
            Self::ResourceNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}
