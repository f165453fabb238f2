//! Unified error handling for the hearth crate
//!
//! Each module keeps its own error type. [`Error`] wraps all of them so
//! callers crossing module boundaries can use one `Result`, and
//! [`HearthErrorTrait`] classifies any of them for handling decisions.
//!
//! | Error | Category | Recoverable |
//! |---|---|---|
//! | invalid time token, empty schedule | Input | no |
//! | forbidden path, resource not found | Resource | yes (one request) |
//! | remote / network failure | Network | no |
//! | drain timeout | Lifecycle | yes (already answered) |
//! | bad config file | Config | no |

use std::io;
use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::client::ClientError;
pub use crate::config::ConfigError;
pub use crate::listener::ServerError;
pub use crate::resource::ResourceError;
pub use crate::schedule::ScheduleError;

/// Common trait for all hearth error types
pub trait HearthErrorTrait: std::error::Error {
    /// Whether the process can carry on after this error
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Operator input: time tokens, schedules, CLI usage
    Input,
    /// Static resource lookup
    Resource,
    /// HTTP transport and remote responses
    Network,
    /// Server start-up and shutdown
    Lifecycle,
    /// Configuration loading and validation
    Config,
    /// Local file I/O
    Storage,
    /// Other/unknown errors
    Other,
}

/// Unified error type for the hearth crate
#[derive(Error, Debug)]
pub enum Error {
    /// Time token and schedule encoding errors
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Resource resolution errors
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Schedule client errors
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Listener errors
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Command line misuse
    #[error("{0}")]
    Usage(String),
}

impl HearthErrorTrait for ScheduleError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Input
    }
}

impl HearthErrorTrait for ResourceError {
    fn is_recoverable(&self) -> bool {
        true
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Resource
    }
}

impl HearthErrorTrait for ClientError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::InitError(_) => ErrorCategory::Other,
            Self::NetworkError(_) | Self::RemoteError { .. } => ErrorCategory::Network,
        }
    }
}

impl HearthErrorTrait for ServerError {
    fn is_recoverable(&self) -> bool {
        matches!(self, Self::ShutdownTimeout { .. })
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) => ErrorCategory::Config,
            Self::Bind { .. } | Self::Serve(_) | Self::ShutdownTimeout { .. } => {
                ErrorCategory::Lifecycle
            }
        }
    }
}

impl HearthErrorTrait for ConfigError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Config
    }
}

impl HearthErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Schedule(e) => e.is_recoverable(),
            Self::Resource(e) => e.is_recoverable(),
            Self::Client(e) => e.is_recoverable(),
            Self::Server(e) => e.is_recoverable(),
            Self::Config(e) => e.is_recoverable(),
            Self::Io(_) | Self::Json(_) | Self::Usage(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Schedule(e) => e.category(),
            Self::Resource(e) => e.category(),
            Self::Client(e) => e.category(),
            Self::Server(e) => e.category(),
            Self::Config(e) => e.category(),
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Other,
            Self::Usage(_) => ErrorCategory::Input,
        }
    }
}

impl Error {
    /// Create a usage error
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
