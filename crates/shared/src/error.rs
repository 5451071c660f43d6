//! Application-wide error types.

use thiserror::Error;

/// Application error types.
///
/// Every variant carries the client-facing message. `Display` adds a
/// category prefix for logs; responses use [`AppError::message`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed client input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A collaborator refused the request as invalid.
    #[error("Rejected by upstream: {0}")]
    Rejected(String),

    /// External service error.
    #[error("External service error: {0}")]
    ExternalService(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Rejected(_) => 400,
            Self::NotFound(_) => 404,
            Self::ExternalService(_) => 500,
        }
    }

    /// Returns the bare message without the category prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg)
            | Self::NotFound(msg)
            | Self::Rejected(msg)
            | Self::ExternalService(msg) => msg,
        }
    }
}
