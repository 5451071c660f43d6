//! Attachment error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Attachment operation errors.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// The record has no public URL and no object storage is configured.
    #[error("attachment {0} has no public URL and storage is not configured")]
    NoDownloadSource(String),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The ID collides with a fixed attachment route segment.
    #[error("attachment id '{0}' is reserved")]
    ReservedId(String),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl AttachmentError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}
