//! Attachment types and data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::AttachmentError;

/// IDs taken by the body-driven routes `/attachment/credential-photo` and
/// `/attachment/compare-faces`; an attachment stored under one of them could
/// never be reached through `/attachment/{id}`.
pub const RESERVED_IDS: [&str; 2] = ["credential-photo", "compare-faces"];

/// Check that an explicit ID can be stored.
///
/// # Errors
///
/// Returns [`AttachmentError::ReservedId`] for any of [`RESERVED_IDS`].
pub fn ensure_assignable_id(id: &str) -> Result<(), AttachmentError> {
    if RESERVED_IDS.contains(&id) {
        Err(AttachmentError::ReservedId(id.to_string()))
    } else {
        Ok(())
    }
}

/// Attachment domain model.
///
/// Serialized as-is when an attachment is sent to the inference gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Opaque identifier.
    pub id: String,
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub file_size: i64,
    /// Storage key/path.
    pub storage_key: String,
    /// Publicly reachable URL, when the file is not behind presigning.
    pub public_url: Option<String>,
    /// Free-form metadata recorded at ingestion.
    pub metadata: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for creating an attachment record.
#[derive(Debug, Clone)]
pub struct CreateAttachmentInput {
    /// Identifier; generated when `None`.
    pub id: Option<String>,
    /// Original filename.
    pub filename: String,
    /// MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub file_size: i64,
    /// Storage key/path.
    pub storage_key: String,
    /// Public URL (optional).
    pub public_url: Option<String>,
    /// Metadata (optional).
    pub metadata: Option<Value>,
}
