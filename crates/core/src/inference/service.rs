//! Inference service contract.

use async_trait::async_trait;
use serde_json::Value;

use super::error::InferenceError;
use super::types::CredentialPhotoSource;
use crate::attachment::Attachment;

/// Operations offered by the AI inference gateway.
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// General-purpose analysis of an attachment. `Value::Null` means the
    /// gateway produced nothing.
    async fn analyze_attachment(&self, attachment: &Attachment) -> Result<Value, InferenceError>;

    /// Extract text from an attachment.
    async fn ocr_analysis(&self, attachment: &Attachment) -> Result<Value, InferenceError>;

    /// Extract the portrait from an identity credential.
    async fn credential_photo(
        &self,
        source: CredentialPhotoSource,
    ) -> Result<Value, InferenceError>;

    /// Compare the faces found in two attachments.
    async fn compare_faces(&self, id1: &str, id2: &str) -> Result<Value, InferenceError>;
}
