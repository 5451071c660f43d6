//! Attachment service implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::error::AttachmentError;
use super::types::{Attachment, CreateAttachmentInput};
use crate::storage::StorageService;

/// Repository trait for attachment persistence.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait AttachmentRepository: Send + Sync {
    /// Create a new attachment record. Explicit IDs listed in
    /// [`super::RESERVED_IDS`] are refused with [`AttachmentError::ReservedId`].
    fn create(
        &self,
        input: CreateAttachmentInput,
    ) -> impl std::future::Future<Output = Result<Attachment, AttachmentError>> + Send;

    /// Find attachment by ID.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Attachment>, AttachmentError>> + Send;
}

/// Read-side contract the HTTP layer consumes.
#[async_trait]
pub trait AttachmentStore: Send + Sync {
    /// Load an attachment record, `None` if it does not exist.
    async fn find_by_id(&self, id: &str) -> Result<Option<Attachment>, AttachmentError>;

    /// Resolve an attachment to a URL the client can fetch, `None` if the
    /// attachment does not exist.
    async fn view_file(&self, id: &str) -> Result<Option<String>, AttachmentError>;
}

/// Attachment store backed by a repository and optional object storage.
pub struct AttachmentService<R: AttachmentRepository> {
    storage: Option<Arc<StorageService>>,
    repo: Arc<R>,
}

impl<R: AttachmentRepository> AttachmentService<R> {
    /// Create a new attachment service.
    #[must_use]
    pub fn new(storage: Option<Arc<StorageService>>, repo: Arc<R>) -> Self {
        Self { storage, repo }
    }
}

#[async_trait]
impl<R: AttachmentRepository> AttachmentStore for AttachmentService<R> {
    async fn find_by_id(&self, id: &str) -> Result<Option<Attachment>, AttachmentError> {
        self.repo.find_by_id(id).await
    }

    /// Public URLs win over presigning so files served from a CDN never
    /// touch the storage provider.
    async fn view_file(&self, id: &str) -> Result<Option<String>, AttachmentError> {
        let Some(attachment) = self.repo.find_by_id(id).await? else {
            return Ok(None);
        };

        if let Some(url) = attachment.public_url.filter(|u| !u.is_empty()) {
            return Ok(Some(url));
        }

        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| AttachmentError::NoDownloadSource(attachment.id.clone()))?;

        let presigned = storage.presign_download(&attachment.storage_key).await?;
        debug!(
            attachment_id = %attachment.id,
            expires_at = %presigned.expires_at,
            "Presigned attachment download"
        );

        Ok(Some(presigned.url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{StorageConfig, StorageError, StorageProvider};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock repository for testing.
    struct MockAttachmentRepository {
        attachments: Mutex<HashMap<String, Attachment>>,
    }

    impl MockAttachmentRepository {
        fn new() -> Self {
            Self {
                attachments: Mutex::new(HashMap::new()),
            }
        }
    }

    impl AttachmentRepository for MockAttachmentRepository {
        async fn create(&self, input: CreateAttachmentInput) -> Result<Attachment, AttachmentError> {
            let attachment = Attachment {
                id: input.id.unwrap_or_else(|| "generated".to_string()),
                filename: input.filename,
                mime_type: input.mime_type,
                file_size: input.file_size,
                storage_key: input.storage_key,
                public_url: input.public_url,
                metadata: input.metadata,
                created_at: chrono::Utc::now(),
            };
            self.attachments
                .lock()
                .unwrap()
                .insert(attachment.id.clone(), attachment.clone());
            Ok(attachment)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Attachment>, AttachmentError> {
            Ok(self.attachments.lock().unwrap().get(id).cloned())
        }
    }

    fn input(id: &str, public_url: Option<&str>) -> CreateAttachmentInput {
        CreateAttachmentInput {
            id: Some(id.to_string()),
            filename: "passport.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            file_size: 2048,
            storage_key: format!("uploads/{id}/passport.jpg"),
            public_url: public_url.map(String::from),
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let repo = Arc::new(MockAttachmentRepository::new());
        let service = AttachmentService::new(None, repo);

        let result = service.find_by_id("nope").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_view_file_missing_returns_none() {
        let repo = Arc::new(MockAttachmentRepository::new());
        let service = AttachmentService::new(None, repo);

        assert_eq!(service.view_file("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_view_file_prefers_public_url() {
        let repo = Arc::new(MockAttachmentRepository::new());
        repo.create(input("abc", Some("https://cdn.example.com/abc.jpg")))
            .await
            .unwrap();
        let service = AttachmentService::new(None, repo);

        assert_eq!(
            service.view_file("abc").await.unwrap().as_deref(),
            Some("https://cdn.example.com/abc.jpg")
        );
    }

    #[tokio::test]
    async fn test_view_file_without_storage_fails() {
        let repo = Arc::new(MockAttachmentRepository::new());
        repo.create(input("abc", None)).await.unwrap();
        let service = AttachmentService::new(None, repo);

        let result = service.view_file("abc").await;
        assert!(matches!(result, Err(AttachmentError::NoDownloadSource(id)) if id == "abc"));
    }

    #[tokio::test]
    async fn test_view_file_surfaces_storage_error() {
        let repo = Arc::new(MockAttachmentRepository::new());
        repo.create(input("abc", Some(""))).await.unwrap();
        let config = StorageConfig::new(StorageProvider::local_fs("./test"));
        let storage = Arc::new(StorageService::from_config(config).unwrap());
        let service = AttachmentService::new(Some(storage), repo);

        let result = service.view_file("abc").await;
        assert!(matches!(
            result,
            Err(AttachmentError::Storage(StorageError::PresignNotSupported))
        ));
    }
}
