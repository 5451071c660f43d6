//! Attachment repository for database operations.
//!
//! Implements the core attachment persistence trait using SeaORM.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use crate::entities::attachments;
use civica_core::attachment::{
    Attachment, AttachmentError, AttachmentRepository as AttachmentRepoTrait,
    CreateAttachmentInput, ensure_assignable_id,
};

/// Attachment repository implementation.
#[derive(Debug, Clone)]
pub struct AttachmentRepository {
    db: DatabaseConnection,
}

impl AttachmentRepository {
    /// Create a new attachment repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl AttachmentRepoTrait for AttachmentRepository {
    async fn create(&self, input: CreateAttachmentInput) -> Result<Attachment, AttachmentError> {
        let id = input
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::now_v7().to_string());
        ensure_assignable_id(&id)?;

        let active_model = attachments::ActiveModel {
            id: Set(id),
            file_name: Set(input.filename),
            mime_type: Set(input.mime_type),
            file_size: Set(input.file_size),
            storage_key: Set(input.storage_key),
            public_url: Set(input.public_url),
            metadata: Set(input.metadata),
            created_at: Set(Utc::now().into()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?;

        Ok(to_domain(model))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Attachment>, AttachmentError> {
        let model = attachments::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| AttachmentError::repository(e.to_string()))?;

        Ok(model.map(to_domain))
    }
}

/// Convert database model to domain model.
fn to_domain(model: attachments::Model) -> Attachment {
    Attachment {
        id: model.id,
        filename: model.file_name,
        mime_type: model.mime_type,
        file_size: model.file_size,
        storage_key: model.storage_key,
        public_url: model.public_url,
        metadata: model.metadata,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
