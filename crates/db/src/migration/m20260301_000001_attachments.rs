//! Attachments migration.
//!
//! Creates the attachments table read by the attachment handlers.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(ATTACHMENTS_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS attachments CASCADE;")
            .await?;
        Ok(())
    }
}

const ATTACHMENTS_SQL: &str = r"
CREATE TABLE attachments (
    id VARCHAR(64) PRIMARY KEY,
    file_name VARCHAR(255) NOT NULL,
    mime_type VARCHAR(100) NOT NULL,
    file_size BIGINT NOT NULL,
    storage_key VARCHAR(500) NOT NULL,
    public_url TEXT,
    metadata JSONB,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_file_size CHECK (file_size >= 0),
    CONSTRAINT chk_id_not_blank CHECK (length(trim(id)) > 0)
);

CREATE INDEX idx_attachments_created ON attachments(created_at DESC);
";
