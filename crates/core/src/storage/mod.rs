//! Storage service for attachment files using Apache OpenDAL.
//!
//! This module resolves stored attachment objects to URLs a client can be
//! redirected to. Supported backends:
//! - S3-compatible: Cloudflare R2, Supabase Storage, AWS S3, DigitalOcean Spaces
//! - Azure Blob Storage
//! - Local filesystem (development only, cannot presign)

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{PresignedUrl, StorageService};
