//! Core domain logic for Civica.
//!
//! This crate holds the domain types and the contracts of every collaborator
//! the HTTP layer talks to. It has ZERO web framework or database
//! dependencies; persistence is plugged in through [`attachment::AttachmentRepository`].
//!
//! # Modules
//!
//! - `attachment` - Attachment records and the attachment store
//! - `storage` - Object storage and presigned download URLs
//! - `inference` - AI analysis, OCR, credential photos and face comparison
//! - `voting` - Blockchain voting gateway

pub mod attachment;
mod gateway;
pub mod inference;
pub mod storage;
pub mod voting;
