//! Attachment records and the attachment store.
//!
//! The HTTP layer only reads attachments: it loads a record to hand to the
//! inference gateway, or resolves it to a URL the client is redirected to.
//! Records themselves are written by whoever ingests the files.

mod error;
mod service;
mod types;

pub use error::AttachmentError;
pub use service::{AttachmentRepository, AttachmentService, AttachmentStore};
pub use types::{Attachment, CreateAttachmentInput, RESERVED_IDS, ensure_assignable_id};
