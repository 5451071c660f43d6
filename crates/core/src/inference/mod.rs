//! AI inference gateway.
//!
//! Covers general attachment analysis, OCR, credential-photo extraction and
//! face comparison. Results are opaque JSON owned by the gateway and passed
//! through untouched.

mod client;
mod error;
mod service;
mod types;

pub use client::HttpInferenceClient;
pub use error::InferenceError;
pub use service::InferenceService;
pub use types::CredentialPhotoSource;
