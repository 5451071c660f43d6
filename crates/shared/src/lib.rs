//! Shared errors and configuration for Civica.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types and their HTTP status mapping
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, ServiceEndpointConfig, StorageSettings};
pub use error::AppError;
