//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - Attachment routes (view, analysis, OCR, credential photo, face comparison)
//! - Web3 voting routes
//! - The response envelope every handler returns

pub mod middleware;
pub mod response;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit, middleware::from_fn_with_state};
use civica_core::attachment::AttachmentStore;
use civica_core::inference::InferenceService;
use civica_core::voting::VotingService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use response::ApiResponse;

/// Largest accepted request body; inline attachment payloads dominate.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Attachment records and download URLs.
    pub attachments: Arc<dyn AttachmentStore>,
    /// AI inference gateway.
    pub inference: Arc<dyn InferenceService>,
    /// Web3 voting gateway.
    pub voting: Arc<dyn VotingService>,
}

/// Creates the main application router.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(from_fn_with_state(
            request_timeout,
            middleware::request_deadline,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
