//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod attachments;
pub mod health;
pub mod web3;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(attachments::routes())
        .nest("/web3", web3::routes())
}
