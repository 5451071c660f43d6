//! Request-level middleware.

use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::ApiResponse;

/// Bound the time spent serving one request.
///
/// A request still running at the deadline is dropped and answered with
/// `504` in the usual envelope; the slow party is a collaborator, not the
/// client.
pub async fn request_deadline(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(%method, %path, limit_ms = limit.as_millis(), "Request timed out");
            ApiResponse::message(StatusCode::GATEWAY_TIMEOUT, "Request timed out.").into_response()
        }
    }
}
