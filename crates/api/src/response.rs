//! Response envelope shared by every handler.
//!
//! A handler returns one [`ApiResponse`] value. Producing it is the only way
//! to answer a request, so a handler cannot emit two responses.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use civica_core::voting::{VotingError, VotingReply};
use civica_shared::AppError;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

/// Outcome of a request.
#[derive(Debug)]
pub enum ApiResponse {
    /// `302 Found` to the given location.
    Redirect(HeaderValue),
    /// `{status, message}`, used for failures and empty results.
    Message {
        /// HTTP status.
        status: StatusCode,
        /// Human-readable message.
        message: String,
    },
    /// `{status, data}`, used for successful results.
    Data {
        /// HTTP status.
        status: StatusCode,
        /// Result payload.
        data: Value,
    },
    /// Status and body chosen by a collaborator, passed through unchanged.
    Relayed {
        /// HTTP status.
        status: StatusCode,
        /// Body.
        body: Value,
    },
}

#[derive(Serialize)]
struct Envelope<'a> {
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Value>,
}

impl ApiResponse {
    /// `200` with a data payload.
    #[must_use]
    pub fn ok(data: Value) -> Self {
        Self::Data {
            status: StatusCode::OK,
            data,
        }
    }

    /// Message response with the given status.
    #[must_use]
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Message {
            status,
            message: message.into(),
        }
    }

    /// Status code this response will be sent with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Redirect(_) => StatusCode::FOUND,
            Self::Message { status, .. }
            | Self::Data { status, .. }
            | Self::Relayed { status, .. } => *status,
        }
    }
}

fn status_from_u16(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl From<AppError> for ApiResponse {
    fn from(err: AppError) -> Self {
        Self::message(status_from_u16(err.status_code()), err.message())
    }
}

impl From<Result<VotingReply, VotingError>> for ApiResponse {
    fn from(result: Result<VotingReply, VotingError>) -> Self {
        match result {
            Ok(reply) => Self::Relayed {
                status: status_from_u16(reply.status),
                body: reply.body,
            },
            Err(err) => {
                let status = status_from_u16(err.status_code());
                if status.is_server_error() {
                    error!(error = %err, "Voting request failed");
                } else {
                    warn!(error = %err, "Voting request rejected");
                }
                Self::message(status, err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(location) => (StatusCode::FOUND, [(LOCATION, location)]).into_response(),
            Self::Message { status, message } => {
                let envelope = Envelope {
                    status: status.as_u16(),
                    message: Some(&message),
                    data: None,
                };
                (status, Json(envelope)).into_response()
            }
            Self::Data { status, data } => {
                let envelope = Envelope {
                    status: status.as_u16(),
                    message: None,
                    data: Some(&data),
                };
                (status, Json(envelope)).into_response()
            }
            Self::Relayed { status, body } => (status, Json(body)).into_response(),
        }
    }
}
