//! Attachment routes.
//!
//! Viewing, AI analysis, OCR, credential-photo extraction and face
//! comparison. Each handler resolves its inputs, calls the attachment store
//! and/or the inference gateway, and returns exactly one [`ApiResponse`].
//!
//! Failure mapping:
//!
//! | Failure | Status |
//! |---|---|
//! | missing ID or payload | 400 |
//! | attachment not found | 404 |
//! | gateway rejected the input | 400 |
//! | store, storage or gateway failure | 500 |
//!
//! `credential-photo` and `compare-faces` are route segments, not attachment
//! IDs (see `RESERVED_IDS`); a GET on either answers 405 in the envelope.

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderValue, StatusCode},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{ApiResponse, AppState};
use civica_core::attachment::{Attachment, AttachmentError};
use civica_core::inference::{CredentialPhotoSource, InferenceError};
use civica_shared::AppError;

/// Creates the attachment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/attachment", get(missing_id))
        .route("/attachment/", get(missing_id))
        .route(
            "/attachment/credential-photo",
            get(reserved_segment).post(credential_photo_inline),
        )
        .route(
            "/attachment/compare-faces",
            get(reserved_segment).post(compare_faces),
        )
        .route("/attachment/{id}", get(view_attachment))
        .route("/attachment/{id}/view", get(view_attachment))
        .route(
            "/attachment/{id}/analyze",
            get(analyze_attachment).post(analyze_attachment),
        )
        .route(
            "/attachment/{id}/ocr",
            get(ocr_attachment).post(ocr_attachment),
        )
        .route(
            "/attachment/{id}/credential-photo",
            get(credential_photo_by_id).post(credential_photo_by_id),
        )
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for face comparison.
///
/// IDs may arrive as strings or numbers.
#[derive(Debug, Default, Deserialize)]
pub struct CompareFacesRequest {
    /// First attachment.
    #[serde(default)]
    pub id1: Option<Value>,
    /// Second attachment.
    #[serde(default)]
    pub id2: Option<Value>,
}

// ============================================================================
// Failure Mapping
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Operation {
    View,
    Analyze,
    Ocr,
    CredentialPhoto,
    CompareFaces,
}

impl Operation {
    const fn error_prefix(self) -> &'static str {
        match self {
            Self::View => "Error viewing attachment",
            Self::Analyze | Self::Ocr => "Error analyzing attachment",
            Self::CredentialPhoto => "Error creating credential photo",
            Self::CompareFaces => "Error comparing faces",
        }
    }
}

#[derive(Debug)]
enum Failure {
    MissingId,
    NotFound,
    EmptyAnalysis,
    MissingPayload,
    InvalidPayload(String),
    MissingFaceIds,
    InvalidLocation,
    Store(AttachmentError),
    Inference(InferenceError),
}

impl From<AttachmentError> for Failure {
    fn from(err: AttachmentError) -> Self {
        Self::Store(err)
    }
}

impl From<InferenceError> for Failure {
    fn from(err: InferenceError) -> Self {
        Self::Inference(err)
    }
}

impl Failure {
    fn into_app_error(self, op: Operation) -> AppError {
        let prefix = op.error_prefix();
        match self {
            Self::MissingId => AppError::Validation("Attachment ID is required.".to_string()),
            Self::NotFound => AppError::NotFound("Attachment not found.".to_string()),
            Self::EmptyAnalysis => {
                AppError::ExternalService("Error analyzing attachment.".to_string())
            }
            Self::MissingPayload => {
                AppError::Validation("Attachment payload is required.".to_string())
            }
            Self::InvalidPayload(detail) => {
                AppError::Validation(format!("Invalid request body: {detail}"))
            }
            Self::MissingFaceIds => {
                AppError::Validation("Both id1 and id2 are required.".to_string())
            }
            Self::InvalidLocation => AppError::ExternalService(format!(
                "{prefix}: stored URL is not a valid redirect target"
            )),
            Self::Store(err) => AppError::ExternalService(format!("{prefix}: {err}")),
            Self::Inference(err) if err.is_rejection() => {
                AppError::Rejected(format!("{prefix}: {err}"))
            }
            Self::Inference(err) => AppError::ExternalService(format!("{prefix}: {err}")),
        }
    }
}

/// Collapse an operation result into its single response.
fn respond(op: Operation, attachment_id: &str, result: Result<ApiResponse, Failure>) -> ApiResponse {
    match result {
        Ok(response) => response,
        Err(failure) => {
            let err = failure.into_app_error(op);
            if err.status_code() >= 500 {
                error!(operation = ?op, attachment_id, error = %err, "Attachment request failed");
            } else {
                warn!(operation = ?op, attachment_id, error = %err, "Attachment request rejected");
            }
            err.into()
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn required_id(id: &str) -> Result<&str, Failure> {
    let id = id.trim();
    if id.is_empty() {
        Err(Failure::MissingId)
    } else {
        Ok(id)
    }
}

async fn load_attachment(state: &AppState, id: &str) -> Result<Attachment, Failure> {
    state
        .attachments
        .find_by_id(id)
        .await?
        .ok_or(Failure::NotFound)
}

/// `null`, `false` and `""` count as "no analysis produced".
fn is_empty_result(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn face_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ============================================================================
// Operations
// ============================================================================

async fn view(state: &AppState, id: &str) -> Result<ApiResponse, Failure> {
    let id = required_id(id)?;

    let url = state
        .attachments
        .view_file(id)
        .await?
        .filter(|url| !url.is_empty())
        .ok_or(Failure::NotFound)?;

    let location = HeaderValue::try_from(url).map_err(|_| Failure::InvalidLocation)?;
    info!(attachment_id = %id, "Redirecting to attachment");

    Ok(ApiResponse::Redirect(location))
}

async fn analyze(state: &AppState, id: &str) -> Result<ApiResponse, Failure> {
    let id = required_id(id)?;
    let attachment = load_attachment(state, id).await?;

    let analysis = state.inference.analyze_attachment(&attachment).await?;
    if is_empty_result(&analysis) {
        return Err(Failure::EmptyAnalysis);
    }

    info!(attachment_id = %id, "Attachment analyzed");
    Ok(ApiResponse::ok(analysis))
}

async fn ocr(state: &AppState, id: &str) -> Result<ApiResponse, Failure> {
    let id = required_id(id)?;
    let attachment = load_attachment(state, id).await?;

    let text = state.inference.ocr_analysis(&attachment).await?;

    info!(attachment_id = %id, "OCR completed");
    Ok(ApiResponse::ok(text))
}

async fn credential_photo(
    state: &AppState,
    source: CredentialPhotoSource,
) -> Result<ApiResponse, Failure> {
    let photo = state.inference.credential_photo(source).await?;
    Ok(ApiResponse::ok(photo))
}

fn inline_payload(body: &[u8]) -> Result<Value, Failure> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Failure::MissingPayload);
    }

    let payload: Value =
        serde_json::from_slice(body).map_err(|e| Failure::InvalidPayload(e.to_string()))?;

    match &payload {
        Value::Null => Err(Failure::MissingPayload),
        Value::Object(map) if map.is_empty() => Err(Failure::MissingPayload),
        _ => Ok(payload),
    }
}

async fn compare(state: &AppState, body: &[u8]) -> Result<ApiResponse, Failure> {
    let request: CompareFacesRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CompareFacesRequest::default()
    } else {
        serde_json::from_slice(body).map_err(|e| Failure::InvalidPayload(e.to_string()))?
    };

    let (Some(id1), Some(id2)) = (face_id(request.id1.as_ref()), face_id(request.id2.as_ref()))
    else {
        return Err(Failure::MissingFaceIds);
    };

    let recognition = state.inference.compare_faces(&id1, &id2).await?;

    info!(id1 = %id1, id2 = %id2, "Faces compared");
    Ok(ApiResponse::ok(recognition))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/attachment` and `/attachment/`
async fn missing_id() -> ApiResponse {
    respond(Operation::View, "", Err(Failure::MissingId))
}

/// GET `/attachment/credential-photo` and `/attachment/compare-faces`
async fn reserved_segment() -> ApiResponse {
    ApiResponse::message(
        StatusCode::METHOD_NOT_ALLOWED,
        "This route only accepts POST.",
    )
}

/// GET `/attachment/{id}` and `/attachment/{id}/view`
/// Redirect to the stored file.
async fn view_attachment(State(state): State<AppState>, Path(id): Path<String>) -> ApiResponse {
    respond(Operation::View, &id, view(&state, &id).await)
}

/// GET|POST `/attachment/{id}/analyze`
async fn analyze_attachment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse {
    respond(Operation::Analyze, &id, analyze(&state, &id).await)
}

/// GET|POST `/attachment/{id}/ocr`
async fn ocr_attachment(State(state): State<AppState>, Path(id): Path<String>) -> ApiResponse {
    respond(Operation::Ocr, &id, ocr(&state, &id).await)
}

/// GET|POST `/attachment/{id}/credential-photo`
/// Extract the credential photo from a stored attachment.
async fn credential_photo_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse {
    let result = match required_id(&id) {
        Ok(id) => {
            credential_photo(&state, CredentialPhotoSource::ByReference(id.to_string())).await
        }
        Err(failure) => Err(failure),
    };
    respond(Operation::CredentialPhoto, &id, result)
}

/// POST `/attachment/credential-photo`
/// Extract the credential photo from an attachment payload in the body.
async fn credential_photo_inline(State(state): State<AppState>, body: Bytes) -> ApiResponse {
    let result = match inline_payload(&body) {
        Ok(payload) => credential_photo(&state, CredentialPhotoSource::Inline(payload)).await,
        Err(failure) => Err(failure),
    };
    respond(Operation::CredentialPhoto, "", result)
}

/// POST `/attachment/compare-faces`
async fn compare_faces(State(state): State<AppState>, body: Bytes) -> ApiResponse {
    respond(Operation::CompareFaces, "", compare(&state, &body).await)
}
