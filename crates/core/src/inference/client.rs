//! HTTP implementation of the inference service.

use async_trait::async_trait;
use civica_shared::ServiceEndpointConfig;
use reqwest::Method;
use serde_json::{Value, json};

use super::error::InferenceError;
use super::service::InferenceService;
use super::types::CredentialPhotoSource;
use crate::attachment::Attachment;
use crate::gateway::{GatewayClient, GatewayFailure, error_message};

/// Inference service reached over JSON/HTTP.
///
/// Every operation is a `POST` to `{base_url}/{operation}`.
#[derive(Debug, Clone)]
pub struct HttpInferenceClient {
    gateway: GatewayClient,
}

impl HttpInferenceClient {
    /// Create a client for the configured gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ServiceEndpointConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            gateway: GatewayClient::new(config)?,
        })
    }

    async fn call(&self, path: &str, body: &Value) -> Result<Value, InferenceError> {
        let reply = self
            .gateway
            .send(Method::POST, path, Some(body))
            .await
            .map_err(|failure| match failure {
                GatewayFailure::Transport(msg) => InferenceError::Transport(msg),
                GatewayFailure::Decode(msg) => InferenceError::Decode(msg),
            })?;

        if reply.status.is_success() {
            Ok(reply.body)
        } else if reply.status.is_client_error() {
            Err(InferenceError::Rejected(error_message(&reply)))
        } else {
            Err(InferenceError::Upstream {
                status: reply.status.as_u16(),
                message: error_message(&reply),
            })
        }
    }
}

#[async_trait]
impl InferenceService for HttpInferenceClient {
    async fn analyze_attachment(&self, attachment: &Attachment) -> Result<Value, InferenceError> {
        self.call("analyze", &json!({ "attachment": attachment })).await
    }

    async fn ocr_analysis(&self, attachment: &Attachment) -> Result<Value, InferenceError> {
        self.call("ocr", &json!({ "attachment": attachment })).await
    }

    async fn credential_photo(
        &self,
        source: CredentialPhotoSource,
    ) -> Result<Value, InferenceError> {
        self.call("credential-photo", &source.to_request_body())
            .await
    }

    async fn compare_faces(&self, id1: &str, id2: &str) -> Result<Value, InferenceError> {
        self.call("compare-faces", &json!({ "id1": id1, "id2": id2 }))
            .await
    }
}
