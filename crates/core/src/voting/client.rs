//! HTTP implementation of the voting service.

use async_trait::async_trait;
use civica_shared::ServiceEndpointConfig;
use reqwest::Method;
use serde_json::Value;
use tracing::warn;

use super::error::VotingError;
use super::service::{VotingReply, VotingService};
use crate::gateway::{GatewayClient, GatewayFailure};

/// Voting service backed by a web3 gateway.
///
/// | Operation | Gateway call |
/// |---|---|
/// | cast vote | `POST /votes` |
/// | add candidate | `POST /candidates` |
/// | get candidate | `GET /candidates/{id}` |
/// | mint proof | `POST /proofs` |
#[derive(Debug, Clone)]
pub struct HttpVotingClient {
    gateway: GatewayClient,
}

impl HttpVotingClient {
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

    async fn relay(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<VotingReply, VotingError> {
        let reply = self
            .gateway
            .send(method, path, body)
            .await
            .map_err(|failure| match failure {
                GatewayFailure::Transport(msg) => VotingError::Transport(msg),
                GatewayFailure::Decode(msg) => VotingError::Decode(msg),
            })?;

        if !reply.status.is_success() {
            warn!(status = %reply.status, path, "Web3 gateway returned an error");
        }

        Ok(VotingReply {
            status: reply.status.as_u16(),
            body: reply.body,
        })
    }
}

/// Request bodies must be JSON objects.
fn require_object(request: &Value) -> Result<(), VotingError> {
    if request.is_object() {
        Ok(())
    } else {
        Err(VotingError::Validation(
            "Request body must be a JSON object.".to_string(),
        ))
    }
}

#[async_trait]
impl VotingService for HttpVotingClient {
    async fn cast_vote(&self, request: Value) -> Result<VotingReply, VotingError> {
        require_object(&request)?;
        self.relay(Method::POST, "votes", Some(&request)).await
    }

    async fn add_candidate(&self, request: Value) -> Result<VotingReply, VotingError> {
        require_object(&request)?;
        self.relay(Method::POST, "candidates", Some(&request)).await
    }

    async fn get_candidate(&self, id: &str) -> Result<VotingReply, VotingError> {
        let id = id.trim();
        if id.is_empty() || id.contains('/') {
            return Err(VotingError::Validation(
                "A valid candidate ID is required.".to_string(),
            ));
        }
        self.relay(Method::GET, &format!("candidates/{id}"), None)
            .await
    }

    async fn mint_vote_proof(&self, request: Value) -> Result<VotingReply, VotingError> {
        require_object(&request)?;
        self.relay(Method::POST, "proofs", Some(&request)).await
    }
}
