//! Voting service contract.

use async_trait::async_trait;
use serde_json::Value;

use super::error::VotingError;

/// Reply shaped by the voting service; relayed verbatim to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct VotingReply {
    /// HTTP status.
    pub status: u16,
    /// JSON body.
    pub body: Value,
}

/// Operations offered by the web3 voting gateway.
#[async_trait]
pub trait VotingService: Send + Sync {
    /// Record a vote on chain.
    async fn cast_vote(&self, request: Value) -> Result<VotingReply, VotingError>;

    /// Register a candidate.
    async fn add_candidate(&self, request: Value) -> Result<VotingReply, VotingError>;

    /// Fetch a candidate by ID.
    async fn get_candidate(&self, id: &str) -> Result<VotingReply, VotingError>;

    /// Mint a token proving a vote was cast.
    async fn mint_vote_proof(&self, request: Value) -> Result<VotingReply, VotingError>;
}
