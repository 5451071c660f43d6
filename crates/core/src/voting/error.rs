//! Voting error types.

use thiserror::Error;

/// Voting gateway errors.
#[derive(Debug, Error)]
pub enum VotingError {
    /// Request rejected before reaching the gateway.
    #[error("{0}")]
    Validation(String),

    /// The gateway could not be reached.
    #[error("web3 gateway unreachable: {0}")]
    Transport(String),

    /// The gateway replied with a body that is not JSON.
    #[error("invalid web3 gateway response: {0}")]
    Decode(String),
}

impl VotingError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Transport(_) | Self::Decode(_) => 500,
        }
    }
}
