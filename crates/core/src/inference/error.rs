//! Inference error types.

use thiserror::Error;

/// Inference gateway errors.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The gateway refused the input (4xx reply).
    #[error("{0}")]
    Rejected(String),

    /// The gateway failed while processing (5xx reply).
    #[error("inference service returned {status}: {message}")]
    Upstream {
        /// HTTP status returned by the gateway.
        status: u16,
        /// Message extracted from the reply.
        message: String,
    },

    /// The gateway could not be reached.
    #[error("inference service unreachable: {0}")]
    Transport(String),

    /// The gateway replied with a body that is not JSON.
    #[error("invalid inference response: {0}")]
    Decode(String),
}

impl InferenceError {
    /// Whether the failure was caused by the request content rather than
    /// the gateway.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
