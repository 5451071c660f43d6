//! Inference request types.

use serde_json::{Value, json};

/// Where the credential photo is extracted from.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialPhotoSource {
    /// A stored attachment, by ID.
    ByReference(String),
    /// An attachment payload supplied inline by the client.
    Inline(Value),
}

impl CredentialPhotoSource {
    /// JSON body sent to the gateway.
    #[must_use]
    pub fn to_request_body(&self) -> Value {
        match self {
            Self::ByReference(id) => json!({ "id": id }),
            Self::Inline(payload) => json!({ "attachment": payload }),
        }
    }
}
