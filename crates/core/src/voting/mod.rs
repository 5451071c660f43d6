//! Blockchain voting gateway.
//!
//! Vote casting, candidate registration and lookup, and vote-proof minting
//! are performed by a web3 gateway. This module owns request validation and
//! relays the gateway's reply so the HTTP layer can stay a pure route table.

mod client;
mod error;
mod service;

pub use client::HttpVotingClient;
pub use error::VotingError;
pub use service::{VotingReply, VotingService};
