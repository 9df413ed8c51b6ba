//! Error types for the service HTTP client.
//!
//! # Design
//! The request/response surface never returns these: a failed transfer turns
//! into a 404 `Response` plus an error log line. `Error` is only surfaced by
//! the opt-in helpers (JSON body views, configuration loading) and by the
//! `Transport` trait, where the client converts it into a logged status.

use thiserror::Error;

/// Errors produced by fallible helpers in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport engine failed to complete the transfer.
    #[error("transport error: {0}")]
    Transport(String),

    /// A URI could not be parsed into scheme, host and port.
    #[error("invalid URI {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: String },

    /// A header line could not be handed to the transport engine.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A body could not be encoded to or decoded from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration source could not be read.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(err.to_string())
    }
}
