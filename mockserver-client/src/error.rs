//! Error types for the MockServer client.

use crate::operations::Operation;
use crate::transport::TransportError;
use thiserror::Error;

/// Errors that can occur when driving the MockServer control API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The payload could not be encoded as JSON.
    #[error("failed to serialize request payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The base address or a request URL is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The client could not be built, e.g. a zero timeout or a TLS backend
    /// that failed to initialize.
    #[error("failed to build client: {0}")]
    Build(String),

    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// MockServer answered with a status other than the one the operation expects.
    #[error("error {operation}. received status code: {status} with body: {body}")]
    Rejected {
        /// Operation that was rejected.
        operation: Operation,
        /// HTTP status code returned by MockServer.
        status: u16,
        /// Raw response body, verbatim.
        body: String,
    },
}

impl ClientError {
    /// Status code of a rejected operation, if this is a rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure happened below HTTP, before any status was seen.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
