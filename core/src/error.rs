//! Error types for the noteof API client.
//!
//! # Design
//! `InvalidCredentials` and `NotFound` get dedicated variants because callers
//! act on them: re-authenticate, or treat a note as already gone. Any other
//! non-success status lands in `ServerError` with the raw status code and body
//! for debugging. `UnexpectedServerResponse` is reserved for replies that
//! break the protocol even though the transport reported success.

use thiserror::Error;

/// Errors returned by the noteof clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 403 for the supplied username/password or token.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The server returned 404, the requested note does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server answered in a way the protocol does not allow.
    #[error("invalid server response (HTTP {status}): {body}")]
    UnexpectedServerResponse { status: u16, body: String },

    /// The server returned a non-success status with no dedicated variant.
    #[error("HTTP {status}: {body}")]
    ServerError { status: u16, body: String },

    /// An update was requested for a note that has no identifier yet.
    #[error("note has no identifier")]
    MissingNoteId,

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl ApiError {
    /// True for a 404, which delete callers usually treat as "already gone".
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// Status code carried by the error, if it came from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::InvalidCredentials => Some(403),
            ApiError::NotFound => Some(404),
            ApiError::UnexpectedServerResponse { status, .. }
            | ApiError::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
