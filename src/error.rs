//! Error types for the chat client
//!
//! Storage errors come from the local key-value store backing the session
//! identifier. Chat errors come from the single outbound request; the
//! controller collapses all of them into one user-visible reply.

use thiserror::Error;

/// Errors raised by the local key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the storage file failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage file could not be (de)serialized
    #[error("Storage JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Storage file parsed but its contents are not usable
    #[error("Invalid storage data: {0}")]
    InvalidData(String),
}

/// Errors raised while exchanging a message with the chat endpoint
#[derive(Error, Debug)]
pub enum ChatError {
    /// Request could not be sent or the connection failed
    #[error("Failed to send chat request: {0}")]
    Request(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("Chat endpoint returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// Response body was not the expected JSON shape
    #[error("Failed to decode chat response: {0}")]
    Decode(String),

    /// The request task died before producing an outcome
    #[error("Chat request aborted: {0}")]
    Aborted(String),
}
