use thiserror::Error;

use crate::dao::storage::StorageError;

/// Errors that can occur in deck store operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend is unavailable.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Operation required a deck that does not exist.
    #[error("deck `{title}` not found")]
    DeckNotFound {
        /// Title the caller asked for.
        title: String,
    },
    /// A persisted payload exists under the storage key but is not a valid
    /// deck collection. Never silently replaced with an empty one; only a
    /// totally absent payload defaults to empty.
    #[error("persisted deck data is malformed")]
    Malformed(#[source] serde_json::Error),
    /// The deck collection could not be serialized for persistence.
    #[error("failed to encode deck data")]
    Encode(#[source] serde_json::Error),
    /// Invalid input provided by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}
