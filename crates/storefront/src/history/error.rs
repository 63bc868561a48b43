use thiserror::Error;

use super::StorageError;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History storage unavailable: {0}")]
    Storage(#[from] StorageError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
