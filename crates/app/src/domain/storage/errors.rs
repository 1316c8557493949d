//! Storage service errors.

use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum StorageServiceError {
    #[error("object not found")]
    NotFound,

    #[error("storage error")]
    Backend(#[source] BackendError),
}

impl From<BackendError> for StorageServiceError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::NotFound => Self::NotFound,
            error => Self::Backend(error),
        }
    }
}
