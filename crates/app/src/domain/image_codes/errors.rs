//! Image codes service errors.

use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum ImageCodesServiceError {
    #[error("storage error")]
    Backend(#[from] BackendError),
}
