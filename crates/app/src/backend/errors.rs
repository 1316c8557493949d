//! Backend errors.

use thiserror::Error;

/// Errors raised while talking to the row or object store.
#[derive(Debug, Error)]
pub enum BackendError {
    /// An HTTP transport or decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested row or object does not exist.
    #[error("not found")]
    NotFound,

    /// The store returned a non-2xx response or unexpected body.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),
}
