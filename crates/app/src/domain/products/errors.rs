//! Products service errors.

use karat::{hsn::HsnError, products::ProductId};
use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("product {id} has an invalid HSN code")]
    InvalidRecord {
        id: ProductId,
        #[source]
        source: HsnError,
    },

    #[error("storage error")]
    Backend(#[source] BackendError),
}

impl From<BackendError> for ProductsServiceError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::NotFound => Self::NotFound,
            error => Self::Backend(error),
        }
    }
}
