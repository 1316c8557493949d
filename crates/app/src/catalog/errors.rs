//! Catalog errors.

use karat::{forms::FormError, hsn::HsnCode, photos::PhotoCode};
use rusty_money::MoneyError;
use thiserror::Error;

use crate::domain::{
    image_codes::ImageCodesServiceError, products::ProductsServiceError,
    storage::StorageServiceError,
};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("no photo is registered under code {0}")]
    InvalidPhotoCode(PhotoCode),

    #[error("HSN code {0} is already in use")]
    DuplicateHsn(HsnCode),

    #[error("no unused HSN code found after {attempts} attempts")]
    HsnExhausted { attempts: u32 },

    #[error("pages start at 1")]
    PageZero,

    #[error("page {page} is out of range; there are {total_pages} pages")]
    InvalidPage { page: u64, total_pages: u64 },

    #[error("products: {0}")]
    Products(#[from] ProductsServiceError),

    #[error("image codes: {0}")]
    ImageCodes(#[from] ImageCodesServiceError),

    #[error("photo storage: {0}")]
    Storage(#[from] StorageServiceError),

    #[error("counter totals: {0}")]
    Counter(#[from] MoneyError),
}
