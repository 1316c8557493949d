//! Image Codes
//!
//! Registry mapping short photo codes to stored photo names.

pub mod errors;
pub mod records;
pub mod service;

pub use errors::ImageCodesServiceError;
pub use service::*;
