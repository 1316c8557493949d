//! Object Storage

pub mod errors;
pub mod service;

pub use errors::StorageServiceError;
pub use service::*;
