//! Products
//!
//! Rows of the `products` table and the service over them.

pub mod errors;
pub mod records;
pub mod service;

pub use errors::ProductsServiceError;
pub use service::*;
