//! Catalog
//!
//! Workflows behind the product pages: entry, editing, listing, the display
//! counter, and HSN generation. Each workflow validates locally before it
//! touches the row or object store.

mod errors;
mod listing;
mod service;

pub use errors::CatalogError;
pub use listing::{CatalogPage, ListRequest, PAGE_SIZE};
pub use service::{Catalog, CatalogSettings};
