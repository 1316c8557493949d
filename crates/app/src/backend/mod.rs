//! Backend
//!
//! HTTP client for the PostgREST row store and the object store that sit
//! behind the Supabase project.

mod client;
mod errors;
mod query;

pub use client::{SupabaseClient, UploadOptions};
pub use errors::BackendError;
pub use query::{Direction, Query, parse_content_range};
