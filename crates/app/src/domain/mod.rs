//! Karat Domain Concerns

pub mod image_codes;
pub mod products;
pub mod storage;
