//! Karat
//!
//! Karat prices jewelry from metal and stone weights, lays out adhesive price
//! labels onto a PDF template, and models the product forms used to maintain a
//! jewelry catalog.

pub mod counter;
pub mod forms;
pub mod hsn;
pub mod labels;
pub mod photos;
pub mod prelude;
pub mod pricing;
pub mod products;
