//! Catalog, label printing, and photo capture services for the karat shop
//! tools.

pub mod backend;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod context;
pub mod domain;
pub mod labels;
pub mod observability;
pub mod print;

#[cfg(test)]
mod test;
