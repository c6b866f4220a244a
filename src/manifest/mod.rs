//! Manifest module - Owns the output file
//!
//! Provides:
//! - store: staged write and atomic replace of the manifest

pub mod store;
