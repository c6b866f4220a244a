//! Backends module - File system operations
//!
//! Provides:
//! - walk: Directory traversal with walkdir

pub mod walk;
