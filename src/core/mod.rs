//! Core module - Shared building blocks
//!
//! This module provides:
//! - The error taxonomy for listing runs
//! - Path resolution for roots and manifests
//! - Logging setup

pub mod error;
pub mod logging;
pub mod paths;
