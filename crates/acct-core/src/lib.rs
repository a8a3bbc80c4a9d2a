//! Core constants shared across acctstore crates.
//!
//! This crate provides:
//! - Default configuration values
//! - Error type labels for metrics/logging

pub mod defaults;
pub mod errors;

// Re-export commonly used items at crate root
pub use defaults::*;
pub use errors::*;

