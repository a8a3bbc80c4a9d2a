//! Configuration loading and CLI definitions.
//!
//! A configuration file may be JSON (comments allowed), YAML or TOML; the
//! format is picked from the file extension. Every section is optional and
//! falls back to the constants in `acct_core::defaults`.

mod cli;
mod defaults;
mod loader;
mod types;
mod validate;

pub use cli::{CliOverrides, apply_overrides};
pub use loader::{ConfigError, load_config};
pub use types::*;
pub use validate::validate_config;
