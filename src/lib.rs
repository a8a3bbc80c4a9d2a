//! # acctstore
//!
//! A file-backed store of user account records with a validating JSON codec
//! and an HTTP gateway.
//!
//! ## Crates
//!
//! - [`acct_core`] - Default values and error labels
//! - [`acct_store`] - Record model, codec, file store and account service
//! - [`acct_config`] - Configuration loading and validation
//! - [`acct_metrics`] - Prometheus-compatible metrics
//! - [`acct_server`] - HTTP gateway

pub use acct_config as config;
pub use acct_core as core;
pub use acct_metrics as metrics;
pub use acct_server as server;
pub use acct_store as store;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use acct_config::{Config, load_config, validate_config};
    pub use acct_server::{CancellationToken, ServerError, run_with_shutdown, serve};
    pub use acct_store::{
        Account, AccountError, AccountService, AccountStore, FileStore, Sex, codec,
    };
}
