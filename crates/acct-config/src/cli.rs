//! CLI override definitions and application logic.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

#[derive(Debug, Clone, Parser, Default)]
pub struct CliOverrides {
    /// Override HTTP listen address, e.g. 0.0.0.0:8080
    #[arg(long)]
    pub listen: Option<String>,
    /// Override the account data directory
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Override graceful shutdown timeout (seconds)
    #[arg(long)]
    pub shutdown_timeout_secs: Option<u64>,
    /// Override metrics listen address
    #[arg(long)]
    pub metrics_listen: Option<String>,
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long)]
    pub log_level: Option<String>,
    /// Override log format (pretty/compact/json)
    #[arg(long)]
    pub log_format: Option<String>,
    /// Override log output (stdout/stderr)
    #[arg(long)]
    pub log_output: Option<String>,
}

pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) {
    if let Some(v) = &overrides.listen {
        config.server.listen = v.clone();
    }
    if let Some(v) = &overrides.data_dir {
        config.storage.data_dir = v.clone();
    }
    if let Some(v) = overrides.shutdown_timeout_secs {
        config.server.shutdown_timeout_secs = v;
    }
    if let Some(v) = &overrides.metrics_listen {
        config.metrics.listen = Some(v.clone());
    }
    if let Some(v) = &overrides.log_level {
        config.logging.level = Some(v.clone());
    }
    if let Some(v) = &overrides.log_format {
        config.logging.format = Some(v.clone());
    }
    if let Some(v) = &overrides.log_output {
        config.logging.output = Some(v.clone());
    }
}
