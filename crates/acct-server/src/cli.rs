//! CLI module for acct-server.
//!
//! This module provides the command-line interface that can be used either
//! as a standalone binary or as a subcommand of the main acctstore CLI.

use std::io;
use std::path::PathBuf;

use acct_config::{
    CliOverrides, Config, LoggingConfig, apply_overrides, load_config, validate_config,
};
use acct_core::{DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL, DEFAULT_LOG_OUTPUT};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, fmt, fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{CancellationToken, run_with_shutdown};

/// Account server CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "acct-server", version, about = "HTTP gateway for account records")]
pub struct ServerArgs {
    /// Config file path (json/jsonc/yaml/toml). Built-in defaults when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: CliOverrides,
}

/// Run the account server with the given arguments.
///
/// This is the main entry point for the server CLI, used by both the
/// standalone binary and the unified acctstore CLI.
pub async fn run(args: ServerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    apply_overrides(&mut config, &args.overrides);
    validate_config(&config)?;

    init_tracing(&config.logging);

    if let Some(listen) = &config.metrics.listen {
        match acct_metrics::init_prometheus(listen) {
            Ok(()) => info!("metrics exporter listening on {}", listen),
            Err(e) => warn!("failed to start metrics exporter: {}", e),
        }
    }

    // Set up graceful shutdown on SIGTERM/SIGINT
    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal_handler().await;
        info!("shutdown signal received");
        shutdown_signal.cancel();
    });

    run_with_shutdown(config, shutdown).await?;
    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT).
async fn shutdown_signal_handler() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

/// Filter directives: the base level followed by per-module overrides,
/// sorted by module so the result is stable.
fn filter_directives(config: &LoggingConfig) -> String {
    let mut directives = config
        .level
        .as_deref()
        .unwrap_or(DEFAULT_LOG_LEVEL)
        .to_ascii_lowercase();

    let mut filters: Vec<_> = config.filters.iter().collect();
    filters.sort();
    for (module, level) in filters {
        directives.push_str(&format!(",{module}={level}"));
    }
    directives
}

/// Initialize tracing subscriber with the given logging configuration.
///
/// Supports:
/// - `level`: Base log level (trace, debug, info, warn, error)
/// - `format`: Output format (json, pretty, compact). Default: pretty
/// - `output`: Output target (stdout, stderr). Default: stderr
/// - `filters`: Per-module log level overrides
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(filter_directives(config))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let format = config
        .format
        .as_deref()
        .unwrap_or(DEFAULT_LOG_FORMAT)
        .to_ascii_lowercase();
    let output = config
        .output
        .as_deref()
        .unwrap_or(DEFAULT_LOG_OUTPUT)
        .to_ascii_lowercase();

    let writer = match output.as_str() {
        "stdout" => BoxMakeWriter::new(io::stdout),
        _ => BoxMakeWriter::new(io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format.as_str() {
        "json" => registry.with(fmt::layer().json().with_writer(writer)).init(),
        "compact" => registry
            .with(fmt::layer().compact().with_writer(writer))
            .init(),
        // pretty is default
        _ => registry.with(fmt::layer().with_writer(writer)).init(),
    }
}
