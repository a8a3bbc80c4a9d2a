//! Unified acctstore CLI.
//!
//! This binary provides a unified interface to all acctstore components:
//! - `acctstore server` - Run the HTTP gateway
//! - `acctstore accounts` - Manage stored account records directly
//!
//! Each subcommand can also be run as a standalone binary.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// Acctstore unified CLI.
#[derive(Parser)]
#[command(
    name = "acctstore",
    version,
    about = "A file-backed account record service",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP gateway.
    #[command(name = "server", alias = "serve")]
    Server(Box<acct_server::ServerArgs>),

    /// Manage stored account records.
    #[command(name = "accounts", alias = "acct")]
    Accounts(acct_store::StoreArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Server(args) => acct_server::cli::run(*args).await,
        Commands::Accounts(args) => acct_store::cli::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
