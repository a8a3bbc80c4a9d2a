//! Account store standalone binary.

use std::process::ExitCode;

use acct_store::{StoreArgs, cli};
use clap::Parser;

fn main() -> ExitCode {
    let args = StoreArgs::parse();

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
