//! # Shopfront Entry Point
//!
//! ```text
//! $ shopfront                       # interactive, live product API
//! $ shopfront --offline             # bundled sample listing
//! $ shopfront --script demo.txt     # run commands from a file
//! ```
//!
//! The actual setup is in lib.rs for testability.

use clap::Parser;
use std::process::ExitCode;

use shopfront_app::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    shopfront_app::init_tracing();

    let cli = Cli::parse();
    match shopfront_app::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Shopfront stopped: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
