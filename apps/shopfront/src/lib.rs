//! # Shopfront App Library
//!
//! Terminal front-end for the Shopfront cart: a home page, a shop page
//! backed by a remote product listing, and a cart page.
//!
//! ## Module Organization
//! ```text
//! shopfront_app/
//! ├── lib.rs          ◄─── You are here (CLI, startup & run)
//! ├── shell.rs        ◄─── Input loop, navigation, fetch lifecycle
//! ├── router.rs       ◄─── Paths to pages
//! ├── input.rs        ◄─── Quantity text parsing, picker
//! ├── views.rs        ◄─── Page rendering
//! ├── demo.rs         ◄─── Bundled offline listing
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Product listing load status
//! │   └── config.rs   ◄─── Display configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── product.rs  ◄─── Product listing command
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Dependency Injection
//! Exactly one [`CartStore`] is created in [`run`] and moved into the
//! [`Shell`]. Tests build their own store and shell the same way.

pub mod commands;
pub mod demo;
pub mod error;
pub mod input;
pub mod router;
pub mod shell;
pub mod state;
pub mod views;

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shopfront_catalog::{CatalogConfig, HttpProductSource, ProductSource};
use shopfront_core::CartStore;

pub use shell::{RunMode, Shell};
use state::ConfigState;

/// Command line options.
#[derive(Debug, Clone, Parser)]
#[command(name = "shopfront", version, about = "Browse products and fill a shopping cart")]
pub struct Cli {
    /// Catalog config file (TOML). Defaults to the platform config dir.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Product API base URL, overriding config and environment
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Run commands from a file instead of stdin
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Use the bundled sample listing instead of the API
    #[arg(long)]
    pub offline: bool,
}

/// Runs the application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Load catalog config ──────────────────────────────────────────────► │
/// │     • defaults < shopfront.toml < SHOPFRONT_* env < --api-url           │
/// │                                                                         │
/// │  2. Build the product source ─────────────────────────────────────────► │
/// │     • HTTP by default, bundled sample listing with --offline            │
/// │                                                                         │
/// │  3. Create state ─────────────────────────────────────────────────────► │
/// │     • ONE CartStore for the whole session                               │
/// │     • ConfigState from the environment                                  │
/// │                                                                         │
/// │  4. Run the shell on stdin or the --script file ──────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Shopfront");

    let mut catalog_config = match &cli.config {
        Some(path) => CatalogConfig::load(Some(path.clone()))?,
        None => CatalogConfig::load_or_default(None),
    };
    if let Some(url) = &cli.api_url {
        catalog_config.api.base_url = url.clone();
        catalog_config.validate()?;
    }

    let source: Arc<dyn ProductSource> = if cli.offline {
        Arc::new(demo::sample_source()?)
    } else {
        Arc::new(HttpProductSource::new(&catalog_config.api)?)
    };
    info!(source = %source.describe(), "Product source ready");

    let cart = CartStore::new();
    let mut shell = Shell::new(cart, source, catalog_config.retry, ConfigState::from_env());

    let mut stdout = tokio::io::stdout();
    match &cli.script {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            shell
                .run(BufReader::new(file), &mut stdout, RunMode::Script)
                .await?;
        }
        None => {
            shell
                .run(
                    BufReader::new(tokio::io::stdin()),
                    &mut stdout,
                    RunMode::Interactive,
                )
                .await?;
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=shopfront=trace` - Show trace for shopfront crates only
/// - Default: WARN, INFO for shopfront crates
///
/// Logs go to stderr so they never mix with rendered pages.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,shopfront=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
