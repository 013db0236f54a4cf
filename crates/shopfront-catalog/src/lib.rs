//! # shopfront-catalog: Product Catalog for Shopfront
//!
//! Loads the product listing the shop page renders from a REST endpoint
//! (the public fakestore demo API by default).
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shopfront-catalog                            │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐   ┌──────────────┐   ┌──────────────────────┐  │   │
//! │  │  │  config    │──►│   source     │──►│       fetch          │  │   │
//! │  │  │ TOML + env │   │ HTTP / static│   │ retry + cancellation │  │   │
//! │  │  └────────────┘   └──────┬───────┘   └──────────┬───────────┘  │   │
//! │  │                          │                      │              │   │
//! │  │                   ┌──────▼───────┐       FetchOutcome          │   │
//! │  │                   │    wire      │   Loaded / Failed /         │   │
//! │  │                   │ JSON → Product│   Cancelled                │   │
//! │  │                   └──────────────┘                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use std::sync::Arc;
//! use shopfront_catalog::{CatalogConfig, FetchOutcome, HttpProductSource, ProductFetch};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CatalogConfig::load_or_default(None);
//! let source = Arc::new(HttpProductSource::new(&config.api)?);
//!
//! let mut fetch = ProductFetch::spawn(source, config.retry.clone());
//! if let FetchOutcome::Loaded(catalog) = fetch.wait().await {
//!     println!("{} products", catalog.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod source;
pub mod wire;

pub use config::{ApiSettings, CatalogConfig, RetrySettings};
pub use error::{CatalogError, CatalogResult};
pub use fetch::{fetch_with_retry, Catalog, FetchHandle, FetchOutcome, ProductFetch};
pub use source::{HttpProductSource, ProductSource, StaticProductSource};
