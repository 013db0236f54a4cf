//! # State Module
//!
//! Application state the shell hands to commands. The cart itself is the
//! `CartStore` from `shopfront-core`; it is built once in `main` and passed
//! in, never reached through a global.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │  CartStore   │  │  CatalogState    │  │   ConfigState    │          │
//! │  │  (core)      │  │                  │  │                  │          │
//! │  │  Arc<Mutex<  │  │  Idle / Loading  │  │  store_name      │          │
//! │  │   CartState  │  │  Loaded / Failed │  │  currency        │          │
//! │  │  >>          │  │                  │  │                  │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  CartStore: shared handle, atomic per command                          │
//! │  CatalogState: owned by the shell loop (single UI actor)               │
//! │  ConfigState: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;

pub use catalog::{CatalogState, CatalogStatus};
pub use config::ConfigState;
