//! # shopfront-core: Pure Cart Logic for Shopfront
//!
//! This crate holds the cart state machine and the value types around it.
//! It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/shopfront (terminal view)                  │   │
//! │  │     Home ──► Shop (product cards) ──► Cart (line items, total)  │   │
//! │  └───────────────┬─────────────────────────────┬───────────────────┘   │
//! │                  │ fetch                       │ dispatch / read       │
//! │  ┌───────────────▼───────────────┐  ┌──────────▼──────────────────┐   │
//! │  │      shopfront-catalog        │  │ ★ shopfront-core (HERE) ★   │   │
//! │  │  REST product listing         │  │  CartStore, CartState,      │   │
//! │  │  retry, cancellation          │  │  Money, Product             │   │
//! │  └───────────────────────────────┘  └─────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Line items, the three cart commands, `reduce`, totals
//! - [`store`] - `CartStore`, the shared handle injected into the view layer
//! - [`money`] - Money type with exact decimal arithmetic
//! - [`types`] - Product and ProductId
//! - [`validation`] - Product ingestion rules
//! - [`error`] - Validation error type
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{CartCommand, CartStore, Money, Product};
//!
//! let store = CartStore::new();
//! let shirt = Product::new(1u64, "Shirt", Money::from_cents(999), "https://img/1.jpg");
//!
//! store.dispatch(CartCommand::add(shirt.clone(), 1));
//! store.dispatch(CartCommand::add(shirt, 1));
//!
//! assert_eq!(store.item_count(), 2);
//! assert_eq!(store.total().to_string(), "$19.98");
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

pub use cart::{reduce, CartChange, CartCommand, CartLineItem, CartState, CartTotals};
pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use store::CartStore;
pub use types::{Product, ProductId, Rating};
