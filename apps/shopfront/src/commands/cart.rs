//! # Cart Commands
//!
//! Cart manipulation for the view.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐   add_to_cart    ┌──────────┐                             │
//! │  │  Empty   │─────────────────►│ In Cart  │◄──┐ add_to_cart (merge)     │
//! │  │  Cart    │◄─────────────────│          │───┘ update_cart_item        │
//! │  └──────────┘  remove_from_cart└──────────┘     (clamped to >= 1)       │
//! │                (last item)                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these fail because of the cart: a quantity of 0 or an unknown
//! product id is a no-op, and the response simply shows the unchanged cart.

use serde::Serialize;
use tracing::debug;

use shopfront_core::{
    CartChange, CartCommand, CartLineItem, CartState, CartStore, CartTotals, ProductId,
};

use crate::error::ApiError;
use crate::state::CatalogState;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineItem>,
    pub totals: CartTotals,
}

impl From<&CartState> for CartResponse {
    fn from(cart: &CartState) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: cart.totals(),
        }
    }
}

/// Result of pressing "Add To Cart".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartResponse {
    /// Quantity that went into the cart (0 for a no-op)
    pub added: i64,

    pub change: CartChange,

    /// Confirmation shown to the user
    pub message: String,

    pub cart: CartResponse,
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartStore) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds `quantity` of a catalog product to the cart.
///
/// ## Errors
/// - `CATALOG_UNAVAILABLE` when no listing is loaded
/// - `NOT_FOUND` when the listing has no such product
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartStore,
    product_id: ProductId,
    quantity: i64,
) -> Result<AddToCartResponse, ApiError> {
    debug!(product_id = %product_id, quantity, "add_to_cart command");

    let listing = catalog.catalog().ok_or_else(ApiError::catalog_unavailable)?;
    let product = listing
        .get(product_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    let change = cart.dispatch(CartCommand::add(product, quantity));
    let (added, message) = match change {
        CartChange::Changed => (quantity, format!("{} item(s) added to the cart.", quantity)),
        CartChange::Unchanged => (0, "Nothing added".to_string()),
    };

    Ok(AddToCartResponse {
        added,
        change,
        message,
        cart: get_cart(cart),
    })
}

/// Sets the quantity of an item already in the cart (clamped to at least 1).
pub fn update_cart_item(cart: &CartStore, product_id: ProductId, quantity: i64) -> CartResponse {
    debug!(product_id = %product_id, quantity, "update_cart_item command");

    cart.dispatch(CartCommand::set_quantity(product_id, quantity));
    get_cart(cart)
}

/// Removes an item from the cart.
pub fn remove_from_cart(cart: &CartStore, product_id: ProductId) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");

    cart.dispatch(CartCommand::remove(product_id));
    get_cart(cart)
}
