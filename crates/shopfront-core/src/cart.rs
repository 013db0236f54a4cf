//! # Cart State Machine
//!
//! The cart is a single aggregate driven by a closed set of three commands.
//!
//! ## Command Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Command                       Condition            Effect              │
//! │  ───────                       ─────────            ──────              │
//! │                                                                         │
//! │  Add { product, qty }          qty <= 0             no-op               │
//! │                                id in cart           qty += n (merge)    │
//! │                                id not in cart       push at end         │
//! │                                                                         │
//! │  SetQuantity { id, qty }       id in cart           qty = max(1, n)     │
//! │                                id not in cart       no-op               │
//! │                                                                         │
//! │  Remove { id }                 id in cart           item deleted        │
//! │                                id not in cart       no-op               │
//! │                                                                         │
//! │  NOTE: no command ever fails. No-ops report CartChange::Unchanged.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Every line item has `quantity >= 1`
//! - Line items are unique by `product.id`
//! - Items keep the order of their first add
//! - Item count and total are derived on every read, never stored

use serde::Serialize;

use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Line Item
// =============================================================================

/// One distinct product and its accumulated quantity.
///
/// Fields are private so the `quantity >= 1` floor can only be reached
/// through [`CartState::apply`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    product: Product,
    quantity: i64,
}

impl CartLineItem {
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Commands
// =============================================================================

/// The closed set of cart commands.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Merge `quantity` into the product's line item, appending it if absent.
    Add { product: Product, quantity: i64 },

    /// Replace a line item's quantity, clamped to at least 1.
    SetQuantity { product_id: ProductId, quantity: i64 },

    /// Delete a line item.
    Remove { product_id: ProductId },
}

impl CartCommand {
    pub fn add(product: Product, quantity: i64) -> Self {
        CartCommand::Add { product, quantity }
    }

    pub fn set_quantity(product_id: impl Into<ProductId>, quantity: i64) -> Self {
        CartCommand::SetQuantity {
            product_id: product_id.into(),
            quantity,
        }
    }

    pub fn remove(product_id: impl Into<ProductId>) -> Self {
        CartCommand::Remove {
            product_id: product_id.into(),
        }
    }

    /// The product this command targets.
    pub fn product_id(&self) -> ProductId {
        match self {
            CartCommand::Add { product, .. } => product.id,
            CartCommand::SetQuantity { product_id, .. } => *product_id,
            CartCommand::Remove { product_id } => *product_id,
        }
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::Add { .. } => "add",
            CartCommand::SetQuantity { .. } => "set_quantity",
            CartCommand::Remove { .. } => "remove",
        }
    }
}

/// Whether applying a command modified the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CartChange {
    Unchanged,
    Changed,
}

impl CartChange {
    pub fn is_changed(&self) -> bool {
        matches!(self, CartChange::Changed)
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The cart aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartLineItem>,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState { items: Vec::new() }
    }

    /// Line items in first-add order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up the line item for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    /// Applies a command in place.
    pub fn apply(&mut self, command: CartCommand) -> CartChange {
        match command {
            CartCommand::Add { product, quantity } => self.add(product, quantity),
            CartCommand::SetQuantity {
                product_id,
                quantity,
            } => self.set_quantity(product_id, quantity),
            CartCommand::Remove { product_id } => self.remove(product_id),
        }
    }

    fn add(&mut self, product: Product, quantity: i64) -> CartChange {
        if quantity <= 0 {
            return CartChange::Unchanged;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            let merged = item.quantity.saturating_add(quantity);
            if merged == item.quantity {
                return CartChange::Unchanged;
            }
            item.quantity = merged;
            return CartChange::Changed;
        }

        self.items.push(CartLineItem { product, quantity });
        CartChange::Changed
    }

    fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> CartChange {
        let quantity = quantity.max(1);

        match self.items.iter_mut().find(|i| i.product.id == product_id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                CartChange::Changed
            }
            _ => CartChange::Unchanged,
        }
    }

    fn remove(&mut self, product_id: ProductId) -> CartChange {
        let before = self.items.len();
        self.items.retain(|i| i.product.id != product_id);

        if self.items.len() < before {
            CartChange::Changed
        } else {
            CartChange::Unchanged
        }
    }

    /// Sum of quantities across all line items.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Number of distinct products.
    pub fn distinct_items(&self) -> usize {
        self.items.len()
    }

    /// Sum of price × quantity across all line items.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Derived values in one summary.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

/// Pure transition: consumes a state and returns the next one.
///
/// ```rust
/// use shopfront_core::cart::{reduce, CartCommand, CartState};
/// use shopfront_core::money::Money;
/// use shopfront_core::types::Product;
///
/// let product = Product::new(1u64, "Backpack", Money::from_cents(999), "https://img/1.jpg");
/// let state = reduce(CartState::new(), CartCommand::add(product, 2));
/// assert_eq!(state.item_count(), 2);
/// assert_eq!(state.total(), Money::from_cents(1998));
/// ```
pub fn reduce(mut state: CartState, command: CartCommand) -> CartState {
    state.apply(command);
    state
}

// =============================================================================
// Totals
// =============================================================================

/// Cart summary for rendering and JSON responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: i64,
    pub distinct_items: usize,
    pub total: Money,
}

impl From<&CartState> for CartTotals {
    fn from(cart: &CartState) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            distinct_items: cart.distinct_items(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
