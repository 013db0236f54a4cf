//! # Cart Store
//!
//! Shared, thread-safe handle around one [`CartState`].
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every component that needs the cart receives a clone of the handle
//! 2. `Add` decides merge-or-append from a read of `items`, so the read and
//!    the write must happen under one lock scope
//! 3. The background product fetch may run on another thread
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Wiring                                    │
//! │                                                                         │
//! │  main ──► CartStore::new() ──┬──► shell    (dispatch, with_cart)        │
//! │                              ├──► commands (dispatch, snapshot)         │
//! │                              └──► views    (item_count, totals)         │
//! │                                                                         │
//! │  One store per session. No global, no ambient lookup: whoever needs    │
//! │  the cart is handed a clone of this handle.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;
use uuid::Uuid;

use crate::cart::{CartChange, CartCommand, CartState, CartTotals};
use crate::money::Money;

/// Cloneable handle to the session's cart.
#[derive(Debug, Clone)]
pub struct CartStore {
    session_id: Uuid,
    cart: Arc<Mutex<CartState>>,
}

impl CartStore {
    /// Creates a store holding an empty cart for a new session.
    pub fn new() -> Self {
        Self::with_state(CartState::new())
    }

    /// Creates a store seeded with an existing state.
    pub fn with_state(state: CartState) -> Self {
        CartStore {
            session_id: Uuid::new_v4(),
            cart: Arc::new(Mutex::new(state)),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Locks the cart. A poisoned lock is recovered: every command leaves
    /// the state consistent before it returns, so the data is still valid.
    fn lock(&self) -> MutexGuard<'_, CartState> {
        self.cart
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Applies one command atomically.
    pub fn dispatch(&self, command: CartCommand) -> CartChange {
        let name = command.name();
        let product_id = command.product_id();

        let mut cart = self.lock();
        let change = cart.apply(command);

        debug!(
            session_id = %self.session_id,
            command = name,
            product_id = %product_id,
            changed = change.is_changed(),
            item_count = cart.item_count(),
            "cart command applied"
        );

        change
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartState) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> CartState {
        self.with_cart(CartState::clone)
    }

    pub fn item_count(&self) -> i64 {
        self.with_cart(CartState::item_count)
    }

    pub fn total(&self) -> Money {
        self.with_cart(CartState::total)
    }

    pub fn totals(&self) -> CartTotals {
        self.with_cart(CartState::totals)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;
    use std::thread;

    fn product(id: u64, price_cents: i64) -> Product {
        Product::new(
            id,
            format!("Product {}", id),
            Money::from_cents(price_cents),
            "https://img.example/p.jpg",
        )
    }

    #[test]
    fn test_clones_share_one_cart() {
        let store = CartStore::new();
        let view_handle = store.clone();

        store.dispatch(CartCommand::add(product(1, 999), 2));

        assert_eq!(view_handle.item_count(), 2);
        assert_eq!(view_handle.total(), Money::from_cents(1998));
        assert_eq!(view_handle.session_id(), store.session_id());
    }

    #[test]
    fn test_dispatch_reports_noops() {
        let store = CartStore::new();
        assert_eq!(
            store.dispatch(CartCommand::add(product(1, 100), 0)),
            CartChange::Unchanged
        );
        assert_eq!(store.dispatch(CartCommand::remove(1u64)), CartChange::Unchanged);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_concurrent_adds_merge_atomically() {
        let store = CartStore::new();

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        store.dispatch(CartCommand::add(product(1, 10), 1));
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        let cart = store.snapshot();
        assert_eq!(cart.distinct_items(), 1);
        assert_eq!(cart.item_count(), 800);
        assert_eq!(cart.total(), Money::from_cents(8000));
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let store = CartStore::new();
        store.dispatch(CartCommand::add(product(1, 100), 1));

        let poisoner = store.clone();
        let _ = thread::spawn(move || {
            poisoner.with_cart(|_| panic!("view crashed while reading"));
        })
        .join();

        assert_eq!(store.item_count(), 1);
        store.dispatch(CartCommand::add(product(1, 100), 1));
        assert_eq!(store.item_count(), 2);
    }
}
