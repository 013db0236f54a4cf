//! # Commands Module
//!
//! The operations the shell invokes. Each command declares only the state
//! it needs and returns a serializable response.
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── get / add / update / remove
//! └── product.rs  ◄─── Product listing
//! ```
//!
//! ## State Injection
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartStore) -> CartResponse
//!
//! // Needs both: the product is resolved from the loaded listing
//! fn add_to_cart(catalog: &CatalogState, cart: &CartStore, ...) -> Result<_, ApiError>
//! ```

pub mod cart;
pub mod product;

pub use cart::{
    add_to_cart, get_cart, remove_from_cart, update_cart_item, AddToCartResponse, CartResponse,
};
pub use product::list_products;
