//! # Page Rendering
//!
//! Pure functions from state to text. Nothing here mutates the cart.
//!
//! ## Page Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │ Shopfront   Home | *Shop* | Cart                       Cart Items: 3   │ ◄─ nav
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │ Shop Page                                                               │
//! │ Here you can view and add items to your shopping cart.                  │
//! │                                                                         │
//! │ [1] Fjallraven Backpack                                  $109.95        │ ◄─ card
//! │     https://fakestoreapi.com/img/81fPKd-2AYL.jpg                        │
//! │     quantity: [-] 0 [+]                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use shopfront_core::{Product, ProductId};

use crate::commands::CartResponse;
use crate::input::QuantityPicker;
use crate::router::Route;
use crate::state::{CatalogState, CatalogStatus, ConfigState};

const RULE: &str = "------------------------------------------------------------";

/// The nav bar shown above every page.
pub fn render_nav(config: &ConfigState, current: Route, item_count: i64) -> String {
    let links: Vec<String> = Route::ALL
        .iter()
        .map(|route| {
            if *route == current {
                format!("*{}*", route.label())
            } else {
                route.label().to_string()
            }
        })
        .collect();

    format!(
        "{}   {}   Cart Items: {}\n{}\n",
        config.store_name,
        links.join(" | "),
        item_count,
        RULE
    )
}

pub fn render_home() -> String {
    [
        "Home Page",
        "Welcome to the shopping cart app!",
        "",
        "Start shopping by navigating to the shop page (type `shop`).",
    ]
    .join("\n")
        + "\n"
}

/// The shop page: loading and error states, or one card per product.
pub fn render_shop(
    catalog: &CatalogState,
    pickers: &HashMap<ProductId, QuantityPicker>,
    config: &ConfigState,
) -> String {
    let mut lines = vec![
        "Shop Page".to_string(),
        "Here you can view and add items to your shopping cart.".to_string(),
        String::new(),
    ];

    match catalog.status() {
        CatalogStatus::Idle | CatalogStatus::Loading => {
            lines.push("Loading products...".to_string());
        }
        CatalogStatus::Failed(err) => {
            lines.push(format!("Error fetching products: {}", err));
            lines.push("Type `refresh` to try again.".to_string());
        }
        CatalogStatus::Loaded(listing) if listing.is_empty() => {
            lines.push("No products available.".to_string());
        }
        CatalogStatus::Loaded(listing) => {
            for product in listing.products() {
                let picker = pickers.get(&product.id).copied().unwrap_or_default();
                lines.push(render_card(product, picker, config));
            }
        }
    }

    lines.join("\n") + "\n"
}

fn render_card(product: &Product, picker: QuantityPicker, config: &ConfigState) -> String {
    let mut card = format!(
        "[{}] {}  {}",
        product.id,
        product.title,
        config.format_currency(product.price)
    );
    if !product.category.is_empty() {
        card.push_str(&format!("  ({})", product.category));
    }
    if let Some(rating) = product.rating {
        card.push_str(&format!("  {:.1}/5 from {}", rating.rate, rating.count));
    }
    card.push_str(&format!("\n    {}", product.image));
    card.push_str(&format!("\n    quantity: [-] {} [+]\n", picker.value()));
    card
}

/// The cart page: one row per line item, then the totals.
pub fn render_cart(cart: &CartResponse, config: &ConfigState) -> String {
    let mut lines = vec!["Cart Page".to_string(), String::new()];

    if cart.items.is_empty() {
        lines.push("Your cart is empty.".to_string());
        return lines.join("\n") + "\n";
    }

    for item in &cart.items {
        lines.push(format!(
            "[{}] {}  x{}  {}",
            item.product_id(),
            item.product().title,
            item.quantity(),
            config.format_currency(item.line_total())
        ));
    }

    lines.push(RULE.to_string());
    lines.push(format!("Items: {}", cart.totals.item_count));
    lines.push(format!("Total: {}", config.format_currency(cart.totals.total)));

    lines.join("\n") + "\n"
}

pub fn render_help() -> String {
    [
        "Commands:",
        "  home | shop | cart      switch page",
        "  go <path>               open a path such as /shop",
        "  inc <id> | dec <id>     step a product's quantity picker",
        "  qty <id> <text>         type into a product's quantity picker",
        "  add <id> [qty]          add the picker's (or the given) quantity",
        "  set <id> <qty>          change a cart item's quantity (at least 1)",
        "  rm <id>                 remove a cart item",
        "  json                    print the cart as JSON",
        "  refresh                 reload the product listing",
        "  help                    show this list",
        "  quit                    leave",
    ]
    .join("\n")
        + "\n"
}
