//! Wire format of the catalog API and its conversion into [`Product`].
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "title": "Fjallraven - Foldsack No. 1 Backpack",
//!     "price": 109.95,
//!     "description": "...",
//!     "category": "men's clothing",
//!     "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
//!     "rating": { "rate": 3.9, "count": 120 }
//!   }
//! ]
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

use shopfront_core::validation::validate_product;
use shopfront_core::{Money, Product, Rating, ValidationError};

use crate::error::CatalogResult;

#[derive(Debug, Deserialize)]
struct WireRating {
    rate: f64,
    count: u64,
}

/// One product as the API sends it.
#[derive(Debug, Deserialize)]
struct WireProduct {
    id: u64,
    title: String,
    /// Kept as a JSON number so the price is read from its decimal text.
    price: serde_json::Number,
    image: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    rating: Option<WireRating>,
}

impl TryFrom<WireProduct> for Product {
    type Error = ValidationError;

    fn try_from(wire: WireProduct) -> Result<Self, Self::Error> {
        let price = Money::parse_decimal(&wire.price.to_string())?;

        let mut product = Product::new(wire.id, wire.title.trim(), price, wire.image.trim())
            .with_description(wire.description.unwrap_or_default())
            .with_category(wire.category.unwrap_or_default());
        if let Some(rating) = wire.rating {
            product = product.with_rating(Rating {
                rate: rating.rate,
                count: rating.count,
            });
        }

        validate_product(&product)?;
        Ok(product)
    }
}

/// Decodes a product listing.
///
/// The body must be a JSON array. Entries that fail to decode or validate
/// are skipped with a warning; a duplicate id keeps its first occurrence.
pub fn decode_products(body: &[u8]) -> CatalogResult<Vec<Product>> {
    let entries: Vec<Value> = serde_json::from_slice(body)?;

    let mut seen = HashSet::new();
    let mut products = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let wire: WireProduct = match serde_json::from_value(entry) {
            Ok(wire) => wire,
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed catalog entry");
                continue;
            }
        };

        let id = wire.id;
        let product = match Product::try_from(wire) {
            Ok(product) => product,
            Err(e) => {
                warn!(index, product_id = id, error = %e, "Skipping invalid product");
                continue;
            }
        };

        if !seen.insert(product.id) {
            warn!(index, product_id = id, "Skipping duplicate product id");
            continue;
        }

        products.push(product);
    }

    Ok(products)
}
