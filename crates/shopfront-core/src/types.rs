//! # Domain Types
//!
//! Product types shared by the catalog and the cart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    ProductId    │   │     Product     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  u64 (catalog)  │◄──│  id             │                             │
//! │  └─────────────────┘   │  title          │                             │
//! │                        │  price (Money)  │                             │
//! │                        │  image (URI)    │                             │
//! │                        │  description    │                             │
//! │                        │  category       │                             │
//! │                        │  rating?        │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are owned by the external catalog. The cart keeps a by-value
//! snapshot and never mutates them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product ID
// =============================================================================

/// Catalog-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(ProductId)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "product id".to_string(),
                reason: format!("'{}' is not a non-negative integer", s.trim()),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// Customer rating summary attached to a catalog product (display only).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// A product available in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,

    /// Display name.
    pub title: String,

    /// Unit price (non-negative).
    pub price: Money,

    /// Image URI.
    pub image: String,

    /// Long description, empty when the catalog has none.
    #[serde(default)]
    pub description: String,

    /// Catalog category, empty when the catalog has none.
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub rating: Option<Rating>,
}

impl Product {
    /// Creates a product with the fields the cart cares about.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Product {
            id: id.into(),
            title: title.into(),
            price,
            image: image.into(),
            description: String::new(),
            category: String::new(),
            rating: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }
}
