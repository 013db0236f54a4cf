//! # Validation Module
//!
//! Product ingestion rules. The catalog runs every fetched product through
//! [`validate_product`] before it can reach a cart; a product that fails is
//! skipped, not surfaced as a cart error.
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::Money;
//! use shopfront_core::types::Product;
//! use shopfront_core::validation::validate_product;
//!
//! let product = Product::new(1u64, "Backpack", Money::from_cents(10995), "https://img/1.jpg");
//! assert!(validate_product(&product).is_ok());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::Product;

/// Maximum title length accepted from the catalog.
pub const MAX_TITLE_LEN: usize = 200;

/// Validates a product title.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_TITLE_LEN`] characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an image URI: present, and free of whitespace.
pub fn validate_image_uri(image: &str) -> ValidationResult<()> {
    if image.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "image".to_string(),
        });
    }

    if image.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "image".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates every cart-relevant field of a product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_title(&product.title)?;
    validate_price(product.price)?;
    validate_image_uri(&product.image)?;
    Ok(())
}
