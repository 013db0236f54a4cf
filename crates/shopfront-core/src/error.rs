//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  └── ValidationError  - Product ingestion failures                     │
//! │                                                                         │
//! │  shopfront-catalog errors (separate crate)                             │
//! │  └── CatalogError     - Fetch / decode / config failures               │
//! │                                                                         │
//! │  App errors                                                            │
//! │  └── ApiError         - What the view displays                         │
//! │                                                                         │
//! │  Flow: ValidationError → CatalogError → ApiError → Rendered page       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cart Operations Never Fail
//! Add, set-quantity and remove are total over their inputs: a non-positive
//! add quantity or an unknown product id is a no-op, not an error. That is
//! why there is no `CartError` here.

use thiserror::Error;

/// Input validation errors.
///
/// Raised when a product coming from the catalog does not meet the
/// requirements of the cart (the offending product is skipped upstream).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. malformed decimal, bad URI).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;
