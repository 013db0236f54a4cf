//! # API Error Type
//!
//! Unified error type for the view-facing commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  shell line ──► commands::* ──► Result<T, ApiError>                     │
//! │                      │                                                  │
//! │        CatalogError ─┼──► CATALOG_ERROR                                 │
//! │     ValidationError ─┼──► VALIDATION_ERROR                              │
//! │   unknown id / path ─┼──► NOT_FOUND                                     │
//! │   catalog not ready ─┘──► CATALOG_UNAVAILABLE                           │
//! │                                                                         │
//! │  The shell prints `[CODE] message` and keeps running.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations themselves never fail; a command that changes nothing
//! is reported as a no-op, not an error.

use serde::Serialize;
use shopfront_catalog::CatalogError;
use shopfront_core::ValidationError;
use std::fmt;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code}] {message}")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product, page, or shell command
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The product listing has not been loaded yet
    CatalogUnavailable,

    /// The product listing could not be loaded
    CatalogError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::CatalogUnavailable => "CATALOG_UNAVAILABLE",
            ErrorCode::CatalogError => "CATALOG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn catalog_unavailable() -> Self {
        ApiError::new(
            ErrorCode::CatalogUnavailable,
            "Products are not loaded yet; open the shop first",
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::TaskFailed(e) => {
                tracing::error!("Product fetch task failed: {}", e);
                ApiError::internal("Product fetch stopped unexpectedly")
            }
            other => ApiError::new(ErrorCode::CatalogError, other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_code() {
        let err = ApiError::not_found("Product", 42);
        assert_eq!(err.to_string(), "[NOT_FOUND] Product not found: 42");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::catalog_unavailable()).unwrap();
        assert_eq!(json["code"], "CATALOG_UNAVAILABLE");
        assert!(json["message"].as_str().unwrap().contains("not loaded"));
    }

    #[test]
    fn test_from_catalog_error() {
        let err = ApiError::from(CatalogError::Timeout(10));
        assert_eq!(err.code, ErrorCode::CatalogError);

        let err = ApiError::from(CatalogError::TaskFailed("panicked".into()));
        assert_eq!(err.code, ErrorCode::Internal);
    }

    #[test]
    fn test_from_validation_error() {
        let err = ApiError::from(ValidationError::Required {
            field: "title".into(),
        });
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
