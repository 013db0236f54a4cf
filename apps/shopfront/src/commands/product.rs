//! # Product Commands

use tracing::debug;

use shopfront_core::Product;

use crate::error::ApiError;
use crate::state::{CatalogState, CatalogStatus};

/// Lists the loaded products in listing order.
///
/// ## Errors
/// - `CATALOG_UNAVAILABLE` while nothing is loaded (idle or loading)
/// - `CATALOG_ERROR` when the last fetch failed
pub fn list_products(catalog: &CatalogState) -> Result<Vec<Product>, ApiError> {
    debug!("list_products command");

    match catalog.status() {
        CatalogStatus::Loaded(listing) => Ok(listing.products().to_vec()),
        CatalogStatus::Failed(err) => Err(ApiError::from(err.clone())),
        CatalogStatus::Idle | CatalogStatus::Loading => Err(ApiError::catalog_unavailable()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use shopfront_catalog::{Catalog, CatalogError, FetchOutcome};
    use shopfront_core::Money;

    #[test]
    fn test_list_loaded_products() {
        let state = CatalogState::loaded(Catalog::new(vec![
            Product::new(3u64, "Jacket", Money::from_cents(5599), "https://img/3.jpg"),
            Product::new(1u64, "Backpack", Money::from_cents(10995), "https://img/1.jpg"),
        ]));

        let products = list_products(&state).unwrap();
        let titles: Vec<_> = products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Jacket", "Backpack"]);
    }

    #[test]
    fn test_list_while_loading() {
        let mut state = CatalogState::new();
        state.begin_loading();

        let err = list_products(&state).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
    }

    #[test]
    fn test_list_after_failure() {
        let mut state = CatalogState::new();
        state.finish(FetchOutcome::Failed(CatalogError::Status {
            status: 500,
            url: "https://fakestoreapi.com/products".into(),
        }));

        let err = list_products(&state).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogError);
    }
}
