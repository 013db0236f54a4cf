//! # Product Sources
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ProductSource                                     │
//! │                                                                         │
//! │   HttpProductSource ───► GET {base_url}/products ───► decode_products   │
//! │                                                                         │
//! │   StaticProductSource ─► fixed list (offline demos, tests)             │
//! │                                                                         │
//! │  The cart never calls a source. Only the fetch task and the view do.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use shopfront_core::Product;

use crate::config::ApiSettings;
use crate::error::{CatalogError, CatalogResult};
use crate::wire::decode_products;

/// Anything that can produce the product listing.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetches the full listing once.
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

// =============================================================================
// HTTP Source
// =============================================================================

/// Fetches the listing from a REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: Client,
    products_url: String,
    timeout_secs: u64,
}

impl HttpProductSource {
    /// Builds a client with the configured per-request timeout.
    pub fn new(settings: &ApiSettings) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| CatalogError::Http(e.to_string()))?;

        Ok(HttpProductSource {
            client,
            products_url: settings.products_url(),
            timeout_secs: settings.timeout_secs,
        })
    }

    pub fn products_url(&self) -> &str {
        &self.products_url
    }

    fn map_transport_error(&self, err: reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            CatalogError::Timeout(self.timeout_secs)
        } else {
            CatalogError::Http(err.to_string())
        }
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        debug!(url = %self.products_url, "Requesting product listing");

        let response = self
            .client
            .get(&self.products_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: self.products_url.clone(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        decode_products(&body)
    }

    fn describe(&self) -> String {
        self.products_url.clone()
    }
}

// =============================================================================
// Static Source
// =============================================================================

/// Serves a fixed product list.
#[derive(Debug, Clone, Default)]
pub struct StaticProductSource {
    products: Vec<Product>,
}

impl StaticProductSource {
    pub fn new(products: Vec<Product>) -> Self {
        StaticProductSource { products }
    }
}

#[async_trait]
impl ProductSource for StaticProductSource {
    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn describe(&self) -> String {
        format!("static ({} products)", self.products.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use shopfront_core::Money;

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn settings(base_url: String) -> ApiSettings {
        ApiSettings {
            base_url,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_fetches_and_decodes_listing() {
        let router = Router::new().route(
            "/products",
            get(|| async {
                r#"[{"id": 1, "title": "Backpack", "price": 109.95, "image": "https://img/1.jpg"},
                    {"id": 2, "title": "", "price": 1, "image": "https://img/2.jpg"}]"#
            }),
        );
        let base_url = serve(router).await;

        let source = HttpProductSource::new(&settings(base_url.clone())).unwrap();
        assert_eq!(source.products_url(), format!("{}/products", base_url));

        let products = source.fetch_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price, Money::from_cents(10995));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let router = Router::new().route(
            "/products",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base_url = serve(router).await;

        let source = HttpProductSource::new(&settings(base_url)).unwrap();
        let err = source.fetch_products().await.unwrap_err();

        assert!(matches!(err, CatalogError::Status { status: 503, .. }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_missing_route_is_permanent() {
        let base_url = serve(Router::new()).await;

        let source = HttpProductSource::new(&settings(base_url)).unwrap();
        let err = source.fetch_products().await.unwrap_err();

        assert!(matches!(err, CatalogError::Status { status: 404, .. }));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let router = Router::new().route("/products", get(|| async { "<html>down</html>" }));
        let base_url = serve(router).await;

        let source = HttpProductSource::new(&settings(base_url)).unwrap();
        let err = source.fetch_products().await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transient() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpProductSource::new(&settings(format!("http://{}", addr))).unwrap();
        let err = source.fetch_products().await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticProductSource::new(vec![Product::new(
            7u64,
            "Mug",
            Money::from_cents(450),
            "https://img/7.jpg",
        )]);

        let products = source.fetch_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(source.describe(), "static (1 products)");
    }
}
