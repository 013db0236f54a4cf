//! # Background Product Fetch
//!
//! Loads the catalog off the UI loop, retrying transient failures with
//! exponential backoff, and can be cancelled at any time.
//!
//! ## Fetch Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ProductFetch::spawn() ──► attempt 1 ──ok──► FetchOutcome::Loaded       │
//! │                               │                                         │
//! │                          transient err                                  │
//! │                               │                                         │
//! │                         sleep(backoff) ──► attempt 2 ... max_attempts   │
//! │                                                  │                      │
//! │                                       permanent / exhausted             │
//! │                                                  ▼                      │
//! │                                        FetchOutcome::Failed             │
//! │                                                                         │
//! │  FetchHandle::cancel() or drop(handle) at ANY point                    │
//! │       └──► FetchOutcome::Cancelled  (result discarded)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use backoff::backoff::Backoff;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use shopfront_core::{Product, ProductId};

use crate::config::RetrySettings;
use crate::error::{CatalogError, CatalogResult};
use crate::source::ProductSource;

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// A loaded product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    fetched_at: DateTime<Utc>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog {
            products,
            fetched_at: Utc::now(),
        }
    }

    /// Products in listing order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

/// How a fetch ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loaded(Catalog),
    Failed(CatalogError),
    Cancelled,
}

// =============================================================================
// Retry
// =============================================================================

/// Fetches the catalog, retrying transient errors per `retry`.
pub async fn fetch_with_retry(
    source: &dyn ProductSource,
    retry: &RetrySettings,
) -> CatalogResult<Catalog> {
    let mut backoff = retry.backoff();
    let max_attempts = retry.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        attempt += 1;

        match source.fetch_products().await {
            Ok(products) => {
                info!(
                    source = %source.describe(),
                    count = products.len(),
                    attempt,
                    "Product catalog loaded"
                );
                return Ok(Catalog::new(products));
            }
            Err(e) if e.is_transient() && attempt < max_attempts => {
                let delay = backoff
                    .next_backoff()
                    .unwrap_or(Duration::from_secs(retry.max_backoff_secs));
                warn!(error = %e, attempt, ?delay, "Product fetch failed, retrying");
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                error!(error = %e, attempt, "Product fetch failed");
                return Err(e);
            }
        }
    }
}

// =============================================================================
// Background Fetch
// =============================================================================

/// Spawns catalog fetches.
pub struct ProductFetch;

impl ProductFetch {
    /// Starts fetching on a background task. Must be called within a tokio runtime.
    pub fn spawn(source: Arc<dyn ProductSource>, retry: RetrySettings) -> FetchHandle {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            info!(source = %source.describe(), "Product fetch starting");

            tokio::select! {
                result = fetch_with_retry(source.as_ref(), &retry) => match result {
                    Ok(catalog) => FetchOutcome::Loaded(catalog),
                    Err(e) => FetchOutcome::Failed(e),
                },

                // Fires on cancel() and when the handle is dropped.
                _ = cancel_rx => {
                    info!("Product fetch cancelled");
                    FetchOutcome::Cancelled
                }
            }
        });

        FetchHandle {
            cancel_tx: Some(cancel_tx),
            task,
        }
    }
}

/// Handle to a pending fetch. Dropping it cancels the fetch.
#[derive(Debug)]
pub struct FetchHandle {
    cancel_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<FetchOutcome>,
}

impl FetchHandle {
    /// Discards the pending fetch. The outcome becomes `Cancelled` unless
    /// the fetch had already finished.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the outcome. Cancel-safe; call at most once to completion.
    pub async fn wait(&mut self) -> FetchOutcome {
        match (&mut self.task).await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => FetchOutcome::Cancelled,
            Err(e) => FetchOutcome::Failed(CatalogError::TaskFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticProductSource;
    use async_trait::async_trait;
    use shopfront_core::Money;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_retry(max_attempts: u32) -> RetrySettings {
        RetrySettings {
            max_attempts,
            initial_backoff_ms: 1,
            max_backoff_secs: 1,
        }
    }

    fn mug() -> Product {
        Product::new(7u64, "Mug", Money::from_cents(450), "https://img/7.jpg")
    }

    /// Fails with `error` for the first `failures` calls, then succeeds.
    struct FlakySource {
        failures: u32,
        error: CatalogError,
        calls: AtomicU32,
    }

    #[async_trait]
    impl ProductSource for FlakySource {
        async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(self.error.clone())
            } else {
                Ok(vec![mug()])
            }
        }

        fn describe(&self) -> String {
            "flaky".into()
        }
    }

    /// Never answers.
    struct HangingSource;

    #[async_trait]
    impl ProductSource for HangingSource {
        async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
            std::future::pending().await
        }

        fn describe(&self) -> String {
            "hanging".into()
        }
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let source = FlakySource {
            failures: 2,
            error: CatalogError::Http("connection reset".into()),
            calls: AtomicU32::new(0),
        };

        let catalog = fetch_with_retry(&source, &fast_retry(3)).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retries_stop_at_max_attempts() {
        let source = FlakySource {
            failures: 10,
            error: CatalogError::Timeout(10),
            calls: AtomicU32::new(0),
        };

        let err = fetch_with_retry(&source, &fast_retry(2)).await.unwrap_err();
        assert_eq!(err, CatalogError::Timeout(10));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_errors_are_not_retried() {
        let source = FlakySource {
            failures: 1,
            error: CatalogError::Decode("not an array".into()),
            calls: AtomicU32::new(0),
        };

        let err = fetch_with_retry(&source, &fast_retry(5)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_spawned_fetch_loads_catalog() {
        let source = Arc::new(StaticProductSource::new(vec![mug()]));
        let mut handle = ProductFetch::spawn(source, fast_retry(1));

        match handle.wait().await {
            FetchOutcome::Loaded(catalog) => {
                assert_eq!(catalog.get(ProductId::new(7)).unwrap().title, "Mug");
                assert!(catalog.get(ProductId::new(8)).is_none());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_cancel_discards_pending_fetch() {
        let mut handle = ProductFetch::spawn(Arc::new(HangingSource), fast_retry(1));
        handle.cancel();

        assert_eq!(handle.wait().await, FetchOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_failed_fetch_reports_error() {
        let source = Arc::new(FlakySource {
            failures: u32::MAX,
            error: CatalogError::Status {
                status: 404,
                url: "http://x/products".into(),
            },
            calls: AtomicU32::new(0),
        });
        let mut handle = ProductFetch::spawn(source, fast_retry(3));

        assert!(matches!(
            handle.wait().await,
            FetchOutcome::Failed(CatalogError::Status { status: 404, .. })
        ));
    }
}
