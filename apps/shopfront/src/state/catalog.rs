//! # Catalog State
//!
//! What the shop page knows about the product listing.
//!
//! ```text
//!          begin_loading()            finish(Loaded)
//!   Idle ─────────────────► Loading ─────────────────► Loaded
//!    ▲                         │    finish(Failed)
//!    │      cancel_loading()   ├──────────────────────► Failed
//!    └─────────────────────────┘
//! ```
//!
//! A loaded listing is kept across navigation; only `refresh` replaces it.
//! While a refresh is in flight the old listing is held back, and a
//! cancelled refresh puts it back as `Loaded` instead of dropping to `Idle`.

use shopfront_catalog::{Catalog, CatalogError, FetchOutcome};
use shopfront_core::{Product, ProductId};
use tracing::debug;

/// Load status of the product listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogStatus {
    /// Nothing requested yet, or the last request was cancelled
    #[default]
    Idle,
    Loading,
    Loaded(Catalog),
    Failed(CatalogError),
}

/// Product listing state, owned by the shell loop.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    status: CatalogStatus,
    /// Listing that was loaded when the current load began
    previous: Option<Catalog>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts out with a listing already loaded.
    pub fn loaded(catalog: Catalog) -> Self {
        CatalogState {
            status: CatalogStatus::Loaded(catalog),
            previous: None,
        }
    }

    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match &self.status {
            CatalogStatus::Loaded(catalog) => Some(catalog),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, CatalogStatus::Loading)
    }

    /// Whether entering the shop should start a fetch.
    pub fn needs_fetch(&self) -> bool {
        matches!(self.status, CatalogStatus::Idle | CatalogStatus::Failed(_))
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.catalog().and_then(|c| c.get(id))
    }

    pub fn begin_loading(&mut self) {
        let prior = std::mem::replace(&mut self.status, CatalogStatus::Loading);
        if let CatalogStatus::Loaded(catalog) = prior {
            self.previous = Some(catalog);
        }
    }

    /// Drops a pending load. A loaded or failed listing is left alone.
    pub fn cancel_loading(&mut self) {
        if self.is_loading() {
            debug!(restored = self.previous.is_some(), "Catalog load cancelled");
            self.status = self.restore_previous();
        }
    }

    /// Records how a fetch ended.
    pub fn finish(&mut self, outcome: FetchOutcome) {
        self.status = match outcome {
            FetchOutcome::Loaded(catalog) => CatalogStatus::Loaded(catalog),
            FetchOutcome::Failed(err) => CatalogStatus::Failed(err),
            FetchOutcome::Cancelled => self.restore_previous(),
        };
        self.previous = None;
    }

    fn restore_previous(&mut self) -> CatalogStatus {
        match self.previous.take() {
            Some(catalog) => CatalogStatus::Loaded(catalog),
            None => CatalogStatus::Idle,
        }
    }
}
