use std::sync::Arc;

use tokio::sync::RwLock;

use crate::assessment::gap_scoring::GapScorer;
use crate::catalog::Catalog;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Current catalog snapshot. Requests clone the inner `Arc` and score against
    /// it without holding the lock; a reload swaps the whole snapshot.
    pub catalog: Arc<RwLock<Arc<Catalog>>>,
    /// Pluggable gap scorer. Default: WeightedGapScorer.
    pub scorer: Arc<dyn GapScorer>,
    pub config: Config,
}

impl AppState {
    pub fn new(catalog: Catalog, scorer: Arc<dyn GapScorer>, config: Config) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(Arc::new(catalog))),
            scorer,
            config,
        }
    }

    pub async fn catalog(&self) -> Arc<Catalog> {
        self.catalog.read().await.clone()
    }

    pub async fn replace_catalog(&self, catalog: Catalog) {
        *self.catalog.write().await = Arc::new(catalog);
    }
}
