//! In-memory caching using moka
//!
//! Holds the current pricing configuration snapshot. Each calculation takes
//! one `Arc<PricingConfig>` up front and uses it throughout, so a reload in
//! the middle of a calculation cannot change its result.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::pricing::{ConfigStore, PricingConfig, PricingError};

const SNAPSHOT_KEY: &str = "pricing";

/// Application cache holding the pricing configuration snapshot
#[derive(Clone)]
pub struct AppCache {
    store: ConfigStore,
    /// Pricing config (singleton)
    pricing: Cache<&'static str, Arc<PricingConfig>>,
}

impl AppCache {
    /// Create a cache over `store`, re-reading the file at most once per `ttl`
    pub fn new(store: ConfigStore, ttl: Duration) -> Self {
        Self {
            store,
            pricing: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
        }
    }

    /// Current pricing configuration snapshot.
    ///
    /// Concurrent misses share a single load from the store. The file is read
    /// on the blocking pool, off the async worker threads.
    pub async fn pricing_config(&self) -> Result<Arc<PricingConfig>, PricingError> {
        let store = self.store.clone();
        self.pricing
            .try_get_with(SNAPSHOT_KEY, async move {
                match tokio::task::spawn_blocking(move || store.load()).await {
                    Ok(loaded) => loaded.map(Arc::new),
                    Err(e) => Err(PricingError::configuration(
                        "Pricing config load task failed",
                        vec![e.to_string()],
                    )),
                }
            })
            .await
            .map_err(|e| (*e).clone())
    }

    /// Drop the cached snapshot and load a fresh one
    pub async fn reload_pricing_config(&self) -> Result<Arc<PricingConfig>, PricingError> {
        self.pricing.invalidate(SNAPSHOT_KEY).await;
        info!("Pricing config cache invalidated");
        self.pricing_config().await
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            pricing_config_cached: self.pricing.contains_key(SNAPSHOT_KEY),
            config_path: self.store.path().display().to_string(),
        }
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub pricing_config_cached: bool,
    pub config_path: String,
}
