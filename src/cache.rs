//! In-memory caching using moka
//!
//! Holds validated per-studio pricing configurations so the calculation
//! endpoints do not hit the database on every keystroke-driven recalculation
//! from the studio forms. The studio app invalidates a tenant's entry after
//! saving settings; the TTL bounds staleness for everyone else.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};
use uuid::Uuid;

use crate::pricing::config::config_from_row;
use crate::pricing::queries;
use crate::pricing::PricingConfig;

/// Application cache holding validated pricing configurations
#[derive(Clone)]
pub struct AppCache {
    /// Pricing configurations (studio_id -> PricingConfig)
    pub configs: Cache<Uuid, Arc<PricingConfig>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Configurations: 512 studios, 10 min TTL, 5 min idle
            configs: Cache::builder()
                .max_capacity(512)
                .time_to_live(Duration::from_secs(10 * 60))
                .time_to_idle(Duration::from_secs(5 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            configs_size: self.configs.entry_count(),
        }
    }

    /// Invalidate the cached configuration for one studio
    pub async fn invalidate_studio(&self, studio_id: Uuid) {
        self.configs.invalidate(&studio_id).await;
        info!("Configuration cache invalidated for studio: {}", studio_id);
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.configs.invalidate_all();
        info!("All caches invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub configs_size: u64,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes every 10 minutes.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool) {
    warm_cache(&cache, &db).await;

    let mut interval = interval(Duration::from_secs(10 * 60));
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with every studio's saved pricing settings
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    info!("Starting configuration cache warm-up...");

    let rows = match queries::get_all_studio_settings(db).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Failed to load settings for cache warm-up: {}", e);
            return;
        }
    };

    for row in &rows {
        match config_from_row(row) {
            Ok(config) => {
                cache.configs.insert(row.studio_id, Arc::new(config)).await;
            }
            // Invalid rows are not cached; requests for that studio fall
            // back to the default configuration at load time
            Err(e) => warn!("Skipping settings for studio {}: {}", row.studio_id, e),
        }
    }

    info!(
        "Configuration cache warm-up complete ({} rows). Stats: {:?}",
        rows.len(),
        cache.stats()
    );
}
