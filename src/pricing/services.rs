//! Pricing service functions with database access.
//!
//! These functions resolve the per-studio configuration (cache, then
//! database, then documented defaults) and hand it to the pure calculators.
//! The calculators themselves never see the database or the cache.

use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::AppError;

use super::calculators::{
    aggregate_package_pricing, calculate_price, PackageBreakdown, PackageItem, PriceBreakdown,
    PricingConfig, UtilityType,
};
use super::config::config_from_row;
use super::queries;

/// Configuration actually used for a calculation, with provenance.
#[derive(Debug, Clone)]
pub struct EffectiveConfig {
    pub config: PricingConfig,
    /// True when the defaults were substituted for missing/invalid settings
    pub defaulted: bool,
}

/// Resolve the pricing configuration for a studio.
///
/// Order: cache, then the settings row, then `PricingConfig::default()`.
/// A missing or invalid row is not an error here - the studio forms must
/// always get a usable configuration - but it is logged, and only validated
/// rows are cached.
pub async fn load_pricing_config(
    pool: &PgPool,
    cache: &AppCache,
    studio_id: Uuid,
) -> Result<EffectiveConfig, AppError> {
    if let Some(cached) = cache.configs.get(&studio_id).await {
        return Ok(EffectiveConfig {
            config: (*cached).clone(),
            defaulted: false,
        });
    }

    let row = queries::get_studio_settings(pool, studio_id).await?;

    let effective = match row {
        Some(row) => match config_from_row(&row) {
            Ok(config) => {
                cache
                    .configs
                    .insert(studio_id, Arc::new(config.clone()))
                    .await;
                EffectiveConfig {
                    config,
                    defaulted: false,
                }
            }
            Err(e) => {
                warn!(
                    "Stored pricing settings for studio {} are invalid ({}); using defaults",
                    studio_id, e
                );
                EffectiveConfig {
                    config: PricingConfig::default(),
                    defaulted: true,
                }
            }
        },
        None => {
            warn!(
                "No pricing settings saved for studio {}; using defaults",
                studio_id
            );
            EffectiveConfig {
                config: PricingConfig::default(),
                defaulted: true,
            }
        }
    };

    Ok(effective)
}

/// Price one line item for a studio.
///
/// `config_override` carries an already-validated inline configuration
/// (settings-form preview); when present the stored settings are not read.
pub async fn price_item(
    pool: &PgPool,
    cache: &AppCache,
    studio_id: Uuid,
    cost: Decimal,
    expense: Decimal,
    utility_type: UtilityType,
    config_override: Option<PricingConfig>,
) -> Result<PriceBreakdown, AppError> {
    let config = match config_override {
        Some(config) => config,
        None => load_pricing_config(pool, cache, studio_id).await?.config,
    };

    Ok(calculate_price(cost, expense, utility_type, &config))
}

/// Price a package of selected items for a studio.
pub async fn price_package(
    pool: &PgPool,
    cache: &AppCache,
    studio_id: Uuid,
    items: Vec<PackageItem>,
    custom_price: Option<Decimal>,
    config_override: Option<PricingConfig>,
) -> Result<PackageBreakdown, AppError> {
    let config = match config_override {
        Some(config) => config,
        None => load_pricing_config(pool, cache, studio_id).await?.config,
    };

    Ok(aggregate_package_pricing(&items, &config, custom_price))
}
