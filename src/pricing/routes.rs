//! HTTP handlers for the pricing API.
//!
//! Handlers translate DTOs to domain values (utility type and inline
//! configuration both go through the `config` boundary) and delegate to the
//! service layer.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::cache::CacheStats;
use crate::error::{AppError, Result};
use crate::AppState;

use super::calculators::PackageItem;
use super::config::parse_utility_type;
use super::requests::{CalculateItemRequest, CalculatePackageRequest};
use super::responses::{
    ConfigResponse, InvalidateResponse, PackageBreakdownResponse, PriceBreakdownResponse,
};
use super::services;

/// Build the pricing API router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/item", post(calculate_item))
        .route("/api/pricing/package", post(calculate_package))
        .route("/api/pricing/config/:studio_id", get(get_config))
        .route(
            "/api/pricing/config/:studio_id/invalidate",
            post(invalidate_config),
        )
        .route("/api/pricing/cache/stats", get(cache_stats))
}

/// Price a single line item
async fn calculate_item(
    State(state): State<AppState>,
    Json(req): Json<CalculateItemRequest>,
) -> Result<Json<PriceBreakdownResponse>> {
    let utility_type = parse_utility_type(&req.utility_type)?;
    let config_override = match &req.config {
        Some(inline) => Some(inline.parse()?),
        None => None,
    };

    let breakdown = services::price_item(
        &state.db,
        &state.cache,
        req.studio_id,
        req.cost,
        req.expense,
        utility_type,
        config_override,
    )
    .await?;

    Ok(Json(breakdown.into()))
}

/// Price a package of selected items
async fn calculate_package(
    State(state): State<AppState>,
    Json(req): Json<CalculatePackageRequest>,
) -> Result<Json<PackageBreakdownResponse>> {
    let config_override = match &req.config {
        Some(inline) => Some(inline.parse()?),
        None => None,
    };

    let items = req
        .items
        .iter()
        .map(|item| {
            Ok(PackageItem {
                cost: item.cost,
                expense: item.expense,
                utility_type: parse_utility_type(&item.utility_type)?,
                quantity: item.quantity,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let breakdown = services::price_package(
        &state.db,
        &state.cache,
        req.studio_id,
        items,
        req.custom_price,
        config_override,
    )
    .await?;

    Ok(Json(breakdown.into()))
}

/// Effective configuration for a studio (after any default substitution)
async fn get_config(
    State(state): State<AppState>,
    Path(studio_id): Path<Uuid>,
) -> Result<Json<ConfigResponse>> {
    super::queries::get_studio(&state.db, studio_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let effective = services::load_pricing_config(&state.db, &state.cache, studio_id).await?;

    Ok(Json(ConfigResponse {
        studio_id,
        config: effective.config,
        defaulted: effective.defaulted,
    }))
}

/// Drop the cached configuration for a studio.
///
/// The studio app calls this after saving settings so every open editor
/// picks up the new rates on its next recalculation.
async fn invalidate_config(
    State(state): State<AppState>,
    Path(studio_id): Path<Uuid>,
) -> Result<Json<InvalidateResponse>> {
    state.cache.invalidate_studio(studio_id).await;

    Ok(Json(InvalidateResponse {
        studio_id,
        invalidated: true,
    }))
}

/// Cache statistics for monitoring
async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}
