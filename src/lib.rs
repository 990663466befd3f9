//! Pricing service for the studio management app.
//!
//! The heart of the crate is `pricing::calculators`: pure functions turning
//! a line item's cost and expenses into a full price breakdown, and
//! aggregating selected items into a package breakdown reconciled against an
//! optional personalized price. Everything else is plumbing: per-studio
//! configuration loading with defensive parsing, a moka cache, and a small
//! JSON API consumed by the studio app's forms.

pub mod cache;
pub mod error;
pub mod pricing;

use cache::AppCache;
use sqlx::PgPool;

/// Shared application state for the axum router
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}
