//! Pricing engine module for the studio app.
//!
//! Provides price breakdown calculations for catalog items and packages.
//! This module is called by the studio app via HTTP/JSON on every
//! form recalculation.

pub mod calculators;
pub mod config;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    aggregate_package_pricing, calculate_price, round_money, PackageBreakdown, PackageItem,
    PriceBreakdown, PricingConfig, UtilityType,
};
pub use config::PricingError;
pub use routes::router;
pub use services::EffectiveConfig;
