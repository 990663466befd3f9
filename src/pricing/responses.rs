//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::calculators::{PackageBreakdown, PriceBreakdown, PricingConfig};

/// Price breakdown for one line item, amounts as decimal strings.
///
/// Money fields carry full precision; the studio app formats them with its
/// currency formatter. Percentage fields are already whole numbers.
#[derive(Debug, Serialize)]
pub struct PriceBreakdownResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub expense: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_utility_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub commission_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub surcharge_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub final_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub utility_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub commission_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub surcharge_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub real_utility_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub real_utility_percentage: Decimal,
}

impl From<PriceBreakdown> for PriceBreakdownResponse {
    fn from(b: PriceBreakdown) -> Self {
        Self {
            cost: b.cost,
            expense: b.expense,
            base_utility_amount: b.base_utility_amount,
            subtotal: b.subtotal,
            commission_amount: b.commission_amount,
            surcharge_amount: b.surcharge_amount,
            final_price: b.final_price,
            utility_percentage: b.utility_percentage,
            commission_percentage: b.commission_percentage,
            surcharge_percentage: b.surcharge_percentage,
            real_utility_amount: b.real_utility_amount,
            real_utility_percentage: b.real_utility_percentage,
        }
    }
}

/// Package-level breakdown response
#[derive(Debug, Serialize)]
pub struct PackageBreakdownResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub calculated_subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_used: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub net_profit: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub net_profit_calculated: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_difference: Decimal,
}

impl From<PackageBreakdown> for PackageBreakdownResponse {
    fn from(b: PackageBreakdown) -> Self {
        Self {
            calculated_subtotal: b.calculated_subtotal,
            total_cost: b.total_cost,
            total_expense: b.total_expense,
            price_used: b.price_used,
            net_profit: b.net_profit,
            net_profit_calculated: b.net_profit_calculated,
            price_difference: b.price_difference,
        }
    }
}

/// Effective configuration for a studio
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub studio_id: Uuid,
    pub config: PricingConfig,
    /// True when the documented defaults were substituted for missing or
    /// invalid stored settings
    pub defaulted: bool,
}

/// Acknowledgement for cache invalidation
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    pub studio_id: Uuid,
    pub invalidated: bool,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
