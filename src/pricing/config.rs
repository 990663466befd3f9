//! Configuration loading boundary.
//!
//! Persisted rates arrive as text (the settings table stores them as
//! varchar) and must be parsed defensively. Everything past this boundary
//! works with a fully validated [`PricingConfig`]; callers that hit
//! [`PricingError::InvalidConfiguration`] substitute the documented
//! defaults instead of invoking the engine with bad rates.

use rust_decimal::Decimal;

use super::calculators::{PricingConfig, UtilityType};
use super::models::StudioSettingsRow;

/// Domain errors raised at the pricing boundaries.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PricingError {
    #[error("invalid pricing configuration: {}", errors.join("; "))]
    InvalidConfiguration { errors: Vec<String> },

    #[error("unknown utility type '{0}' (expected 'service' or 'product')")]
    InvalidUtilityType(String),
}

/// Parse a utility type arriving as text from a request or import.
pub fn parse_utility_type(value: &str) -> Result<UtilityType, PricingError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "service" => Ok(UtilityType::Service),
        "product" => Ok(UtilityType::Product),
        _ => Err(PricingError::InvalidUtilityType(value.to_string())),
    }
}

fn parse_rate(field: &str, raw: Option<&str>, errors: &mut Vec<String>) -> Decimal {
    let Some(raw) = raw else {
        errors.push(format!("{field}: missing"));
        return Decimal::ZERO;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(format!("{field}: missing"));
        return Decimal::ZERO;
    }
    match trimmed.parse::<Decimal>() {
        Ok(rate) if rate >= Decimal::ZERO => rate,
        Ok(_) => {
            errors.push(format!("{field}: negative"));
            Decimal::ZERO
        }
        Err(_) => {
            errors.push(format!("{field}: not a number ('{trimmed}')"));
            Decimal::ZERO
        }
    }
}

/// Parse the four persisted rate values into a validated configuration.
///
/// All fields are checked before returning so a single error reports every
/// offending column, not just the first.
pub fn parse_config(
    utility_service: Option<&str>,
    utility_product: Option<&str>,
    sales_commission: Option<&str>,
    markup_surcharge: Option<&str>,
) -> Result<PricingConfig, PricingError> {
    let mut errors = Vec::new();

    let config = PricingConfig {
        utility_service: parse_rate("utility_service", utility_service, &mut errors),
        utility_product: parse_rate("utility_product", utility_product, &mut errors),
        sales_commission: parse_rate("sales_commission", sales_commission, &mut errors),
        markup_surcharge: parse_rate("markup_surcharge", markup_surcharge, &mut errors),
    };

    if errors.is_empty() {
        Ok(config)
    } else {
        Err(PricingError::InvalidConfiguration { errors })
    }
}

/// Validate a settings row into a configuration.
pub fn config_from_row(row: &StudioSettingsRow) -> Result<PricingConfig, PricingError> {
    parse_config(
        row.utility_service.as_deref(),
        row.utility_product.as_deref(),
        row.sales_commission.as_deref(),
        row.markup_surcharge.as_deref(),
    )
}
