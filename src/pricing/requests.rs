//! Request DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::calculators::PricingConfig;
use super::config::{parse_config, PricingError};

/// Inline configuration, sent by the settings form to preview unsaved rates.
///
/// Fields mirror the persisted text columns and go through the same
/// validation boundary as stored settings.
#[derive(Debug, Deserialize)]
pub struct InlineConfigRequest {
    #[serde(default)]
    pub utility_service: Option<String>,
    #[serde(default)]
    pub utility_product: Option<String>,
    #[serde(default)]
    pub sales_commission: Option<String>,
    #[serde(default)]
    pub markup_surcharge: Option<String>,
}

impl InlineConfigRequest {
    /// Validate into a usable configuration.
    pub fn parse(&self) -> Result<PricingConfig, PricingError> {
        parse_config(
            self.utility_service.as_deref(),
            self.utility_product.as_deref(),
            self.sales_commission.as_deref(),
            self.markup_surcharge.as_deref(),
        )
    }
}

/// Request to price a single line item
#[derive(Debug, Deserialize)]
pub struct CalculateItemRequest {
    pub studio_id: Uuid,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub cost: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub expense: Decimal,
    pub utility_type: String,
    #[serde(default)]
    pub config: Option<InlineConfigRequest>,
}

/// A line item within a package pricing request
#[derive(Debug, Deserialize)]
pub struct PackageItemRequest {
    #[serde(default, with = "rust_decimal::serde::str")]
    pub cost: Decimal,
    #[serde(default, with = "rust_decimal::serde::str")]
    pub expense: Decimal,
    pub utility_type: String,
    pub quantity: i32,
}

/// Request to price a package of selected items
#[derive(Debug, Deserialize)]
pub struct CalculatePackageRequest {
    pub studio_id: Uuid,
    pub items: Vec<PackageItemRequest>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub custom_price: Option<Decimal>,
    #[serde(default)]
    pub config: Option<InlineConfigRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_item_request_deserializes_decimal_strings() {
        let req: CalculateItemRequest = serde_json::from_str(
            r#"{
                "studio_id": "9f0c7f6a-1111-4222-8333-444455556666",
                "cost": "1000",
                "expense": "0",
                "utility_type": "service"
            }"#,
        )
        .unwrap();

        assert_eq!(req.cost, dec!(1000));
        assert_eq!(req.expense, dec!(0));
        assert_eq!(req.utility_type, "service");
        assert!(req.config.is_none());
    }

    #[test]
    fn test_package_request_custom_price_optional() {
        let req: CalculatePackageRequest = serde_json::from_str(
            r#"{
                "studio_id": "9f0c7f6a-1111-4222-8333-444455556666",
                "items": [
                    {"cost": "500", "expense": "100", "utility_type": "product", "quantity": 2}
                ]
            }"#,
        )
        .unwrap();

        assert!(req.custom_price.is_none());
        assert_eq!(req.items.len(), 1);
        assert_eq!(req.items[0].quantity, 2);
    }

    #[test]
    fn test_package_request_with_custom_price() {
        let req: CalculatePackageRequest = serde_json::from_str(
            r#"{
                "studio_id": "9f0c7f6a-1111-4222-8333-444455556666",
                "items": [],
                "custom_price": "3000.50"
            }"#,
        )
        .unwrap();

        assert_eq!(req.custom_price, Some(dec!(3000.50)));
    }

    #[test]
    fn test_inline_config_parses_through_boundary() {
        let req: CalculateItemRequest = serde_json::from_str(
            r#"{
                "studio_id": "9f0c7f6a-1111-4222-8333-444455556666",
                "cost": "100",
                "expense": "0",
                "utility_type": "product",
                "config": {
                    "utility_service": "0.25",
                    "utility_product": "0.35",
                    "sales_commission": "0.08",
                    "markup_surcharge": "0.02"
                }
            }"#,
        )
        .unwrap();

        let config = req.config.unwrap().parse().unwrap();
        assert_eq!(config.utility_product, dec!(0.35));
    }

    #[test]
    fn test_inline_config_partial_fields_fail_validation() {
        let inline = InlineConfigRequest {
            utility_service: Some("0.30".to_string()),
            utility_product: None,
            sales_commission: Some("0.10".to_string()),
            markup_surcharge: Some("0.05".to_string()),
        };
        assert!(inline.parse().is_err());
    }
}
