//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access. Configuration is
//! always an explicit parameter; nothing in this module reads shared state,
//! so concurrent recalculations from the studio forms are fully independent.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use studio_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Which markup rate from the studio configuration applies to a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilityType {
    Service,
    Product,
}

impl UtilityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UtilityType::Service => "service",
            UtilityType::Product => "product",
        }
    }
}

/// Per-studio pricing rates. Loaded from settings storage (see the `config`
/// module), never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub utility_service: Decimal,
    pub utility_product: Decimal,
    pub sales_commission: Decimal,
    pub markup_surcharge: Decimal,
}

impl PricingConfig {
    /// Select the markup rate for a line item's utility type.
    pub fn rate_for(&self, utility_type: UtilityType) -> Decimal {
        match utility_type {
            UtilityType::Service => self.utility_service,
            UtilityType::Product => self.utility_product,
        }
    }
}

impl Default for PricingConfig {
    /// Documented fallback used whenever a studio has no stored settings
    /// or the stored values fail validation.
    fn default() -> Self {
        Self {
            utility_service: dec!(0.30),
            utility_product: dec!(0.40),
            sales_commission: dec!(0.10),
            markup_surcharge: dec!(0.05),
        }
    }
}

/// Full price breakdown for a single line item.
///
/// Money fields keep full precision; only the `*_percentage` fields are
/// rounded (to whole numbers, for display). Callers format for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub cost: Decimal,
    pub expense: Decimal,
    pub base_utility_amount: Decimal,
    pub subtotal: Decimal,
    pub commission_amount: Decimal,
    pub surcharge_amount: Decimal,
    pub final_price: Decimal,
    pub utility_percentage: Decimal,
    pub commission_percentage: Decimal,
    pub surcharge_percentage: Decimal,
    pub real_utility_amount: Decimal,
    pub real_utility_percentage: Decimal,
}

/// Whole-number display percentage for a configured rate.
///
/// A rate above 1 is taken as already being a whole-number percentage
/// (legacy settings rows store `30` for 30%); at or below 1 it is a fraction.
/// TODO: drop the whole-number branch once the settings migration that
/// normalizes legacy rows to fractions has shipped.
fn display_percentage(rate: Decimal) -> Decimal {
    if rate > Decimal::ONE {
        round_money(rate, 0)
    } else {
        round_money(rate * dec!(100), 0)
    }
}

/// Calculate the price breakdown for one line item.
///
/// Steps, in order:
/// 1. base utility = (cost + expense) * rate for the item's utility type
/// 2. subtotal = cost + expense + base utility
/// 3. commission and surcharge are each taken on the subtotal
/// 4. final price = subtotal + commission + surcharge
///
/// Inputs are not clamped: validation of negative cost/expense belongs to
/// the caller. A zero rate simply zeroes that component.
pub fn calculate_price(
    cost: Decimal,
    expense: Decimal,
    utility_type: UtilityType,
    config: &PricingConfig,
) -> PriceBreakdown {
    let rate = config.rate_for(utility_type);
    let base = cost + expense;

    let base_utility_amount = base * rate;
    let subtotal = base + base_utility_amount;
    let commission_amount = subtotal * config.sales_commission;
    let surcharge_amount = subtotal * config.markup_surcharge;
    let final_price = subtotal + commission_amount + surcharge_amount;

    let real_utility_amount = final_price - base;
    let real_utility_percentage = if final_price > Decimal::ZERO {
        round_money(real_utility_amount / final_price * dec!(100), 0)
    } else {
        Decimal::ZERO
    };

    PriceBreakdown {
        cost,
        expense,
        base_utility_amount,
        subtotal,
        commission_amount,
        surcharge_amount,
        final_price,
        utility_percentage: display_percentage(rate),
        commission_percentage: display_percentage(config.sales_commission),
        surcharge_percentage: display_percentage(config.markup_surcharge),
        real_utility_amount,
        real_utility_percentage,
    }
}

/// One selected line item within a package.
#[derive(Debug, Clone)]
pub struct PackageItem {
    pub cost: Decimal,
    pub expense: Decimal,
    pub utility_type: UtilityType,
    pub quantity: i32,
}

/// Package-level breakdown: calculated totals reconciled against an
/// optional personalized price.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageBreakdown {
    pub calculated_subtotal: Decimal,
    pub total_cost: Decimal,
    pub total_expense: Decimal,
    pub price_used: Decimal,
    pub net_profit: Decimal,
    pub net_profit_calculated: Decimal,
    pub price_difference: Decimal,
}

/// Aggregate per-item breakdowns into a package breakdown.
///
/// Items with `quantity <= 0` are excluded from every sum. A `custom_price`
/// of `None` or zero means "no override": the calculated subtotal is used.
/// Per-item math runs at full precision; every output is rounded to the
/// currency's two minor units at the end.
pub fn aggregate_package_pricing(
    items: &[PackageItem],
    config: &PricingConfig,
    custom_price: Option<Decimal>,
) -> PackageBreakdown {
    let mut calculated_subtotal = Decimal::ZERO;
    let mut total_cost = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;

    for item in items {
        if item.quantity <= 0 {
            continue;
        }
        let qty = Decimal::from(item.quantity);
        let breakdown = calculate_price(item.cost, item.expense, item.utility_type, config);
        calculated_subtotal += breakdown.final_price * qty;
        total_cost += item.cost * qty;
        total_expense += item.expense * qty;
    }

    let override_price = custom_price.filter(|p| *p > Decimal::ZERO);
    let price_used = override_price.unwrap_or(calculated_subtotal);
    let net_profit = price_used - (total_cost + total_expense);
    let net_profit_calculated = calculated_subtotal - (total_cost + total_expense);
    let price_difference = match override_price {
        Some(p) => p - calculated_subtotal,
        None => Decimal::ZERO,
    };

    PackageBreakdown {
        calculated_subtotal: round_money(calculated_subtotal, 2),
        total_cost: round_money(total_cost, 2),
        total_expense: round_money(total_expense, 2),
        price_used: round_money(price_used, 2),
        net_profit: round_money(net_profit, 2),
        net_profit_calculated: round_money(net_profit_calculated, 2),
        price_difference: round_money(price_difference, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn default_config() -> PricingConfig {
        PricingConfig::default()
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2)); // rounds down to even
        assert_eq!(round_money(dec!(3.5), 0), dec!(4)); // rounds up to even
        assert_eq!(round_money(dec!(2.25), 1), dec!(2.2));
        assert_eq!(round_money(dec!(2.35), 1), dec!(2.4));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
    }

    // ==================== calculate_price tests ====================

    #[test]
    fn test_calculate_price_service_scenario() {
        // cost=1000, no expenses, service at 30%, commission 10%, surcharge 5%
        let b = calculate_price(dec!(1000), dec!(0), UtilityType::Service, &default_config());

        assert_eq!(b.base_utility_amount, dec!(300));
        assert_eq!(b.subtotal, dec!(1300));
        assert_eq!(b.commission_amount, dec!(130));
        assert_eq!(b.surcharge_amount, dec!(65));
        assert_eq!(b.final_price, dec!(1495));
        assert_eq!(b.utility_percentage, dec!(30));
        assert_eq!(b.commission_percentage, dec!(10));
        assert_eq!(b.surcharge_percentage, dec!(5));
        assert_eq!(b.real_utility_amount, dec!(495));
        // 495 / 1495 = 33.11% -> 33
        assert_eq!(b.real_utility_percentage, dec!(33));
    }

    #[test]
    fn test_calculate_price_product_with_expenses() {
        let b = calculate_price(dec!(500), dec!(100), UtilityType::Product, &default_config());

        assert_eq!(b.base_utility_amount, dec!(240)); // (500+100) * 0.40
        assert_eq!(b.subtotal, dec!(840));
        assert_eq!(b.commission_amount, dec!(84));
        assert_eq!(b.surcharge_amount, dec!(42));
        assert_eq!(b.final_price, dec!(966));
    }

    #[test]
    fn test_calculate_price_zero_inputs() {
        let b = calculate_price(dec!(0), dec!(0), UtilityType::Service, &default_config());

        assert_eq!(b.final_price, dec!(0));
        assert_eq!(b.base_utility_amount, dec!(0));
        assert_eq!(b.subtotal, dec!(0));
        assert_eq!(b.real_utility_amount, dec!(0));
        assert_eq!(b.real_utility_percentage, dec!(0));
        // Rates still reported even when the base is zero
        assert_eq!(b.utility_percentage, dec!(30));
        assert_eq!(b.commission_percentage, dec!(10));
    }

    #[test]
    fn test_calculate_price_zero_rates() {
        let config = PricingConfig {
            utility_service: dec!(0),
            utility_product: dec!(0),
            sales_commission: dec!(0),
            markup_surcharge: dec!(0),
        };
        let b = calculate_price(dec!(100), dec!(50), UtilityType::Service, &config);

        assert_eq!(b.base_utility_amount, dec!(0));
        assert_eq!(b.subtotal, dec!(150));
        assert_eq!(b.commission_amount, dec!(0));
        assert_eq!(b.surcharge_amount, dec!(0));
        assert_eq!(b.final_price, dec!(150));
        assert_eq!(b.real_utility_amount, dec!(0));
        assert_eq!(b.real_utility_percentage, dec!(0));
    }

    #[test]
    fn test_calculate_price_negative_inputs_propagate() {
        // Negative values are the caller's responsibility; the math is not clamped
        let b = calculate_price(dec!(-100), dec!(0), UtilityType::Service, &default_config());
        assert_eq!(b.subtotal, dec!(-130));
        assert_eq!(b.final_price, dec!(-149.50));
        // final_price <= 0 pins the percentage to zero
        assert_eq!(b.real_utility_percentage, dec!(0));
    }

    #[test]
    fn test_calculate_price_monotonic_in_cost_and_expense() {
        let config = default_config();
        let base = calculate_price(dec!(100), dec!(20), UtilityType::Product, &config);
        let more_cost = calculate_price(dec!(150), dec!(20), UtilityType::Product, &config);
        let more_expense = calculate_price(dec!(100), dec!(75), UtilityType::Product, &config);

        assert!(more_cost.final_price > base.final_price);
        assert!(more_expense.final_price > base.final_price);
    }

    #[test]
    fn test_calculate_price_closed_form_composition() {
        // final = (cost + expense) * (1 + utility) * (1 + commission + surcharge)
        let cases = [
            (dec!(1000), dec!(0), UtilityType::Service),
            (dec!(500), dec!(100), UtilityType::Product),
            (dec!(0.01), dec!(0.02), UtilityType::Service),
            (dec!(1234.56), dec!(78.90), UtilityType::Product),
        ];
        let config = default_config();

        for (cost, expense, utility_type) in cases {
            let b = calculate_price(cost, expense, utility_type, &config);
            let rate = config.rate_for(utility_type);
            let closed_form = (cost + expense)
                * (Decimal::ONE + rate)
                * (Decimal::ONE + config.sales_commission + config.markup_surcharge);
            assert_eq!(b.final_price, closed_form, "cost={cost} expense={expense}");
        }
    }

    #[test]
    fn test_display_percentage_fraction_vs_whole_number() {
        // Legacy settings rows store whole-number percentages; rates above 1
        // are displayed as-is instead of being multiplied by 100.
        let config = PricingConfig {
            utility_service: dec!(30),
            utility_product: dec!(0.40),
            sales_commission: dec!(0.10),
            markup_surcharge: dec!(0.05),
        };
        let b = calculate_price(dec!(100), dec!(0), UtilityType::Service, &config);

        assert_eq!(b.utility_percentage, dec!(30));
        // The raw rate still drives the math, whichever form it is in
        assert_eq!(b.base_utility_amount, dec!(3000));
        assert_eq!(b.commission_percentage, dec!(10));
    }

    // ==================== aggregate_package_pricing tests ====================

    fn scenario_items() -> Vec<PackageItem> {
        vec![
            PackageItem {
                cost: dec!(1000),
                expense: dec!(0),
                utility_type: UtilityType::Service,
                quantity: 1,
            },
            PackageItem {
                cost: dec!(500),
                expense: dec!(100),
                utility_type: UtilityType::Product,
                quantity: 2,
            },
        ]
    }

    #[test]
    fn test_aggregate_two_item_package() {
        // A: final 1495 x1; B: final 966 x2 = 1932; subtotal 3427
        let b = aggregate_package_pricing(&scenario_items(), &default_config(), None);

        assert_eq!(b.calculated_subtotal, dec!(3427));
        assert_eq!(b.total_cost, dec!(2000)); // 1000 + 500*2
        assert_eq!(b.total_expense, dec!(200)); // 100*2
        assert_eq!(b.price_used, dec!(3427));
        assert_eq!(b.net_profit, dec!(1227)); // 3427 - 2200
        assert_eq!(b.net_profit_calculated, dec!(1227));
        assert_eq!(b.price_difference, dec!(0));
    }

    #[test]
    fn test_aggregate_matches_per_item_sum() {
        let config = default_config();
        let items = scenario_items();
        let b = aggregate_package_pricing(&items, &config, None);

        let expected: Decimal = items
            .iter()
            .filter(|i| i.quantity > 0)
            .map(|i| {
                calculate_price(i.cost, i.expense, i.utility_type, &config).final_price
                    * Decimal::from(i.quantity)
            })
            .sum();
        assert_eq!(b.calculated_subtotal, round_money(expected, 2));
    }

    #[test]
    fn test_aggregate_excludes_non_positive_quantities() {
        let config = default_config();
        let mut items = scenario_items();
        items.push(PackageItem {
            cost: dec!(9999),
            expense: dec!(9999),
            utility_type: UtilityType::Service,
            quantity: 0,
        });
        items.push(PackageItem {
            cost: dec!(9999),
            expense: dec!(0),
            utility_type: UtilityType::Product,
            quantity: -3,
        });

        let with_extras = aggregate_package_pricing(&items, &config, None);
        let without = aggregate_package_pricing(&scenario_items(), &config, None);
        assert_eq!(with_extras, without);
    }

    #[test]
    fn test_aggregate_custom_price_override() {
        let b = aggregate_package_pricing(&scenario_items(), &default_config(), Some(dec!(3000)));

        assert_eq!(b.calculated_subtotal, dec!(3427));
        assert_eq!(b.price_used, dec!(3000));
        assert_eq!(b.net_profit, dec!(800)); // 3000 - 2200
        assert_eq!(b.net_profit_calculated, dec!(1227)); // ignores the override
        assert_eq!(b.price_difference, dec!(-427));
    }

    #[test]
    fn test_aggregate_custom_price_zero_means_no_override() {
        let with_zero =
            aggregate_package_pricing(&scenario_items(), &default_config(), Some(dec!(0)));
        let with_none = aggregate_package_pricing(&scenario_items(), &default_config(), None);
        assert_eq!(with_zero, with_none);
    }

    #[test]
    fn test_aggregate_custom_price_below_cost_negative_profit() {
        let b = aggregate_package_pricing(&scenario_items(), &default_config(), Some(dec!(1500)));

        // 1500 against 2200 of cost+expense: a loss, not an error
        assert_eq!(b.price_used, dec!(1500));
        assert_eq!(b.net_profit, dec!(-700));
    }

    #[test]
    fn test_aggregate_empty_package() {
        let b = aggregate_package_pricing(&[], &default_config(), None);

        assert_eq!(b.calculated_subtotal, dec!(0));
        assert_eq!(b.total_cost, dec!(0));
        assert_eq!(b.total_expense, dec!(0));
        assert_eq!(b.price_used, dec!(0));
        assert_eq!(b.net_profit, dec!(0));
        assert_eq!(b.price_difference, dec!(0));
    }

    #[test]
    fn test_aggregate_empty_package_with_override() {
        let b = aggregate_package_pricing(&[], &default_config(), Some(dec!(250)));

        assert_eq!(b.price_used, dec!(250));
        assert_eq!(b.net_profit, dec!(250));
        assert_eq!(b.price_difference, dec!(250));
    }

    #[test]
    fn test_aggregate_rounds_outputs_to_two_decimals() {
        let items = vec![PackageItem {
            cost: dec!(33.333),
            expense: dec!(0),
            utility_type: UtilityType::Service,
            quantity: 3,
        }];
        // per item: 33.333 * 1.30 * 1.15 = 49.832835; x3 = 149.498505
        let b = aggregate_package_pricing(&items, &default_config(), None);

        assert!(b.calculated_subtotal.scale() <= 2);
        assert_eq!(b.calculated_subtotal, dec!(149.50));
        assert_eq!(b.total_cost, dec!(100.00)); // 33.333 * 3 = 99.999
    }
}
