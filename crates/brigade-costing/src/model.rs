//! Cost derivation functions for ingredient usages.
//!
//! The entry point is [`cost_usages`], which turns the raw usages of one
//! dish into costed lines plus an aggregate total. The lower-level
//! [`adjusted_unit_price`] and [`line_cost`] building blocks are exposed
//! for callers that need a single value (e.g. a price preview).

use rust_decimal::{Decimal, RoundingStrategy};

use brigade_types::IngredientUsage;

use crate::CostError;

/// Decimal places monetary values are rounded to for persistence.
const MONEY_SCALE: u32 = 2;

/// Round a full-precision monetary value to the persistence scale.
///
/// Round-half-up: midpoints move away from zero, matching how the
/// kitchen's spreadsheets round. The result always carries exactly two
/// decimal places so serialized values read as money ("625.00", not
/// "625").
fn round_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// One costed ingredient line, ready for persistence.
///
/// `price_after_waste` and `line_cost` are rounded to 2 decimal places;
/// the input fields are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CostedLine {
    /// Product name, carried through from the usage.
    pub product_name: String,
    /// Consumed weight in grams.
    pub amount_grams: i32,
    /// Purchase price per kilogram.
    pub price_per_kg: Decimal,
    /// Waste percentage in `[0, 100)`.
    pub waste_percent: Decimal,
    /// Waste-adjusted price per kilogram, rounded.
    pub price_after_waste: Decimal,
    /// Cost of this line, rounded.
    pub line_cost: Decimal,
}

/// The costed lines of a dish plus their aggregate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CostedUsages {
    /// Costed lines, in input order.
    pub lines: Vec<CostedLine>,
    /// Sum of the rounded line costs.
    pub total_cost: Decimal,
}

/// Price per kilogram inflated to account for discarded waste.
///
/// `price_per_kg / (1 - waste_percent / 100)`, in full precision.
/// A waste of 20% means only 80% of the purchased weight ends up in the
/// dish, so the effective unit price rises by a factor of `1 / 0.8`.
///
/// # Errors
///
/// Returns [`CostError::NegativePrice`] for a negative price,
/// [`CostError::WasteOutOfRange`] when `waste_percent` is outside
/// `[0, 100)`, and [`CostError::Overflow`] if the division leaves the
/// representable range.
pub fn adjusted_unit_price(
    price_per_kg: Decimal,
    waste_percent: Decimal,
) -> Result<Decimal, CostError> {
    if price_per_kg.is_sign_negative() && !price_per_kg.is_zero() {
        return Err(CostError::NegativePrice { price_per_kg });
    }
    if (waste_percent.is_sign_negative() && !waste_percent.is_zero())
        || waste_percent >= Decimal::ONE_HUNDRED
    {
        return Err(CostError::WasteOutOfRange { waste_percent });
    }

    let waste_fraction = waste_percent
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or(CostError::Overflow {
            context: "waste fraction",
        })?;
    let usable_yield = Decimal::ONE
        .checked_sub(waste_fraction)
        .ok_or(CostError::Overflow {
            context: "usable yield",
        })?;

    // usable_yield is in (0, 1] here, so the division only fails on
    // magnitude overflow of the result.
    price_per_kg
        .checked_div(usable_yield)
        .ok_or(CostError::Overflow {
            context: "adjusted unit price",
        })
}

/// Cost of consuming `amount_grams` at the given adjusted per-kg price.
///
/// `(amount_grams / 1000) * adjusted_unit_price`, in full precision.
///
/// # Errors
///
/// Returns [`CostError::NegativeAmount`] for a negative amount and
/// [`CostError::Overflow`] if the multiplication leaves the representable
/// range.
pub fn line_cost(amount_grams: i32, adjusted_unit_price: Decimal) -> Result<Decimal, CostError> {
    if amount_grams < 0 {
        return Err(CostError::NegativeAmount { amount_grams });
    }

    let kilograms = Decimal::from(amount_grams)
        .checked_div(Decimal::ONE_THOUSAND)
        .ok_or(CostError::Overflow {
            context: "gram to kilogram conversion",
        })?;

    kilograms
        .checked_mul(adjusted_unit_price)
        .ok_or(CostError::Overflow { context: "line cost" })
}

/// Cost a single ingredient usage.
///
/// Both derived values are computed in full precision first; the rounded
/// results are what get persisted.
///
/// # Errors
///
/// Propagates the input validation errors of [`adjusted_unit_price`] and
/// [`line_cost`].
pub fn cost_usage(usage: &IngredientUsage) -> Result<CostedLine, CostError> {
    let adjusted = adjusted_unit_price(usage.price_per_kg, usage.waste_percent)?;
    let cost = line_cost(usage.amount_grams, adjusted)?;

    Ok(CostedLine {
        product_name: usage.product_name.clone(),
        amount_grams: usage.amount_grams,
        price_per_kg: usage.price_per_kg,
        waste_percent: usage.waste_percent,
        price_after_waste: round_money(adjusted),
        line_cost: round_money(cost),
    })
}

/// Sum the rounded line costs of already-costed lines.
///
/// An empty slice yields zero.
///
/// # Errors
///
/// Returns [`CostError::Overflow`] if the sum leaves the representable
/// range.
pub fn aggregate_cost(lines: &[CostedLine]) -> Result<Decimal, CostError> {
    let mut total = Decimal::ZERO;
    for line in lines {
        total = total
            .checked_add(line.line_cost)
            .ok_or(CostError::Overflow {
                context: "aggregate cost",
            })?;
    }
    Ok(total)
}

/// Cost all usages of a dish and aggregate the total.
///
/// The total is the sum of the *rounded* line costs, so a persisted
/// header total always equals the sum of its persisted lines exactly.
/// Input order is preserved.
///
/// # Errors
///
/// Fails on the first invalid usage; no partial result is returned.
pub fn cost_usages(usages: &[IngredientUsage]) -> Result<CostedUsages, CostError> {
    let lines = usages.iter().map(cost_usage).collect::<Result<Vec<_>, _>>()?;
    let total_cost = aggregate_cost(&lines)?;

    tracing::debug!(lines = lines.len(), %total_cost, "Costed ingredient usages");

    Ok(CostedUsages { lines, total_cost })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn usage(amount_grams: i32, price_per_kg: &str, waste_percent: &str) -> IngredientUsage {
        IngredientUsage {
            product_name: String::from("salmon"),
            amount_grams,
            price_per_kg: price_per_kg.parse().unwrap(),
            waste_percent: waste_percent.parse().unwrap(),
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    // -- adjusted_unit_price --------------------------------------------------

    #[test]
    fn twenty_percent_waste_inflates_price_by_quarter() {
        // 500 / (1 - 0.20) = 625
        let adjusted = adjusted_unit_price(dec("500.00"), dec("20")).unwrap();
        assert_eq!(adjusted, dec("625"));
    }

    #[test]
    fn zero_waste_returns_price_exactly() {
        let adjusted = adjusted_unit_price(dec("437.19"), Decimal::ZERO).unwrap();
        assert_eq!(adjusted, dec("437.19"));
    }

    #[test]
    fn waste_of_one_hundred_is_rejected() {
        let err = adjusted_unit_price(dec("10"), dec("100")).unwrap_err();
        assert!(matches!(err, CostError::WasteOutOfRange { .. }));
    }

    #[test]
    fn waste_above_one_hundred_is_rejected() {
        let err = adjusted_unit_price(dec("10"), dec("150")).unwrap_err();
        assert!(matches!(err, CostError::WasteOutOfRange { .. }));
    }

    #[test]
    fn negative_waste_is_rejected() {
        let err = adjusted_unit_price(dec("10"), dec("-5")).unwrap_err();
        assert!(matches!(err, CostError::WasteOutOfRange { .. }));
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = adjusted_unit_price(dec("-0.01"), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, CostError::NegativePrice { .. }));
    }

    // -- line_cost ------------------------------------------------------------

    #[test]
    fn line_cost_scales_grams_to_kilograms() {
        // 200 g at 625/kg = 0.2 * 625 = 125
        let cost = line_cost(200, dec("625")).unwrap();
        assert_eq!(cost, dec("125"));
    }

    #[test]
    fn zero_amount_costs_nothing() {
        assert_eq!(line_cost(0, dec("625")).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = line_cost(-5, dec("625")).unwrap_err();
        assert!(matches!(err, CostError::NegativeAmount { amount_grams: -5 }));
    }

    // -- cost_usage -----------------------------------------------------------

    #[test]
    fn worked_example_from_the_menu_spreadsheet() {
        // 200 g of salmon at 500.00/kg with 20% trim waste:
        // adjusted price 625.00, line cost 125.00.
        let line = cost_usage(&usage(200, "500.00", "20")).unwrap();
        assert_eq!(line.price_after_waste, dec("625.00"));
        assert_eq!(line.line_cost, dec("125.00"));
    }

    #[test]
    fn line_cost_is_rounded_from_full_precision() {
        // 100/kg at 25% waste adjusts to 133.333... (stored as 133.33).
        // 3000 g costs 3 * 133.333... = 400.00 exactly; computing from the
        // already-rounded 133.33 would give 399.99.
        let line = cost_usage(&usage(3000, "100", "25")).unwrap();
        assert_eq!(line.price_after_waste, dec("133.33"));
        assert_eq!(line.line_cost, dec("400.00"));
    }

    #[test]
    fn midpoints_round_away_from_zero() {
        // 5 g at 1.00/kg with no waste costs 0.005 -> 0.01.
        let line = cost_usage(&usage(5, "1.00", "0")).unwrap();
        assert_eq!(line.line_cost, dec("0.01"));
    }

    #[test]
    fn rounded_values_carry_two_decimal_places() {
        // 625 and 625.00 are numerically equal, but serialized money
        // must always show the cents.
        let line = cost_usage(&usage(200, "500.00", "20")).unwrap();
        assert_eq!(line.price_after_waste.to_string(), "625.00");
        assert_eq!(line.line_cost.to_string(), "125.00");
    }

    #[test]
    fn input_fields_are_carried_through_unchanged() {
        let line = cost_usage(&usage(200, "500.00", "20")).unwrap();
        assert_eq!(line.product_name, "salmon");
        assert_eq!(line.amount_grams, 200);
        assert_eq!(line.price_per_kg, dec("500.00"));
        assert_eq!(line.waste_percent, dec("20"));
    }

    // -- cost_usages / aggregate_cost -----------------------------------------

    #[test]
    fn two_identical_lines_double_the_total() {
        let usages = vec![usage(200, "500.00", "20"), usage(200, "500.00", "20")];
        let costed = cost_usages(&usages).unwrap();
        assert_eq!(costed.lines.len(), 2);
        assert_eq!(costed.total_cost, dec("250.00"));
    }

    #[test]
    fn empty_usage_list_totals_zero() {
        let costed = cost_usages(&[]).unwrap();
        assert!(costed.lines.is_empty());
        assert_eq!(costed.total_cost, Decimal::ZERO);
    }

    #[test]
    fn total_equals_sum_of_rounded_lines() {
        // Each line rounds individually; the total is the sum of the
        // rounded values, not the rounded sum of full-precision values.
        let usages = vec![usage(5, "1.00", "0"), usage(5, "1.00", "0")];
        let costed = cost_usages(&usages).unwrap();
        // 0.005 + 0.005 rounds per-line to 0.01 + 0.01 = 0.02 (a rounded
        // sum of the raw values would also be 0.01).
        assert_eq!(costed.total_cost, dec("0.02"));
        let summed = aggregate_cost(&costed.lines).unwrap();
        assert_eq!(summed, costed.total_cost);
    }

    #[test]
    fn one_bad_usage_fails_the_whole_batch() {
        let usages = vec![usage(200, "500.00", "20"), usage(-1, "10", "0")];
        let err = cost_usages(&usages).unwrap_err();
        assert!(matches!(err, CostError::NegativeAmount { .. }));
    }

    #[test]
    fn input_order_is_preserved() {
        let usages: Vec<IngredientUsage> = ["rice", "nori", "salmon"]
            .iter()
            .map(|name| IngredientUsage {
                product_name: (*name).to_owned(),
                amount_grams: 10,
                price_per_kg: dec("10"),
                waste_percent: Decimal::ZERO,
            })
            .collect();
        let costed = cost_usages(&usages).unwrap();
        let names: Vec<&str> = costed.lines.iter().map(|l| l.product_name.as_str()).collect();
        assert_eq!(names, vec!["rice", "nori", "salmon"]);
    }
}
