//! Pure dish cost model for the Brigade ordering backend.
//!
//! Given a list of raw-ingredient usages (amount, unit price, waste
//! percentage), this crate derives the waste-adjusted unit price and cost
//! of every ingredient line and the aggregate cost of the dish. It has no
//! I/O and no persistence awareness; every function is a deterministic
//! pure function of its inputs.
//!
//! # Formulas
//!
//! For a usage of `amount_grams` at `price_per_kg` with `waste_percent`:
//!
//! ```text
//! price_after_waste = price_per_kg / (1 - waste_percent / 100)
//! line_cost         = (amount_grams / 1000) * price_after_waste
//! total_cost        = sum(line_cost over all lines)
//! ```
//!
//! # Numeric semantics
//!
//! All monetary values are [`Decimal`] -- no binary floating point.
//! Intermediate results are computed in full precision; the values
//! destined for persistence are rounded to 2 decimal places with the
//! round-half-up (midpoint-away-from-zero) strategy. The aggregate is the
//! sum of the *rounded* line costs, so a stored header total always equals
//! the sum of its stored lines exactly.
//!
//! # Usage
//!
//! ```
//! use brigade_costing::cost_usages;
//! use brigade_types::IngredientUsage;
//! use rust_decimal::Decimal;
//!
//! # fn main() -> Result<(), brigade_costing::CostError> {
//! let usages = vec![IngredientUsage {
//!     product_name: String::from("salmon"),
//!     amount_grams: 200,
//!     price_per_kg: Decimal::new(500_00, 2),
//!     waste_percent: Decimal::new(20_00, 2),
//! }];
//!
//! let costed = cost_usages(&usages)?;
//! assert_eq!(costed.total_cost, Decimal::new(125_00, 2));
//! # Ok(())
//! # }
//! ```

pub mod model;

// Re-export primary types at crate root.
pub use model::{
    adjusted_unit_price, aggregate_cost, cost_usage, cost_usages, line_cost, CostedLine,
    CostedUsages,
};

use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by the cost model.
///
/// All variants describe malformed input; they are surfaced before any
/// persistence attempt and are fully recoverable by the caller correcting
/// the request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CostError {
    /// The price per kilogram must not be negative.
    #[error("price per kg must not be negative, got {price_per_kg}")]
    NegativePrice {
        /// The invalid price.
        price_per_kg: Decimal,
    },

    /// The waste percentage must stay below 100: at 100 the whole
    /// ingredient is discarded and the effective unit price diverges.
    #[error("waste percent must be in [0, 100), got {waste_percent}")]
    WasteOutOfRange {
        /// The invalid waste percentage.
        waste_percent: Decimal,
    },

    /// The consumed amount must not be negative.
    #[error("amount must not be negative, got {amount_grams} g")]
    NegativeAmount {
        /// The invalid amount in grams.
        amount_grams: i32,
    },

    /// A decimal operation exceeded the representable range.
    #[error("cost arithmetic overflowed while computing {context}")]
    Overflow {
        /// Which computation overflowed.
        context: &'static str,
    },
}
