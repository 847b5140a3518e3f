//! Money arithmetic on `rust_decimal`
//!
//! Prices travel as `f64` on the wire and in storage. Sums are computed as
//! `Decimal` so the result does not depend on summation order, and are
//! converted back to `f64` only at the edge.

use rust_decimal::prelude::*;

/// Cents
const DECIMAL_PLACES: u32 = 2;

/// Largest accepted unit price
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Largest accepted quantity per line item
pub const MAX_QUANTITY: u32 = 9999;

/// Convert a wire price into a `Decimal`. `None` for NaN and infinities.
pub fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

/// `unit_price × quantity`, or `None` when the price is not a usable number
pub fn line_total(unit_price: f64, quantity: u32) -> Option<Decimal> {
    to_decimal(unit_price)?.checked_mul(Decimal::from(quantity))
}

/// Round to cents, half-up (midpoint away from zero): 0.125 becomes 0.13
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Back to `f64` for serialization
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}
