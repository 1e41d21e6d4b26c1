//! Adapter layer: converts between the engine's f64 world and the Decimal ledger.

use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Convert f64 to Decimal. `None` for non-finite or out-of-range values.
pub fn to_decimal(v: f64) -> Option<Decimal> {
    if !v.is_finite() {
        return None;
    }
    Decimal::from_f64(v)
}

/// Convert Decimal to f64. `None` if the value has no f64 counterpart.
pub fn from_decimal(d: Decimal) -> Option<f64> {
    d.to_f64()
}

/// Percentage (0..=100) as a Decimal fraction (0..=1).
pub fn pct_to_fraction(pct: f64) -> Option<Decimal> {
    to_decimal(pct)?.checked_div(dec!(100))
}
