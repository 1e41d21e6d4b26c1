// Copyright © 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! USDT amounts backed by `rust_decimal::Decimal`.
//!
//! The revenue ledger runs in decimal so that a window's split can be checked
//! against its revenue without binary floating-point noise. Everything that
//! leaves the ledger is converted back to `f64` through [`crate::adapter`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

use crate::adapter;

/// A USDT amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Usdt(pub Decimal);

impl Usdt {
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// `None` for NaN, infinities and magnitudes outside `Decimal`'s range.
    pub fn from_f64(v: f64) -> Option<Self> {
        adapter::to_decimal(v).map(Self)
    }

    pub fn to_f64(self) -> Option<f64> {
        adapter::from_decimal(self.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiply by a fraction, `None` on overflow.
    pub fn checked_scale(self, fraction: Decimal) -> Option<Self> {
        self.0.checked_mul(fraction).map(Self)
    }
}

impl Add for Usdt {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl fmt::Display for Usdt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} USDT", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn from_f64_rejects_non_finite() {
        assert!(Usdt::from_f64(f64::NAN).is_none());
        assert!(Usdt::from_f64(f64::INFINITY).is_none());
        assert_eq!(Usdt::from_f64(12.5), Some(Usdt(dec!(12.5))));
    }

    #[test]
    fn addition_is_exact() {
        let total = Usdt(dec!(0.1)) + Usdt(dec!(0.2));
        assert_eq!(total, Usdt(dec!(0.3)));
        assert_eq!(total.to_f64(), Some(0.3));
    }

    #[test]
    fn checked_scale() {
        let amount = Usdt(dec!(1000));
        assert_eq!(amount.checked_scale(dec!(0.2)), Some(Usdt(dec!(200))));
        assert!(Usdt(Decimal::MAX).checked_scale(dec!(2)).is_none());
    }

    #[test]
    fn display_has_unit() {
        assert_eq!(Usdt(dec!(42.5)).to_string(), "42.5 USDT");
    }
}
