// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Conservation checks for the quarterly ledger.
//!
//! Two invariants are enforced on every run:
//!
//! ```text
//! NFT revenue = buyback + user rewards + gross profit     (per window)
//! windows cover records 0..N exactly, in order            (per horizon)
//! ```
//!
//! Neither can fail for well-formed parameters; a failure means a bug in the
//! splitter or the partitioner and aborts the run instead of emitting numbers
//! that do not add up.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::money::Usdt;
use crate::split::RevenueSplit;
use crate::window::QuarterWindow;

/// Per-window tolerance for decimal rounding in the split.
const SPLIT_TOLERANCE: Decimal = dec!(0.0001);

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConservationError {
    #[error("quarter {quarter}: revenue {expected} split into {actual}")]
    SplitImbalance { quarter: u32, expected: Usdt, actual: Usdt },

    #[error("window {index} starts at record {actual}, expected {expected}")]
    WindowGap { index: usize, expected: usize, actual: usize },

    #[error("windows cover {covered} of {len} records")]
    IncompleteCoverage { covered: usize, len: usize },
}

// ---------------------------------------------------------------------------
// Revenue ledger
// ---------------------------------------------------------------------------

/// Accumulates the absolute split error across a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevenueLedger {
    cumulative_error: Decimal,
    windows_checked: u32,
}

impl RevenueLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify `revenue == buyback + user_rewards + gross_profit` for one window.
    pub fn verify_split(&mut self, quarter: u32, split: &RevenueSplit) -> Result<(), ConservationError> {
        let expected = split.revenue;
        let actual = split.allocated();
        let error = (expected.0 - actual.0).abs();

        self.cumulative_error += error;
        self.windows_checked += 1;

        if error > SPLIT_TOLERANCE {
            return Err(ConservationError::SplitImbalance { quarter, expected, actual });
        }
        Ok(())
    }

    pub fn cumulative_error(&self) -> Decimal {
        self.cumulative_error
    }

    pub fn windows_checked(&self) -> u32 {
        self.windows_checked
    }
}

// ---------------------------------------------------------------------------
// Window coverage
// ---------------------------------------------------------------------------

/// Check that `windows` tile `0..len` with no gap or overlap.
pub fn verify_coverage(windows: &[QuarterWindow], len: usize) -> Result<(), ConservationError> {
    let mut expected = 0;
    for window in windows {
        if window.start != expected || window.end < window.start {
            return Err(ConservationError::WindowGap {
                index: window.index,
                expected,
                actual: window.start,
            });
        }
        expected = window.end + 1;
    }
    if expected != len {
        return Err(ConservationError::IncompleteCoverage { covered: expected, len });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::partition;

    fn split(revenue: Decimal, buyback: Decimal, rewards: Decimal, profit: Decimal) -> RevenueSplit {
        RevenueSplit {
            revenue: Usdt(revenue),
            buyback: Usdt(buyback),
            user_rewards: Usdt(rewards),
            gross_profit: Usdt(profit),
        }
    }

    #[test]
    fn balanced_split_passes() {
        let mut ledger = RevenueLedger::new();
        let result = ledger.verify_split(1, &split(dec!(100), dec!(20), dec!(30), dec!(50)));
        assert!(result.is_ok(), "balanced split should pass");
        assert_eq!(ledger.windows_checked(), 1);
        assert_eq!(ledger.cumulative_error(), Decimal::ZERO);
    }

    #[test]
    fn imbalanced_split_fails() {
        let mut ledger = RevenueLedger::new();
        let err = ledger
            .verify_split(3, &split(dec!(100), dec!(20), dec!(30), dec!(45)))
            .expect_err("test: 5 USDT went missing");
        assert!(
            matches!(err, ConservationError::SplitImbalance { quarter: 3, .. }),
            "expected SplitImbalance, got: {err}"
        );
    }

    #[test]
    fn rounding_within_tolerance() {
        let mut ledger = RevenueLedger::new();
        let result = ledger.verify_split(
            1,
            &split(dec!(100.0000), dec!(33.3333), dec!(33.3333), dec!(33.3333)),
        );
        assert!(result.is_ok(), "0.0001 rounding should be tolerated");
    }

    #[test]
    fn cumulative_error_accumulates() {
        let mut ledger = RevenueLedger::new();
        let _ = ledger.verify_split(1, &split(dec!(10), dec!(2), dec!(3), dec!(4)));
        let _ = ledger.verify_split(2, &split(dec!(10), dec!(2), dec!(3), dec!(3)));
        assert_eq!(ledger.cumulative_error(), dec!(3));
        assert_eq!(ledger.windows_checked(), 2);
    }

    #[test]
    fn partition_covers_exactly() {
        for len in [1, 91, 92, 400] {
            verify_coverage(&partition(len), len).expect("test: partition must tile");
        }
    }

    #[test]
    fn gap_detected() {
        let windows = [
            QuarterWindow { index: 0, start: 0, end: 90 },
            QuarterWindow { index: 1, start: 92, end: 150 },
        ];
        assert_eq!(
            verify_coverage(&windows, 151),
            Err(ConservationError::WindowGap { index: 1, expected: 91, actual: 92 })
        );
    }

    #[test]
    fn short_coverage_detected() {
        let windows = [QuarterWindow { index: 0, start: 0, end: 90 }];
        assert_eq!(
            verify_coverage(&windows, 100),
            Err(ConservationError::IncompleteCoverage { covered: 91, len: 100 })
        );
    }
}
