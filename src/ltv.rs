// Copyright 2026 Hypermesh Foundation. All rights reserved.
// NFT Tokenomics Simulation Suite - Lifetime Value

use crate::params::SimulationParameters;
use crate::types::{LtvSnapshot, NftTier, TierCounts, TierValues};

/// Retention-discounted lifetime value per tier.
///
/// One retention rate applies to every tier. Tier-specific retention is not
/// modelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LtvCalculator {
    per_tier: TierValues,
}

impl LtvCalculator {
    pub fn new(params: &SimulationParameters) -> Self {
        let retention = params.retention_pct / 100.0;
        Self {
            per_tier: TierValues::from_fn(|tier| params.ltv_base.for_tier(tier) * retention),
        }
    }

    /// LTV of the NFT population at a window's closing day.
    pub fn snapshot(&self, closing: &TierCounts) -> LtvSnapshot {
        let total_user_ltv: f64 = NftTier::ALL
            .iter()
            .map(|&tier| closing.for_tier(tier) as f64 * self.per_tier.for_tier(tier))
            .sum();
        let holders = closing.total();
        let avg_lifetime_value = if holders > 0 {
            total_user_ltv / holders as f64
        } else {
            0.0
        };

        LtvSnapshot {
            per_tier: self.per_tier,
            total_user_ltv,
            avg_lifetime_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_discounts_every_tier_equally() {
        let params = SimulationParameters::default();
        let per_tier = LtvCalculator::new(&params).snapshot(&TierCounts::default()).per_tier;
        assert!((per_tier.silver - 84.0).abs() < 1e-9);
        assert!((per_tier.gold - 840.0).abs() < 1e-9);
        assert!((per_tier.platinum - 8_400.0).abs() < 1e-9);
    }

    #[test]
    fn snapshot_totals_and_average() {
        let params = SimulationParameters { retention_pct: 100.0, ..Default::default() };
        let calc = LtvCalculator::new(&params);
        let snap = calc.snapshot(&TierCounts::new(10, 2, 1));
        // 10*120 + 2*1200 + 1*12000
        assert!((snap.total_user_ltv - 15_600.0).abs() < 1e-9);
        assert!((snap.avg_lifetime_value - 1_200.0).abs() < 1e-9);
    }

    #[test]
    fn zero_retention_zeroes_everything() {
        let params = SimulationParameters { retention_pct: 0.0, ..Default::default() };
        let snap = LtvCalculator::new(&params).snapshot(&TierCounts::new(50, 20, 5));
        assert_eq!(snap.per_tier, TierValues::new(0.0, 0.0, 0.0));
        assert_eq!(snap.total_user_ltv, 0.0);
        assert_eq!(snap.avg_lifetime_value, 0.0);
    }

    #[test]
    fn no_holders_gives_zero_average() {
        let calc = LtvCalculator::new(&SimulationParameters::default());
        let snap = calc.snapshot(&TierCounts::default());
        assert_eq!(snap.total_user_ltv, 0.0);
        assert_eq!(snap.avg_lifetime_value, 0.0);
        assert!(snap.avg_lifetime_value.is_finite());
    }
}
