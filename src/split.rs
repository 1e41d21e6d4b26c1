// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Revenue split -- dividing a window's NFT revenue into buyback, user
//! rewards and company gross profit.
//!
//! No value creation occurs here. The company share is the exact decimal
//! remainder `1 - buyback - user_rewards`, so the three buckets add back up
//! to the revenue they were cut from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::adapter::pct_to_fraction;
use crate::money::Usdt;
use crate::types::RevenueShares;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitError {
    #[error("revenue {0} cannot be represented as a decimal amount")]
    UnrepresentableRevenue(f64),

    #[error("share {0}% cannot be represented as a decimal fraction")]
    UnrepresentableShare(f64),

    #[error("shares exceed 100% (buyback {buyback}, user rewards {user_rewards})")]
    SharesExceedWhole { buyback: Decimal, user_rewards: Decimal },

    #[error("decimal overflow while splitting {0}")]
    Overflow(Usdt),

    #[error("{0} has no f64 representation")]
    Unconvertible(Usdt),
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One window's revenue, cut three ways.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueSplit {
    pub revenue: Usdt,
    pub buyback: Usdt,
    pub user_rewards: Usdt,
    pub gross_profit: Usdt,
}

impl RevenueSplit {
    /// Sum of the three buckets.
    pub fn allocated(&self) -> Usdt {
        self.buyback + self.user_rewards + self.gross_profit
    }

    /// Buyback, user rewards and gross profit as f64, in that order.
    pub fn to_f64_buckets(&self) -> Result<(f64, f64, f64), SplitError> {
        let convert = |amount: Usdt| amount.to_f64().ok_or(SplitError::Unconvertible(amount));
        Ok((
            convert(self.buyback)?,
            convert(self.user_rewards)?,
            convert(self.gross_profit)?,
        ))
    }
}

// ---------------------------------------------------------------------------
// RevenueSplitter
// ---------------------------------------------------------------------------

/// Stateless splitter holding the three fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSplitter {
    pub buyback_share: Decimal,
    pub user_rewards_share: Decimal,
    pub company_share: Decimal,
}

impl RevenueSplitter {
    /// Build from percentages. The company share in `shares` is ignored and
    /// re-derived as the decimal remainder.
    pub fn from_shares(shares: &RevenueShares) -> Result<Self, SplitError> {
        let buyback = pct_to_fraction(shares.buyback_pct)
            .ok_or(SplitError::UnrepresentableShare(shares.buyback_pct))?;
        let user_rewards = pct_to_fraction(shares.user_rewards_pct)
            .ok_or(SplitError::UnrepresentableShare(shares.user_rewards_pct))?;

        let company = Decimal::ONE - buyback - user_rewards;
        if company < Decimal::ZERO {
            return Err(SplitError::SharesExceedWhole { buyback, user_rewards });
        }

        Ok(Self {
            buyback_share: buyback,
            user_rewards_share: user_rewards,
            company_share: company,
        })
    }

    /// Split a revenue figure. Negative revenue (net NFT burn) splits the same
    /// way and yields negative buckets.
    pub fn split(&self, revenue: f64) -> Result<RevenueSplit, SplitError> {
        let revenue_usdt =
            Usdt::from_f64(revenue).ok_or(SplitError::UnrepresentableRevenue(revenue))?;

        let cut = |share: Decimal| {
            revenue_usdt
                .checked_scale(share)
                .ok_or(SplitError::Overflow(revenue_usdt))
        };

        Ok(RevenueSplit {
            revenue: revenue_usdt,
            buyback: cut(self.buyback_share)?,
            user_rewards: cut(self.user_rewards_share)?,
            gross_profit: cut(self.company_share)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
