// Copyright © 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Simulation parameters and their validation.
//!
//! Every knob the dashboard exposes lives in [`SimulationParameters`]. The
//! company share of revenue is never stored independently: it is derived as
//! `100 - buyback - user_rewards` so the three buckets always sum to 100%.
//! Deserialization goes through [`RawParameters`], which denies unknown
//! fields and runs [`SimulationParameters::validate`] before a value exists.

use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;

use crate::adapter::pct_to_fraction;
use crate::types::{RevenueShares, TierValues};

/// Sentiment is a signed score on this symmetric scale.
pub const SENTIMENT_RANGE: f64 = 10.0;

/// Tolerance when a caller supplies the derived company share explicitly.
const SHARE_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be within 0..=100, got {value}")]
    PercentOutOfRange { field: &'static str, value: f64 },

    #[error("buyback ({buyback}%) + user rewards ({user_rewards}%) exceeds 100%")]
    SplitExceedsRevenue { buyback: f64, user_rewards: f64 },

    #[error("company profit share {given}% does not match derived {derived}%")]
    CompanyProfitMismatch { given: f64, derived: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("market sentiment must be within -10..=10, got {0}")]
    SentimentOutOfRange(f64),

    #[error("total token supply must be positive, got {0}")]
    NonPositiveSupply(f64),

    #[error("initial reward pool {pool} exceeds total supply {supply}")]
    RewardPoolExceedsSupply { pool: f64, supply: f64 },

    #[error("malformed parameters: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// SimulationParameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameters", into = "RawParameters")]
pub struct SimulationParameters {
    /// Share of NFT revenue spent on token buyback (%).
    pub buyback_pct: f64,
    /// Share of NFT revenue paid out as user rewards (%).
    pub user_rewards_pct: f64,
    /// Mint price per NFT tier (USDT).
    pub nft_prices: TierValues,
    /// Undiscounted lifetime value per tier (USDT).
    pub ltv_base: TierValues,
    /// Retention applied uniformly to every tier's LTV (%).
    pub retention_pct: f64,
    /// Fixed operating cost per quarter (USDT).
    pub operational_cost_base: f64,
    /// Operating cost per active user per day (USDT).
    pub operational_cost_per_user: f64,
    /// Marketing spend as a share of NFT revenue (%).
    pub marketing_pct: f64,
    pub total_token_supply: f64,
    pub initial_reward_pool: f64,
    /// Liquidity before any buyback has happened (USDT).
    pub initial_liquidity: f64,
    /// Price impact of buyback at 100% liquidity ratio (%).
    pub buyback_price_impact_pct: f64,
    /// Price impact of distributing the whole circulating supply (%).
    pub distribution_price_impact_pct: f64,
    /// -10 (bearish) ..= +10 (bullish).
    pub market_sentiment: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            buyback_pct: 20.0,
            user_rewards_pct: 30.0,
            nft_prices: TierValues::new(100.0, 1_000.0, 10_000.0),
            ltv_base: TierValues::new(120.0, 1_200.0, 12_000.0),
            retention_pct: 70.0,
            operational_cost_base: 50_000.0,
            operational_cost_per_user: 1.0,
            marketing_pct: 15.0,
            total_token_supply: 1_000_000_000.0,
            initial_reward_pool: 700_000_000.0,
            initial_liquidity: 50_000.0,
            buyback_price_impact_pct: 15.0,
            distribution_price_impact_pct: 8.0,
            market_sentiment: 0.0,
        }
    }
}

impl SimulationParameters {
    /// Company share of revenue, always the remainder of the other two.
    /// Clamped at zero so a full split never reports `-0.0000…`.
    pub fn company_profit_pct(&self) -> f64 {
        (100.0 - self.buyback_pct - self.user_rewards_pct).max(0.0)
    }

    pub fn shares(&self) -> RevenueShares {
        RevenueShares {
            buyback_pct: self.buyback_pct,
            user_rewards_pct: self.user_rewards_pct,
            company_profit_pct: self.company_profit_pct(),
        }
    }

    /// Return a copy with a new revenue split, validated.
    pub fn with_split(&self, buyback_pct: f64, user_rewards_pct: f64) -> Result<Self, ParameterError> {
        let params = Self {
            buyback_pct,
            user_rewards_pct,
            ..self.clone()
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every field. Called at construction and again on every run,
    /// since fields are public and may have been edited in between.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let scalars: [(&'static str, f64); 12] = [
            ("buyback_pct", self.buyback_pct),
            ("user_rewards_pct", self.user_rewards_pct),
            ("retention_pct", self.retention_pct),
            ("operational_cost_base", self.operational_cost_base),
            ("operational_cost_per_user", self.operational_cost_per_user),
            ("marketing_pct", self.marketing_pct),
            ("total_token_supply", self.total_token_supply),
            ("initial_reward_pool", self.initial_reward_pool),
            ("initial_liquidity", self.initial_liquidity),
            ("buyback_price_impact_pct", self.buyback_price_impact_pct),
            ("distribution_price_impact_pct", self.distribution_price_impact_pct),
            ("market_sentiment", self.market_sentiment),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { field });
            }
        }
        if !self.nft_prices.is_finite() {
            return Err(ParameterError::NonFinite { field: "nft_prices" });
        }
        if !self.ltv_base.is_finite() {
            return Err(ParameterError::NonFinite { field: "ltv_base" });
        }

        for (field, value) in [
            ("buyback_pct", self.buyback_pct),
            ("user_rewards_pct", self.user_rewards_pct),
            ("retention_pct", self.retention_pct),
            ("marketing_pct", self.marketing_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ParameterError::PercentOutOfRange { field, value });
            }
        }
        // Same decimal fractions the revenue splitter uses, so a split that
        // passes here always leaves a non-negative company share there.
        let buyback = pct_to_fraction(self.buyback_pct);
        let user_rewards = pct_to_fraction(self.user_rewards_pct);
        let exceeds = match (buyback, user_rewards) {
            (Some(b), Some(u)) => b + u > Decimal::ONE,
            _ => true,
        };
        if exceeds {
            return Err(ParameterError::SplitExceedsRevenue {
                buyback: self.buyback_pct,
                user_rewards: self.user_rewards_pct,
            });
        }

        for (field, value) in [
            ("nft_prices.silver", self.nft_prices.silver),
            ("nft_prices.gold", self.nft_prices.gold),
            ("nft_prices.platinum", self.nft_prices.platinum),
            ("ltv_base.silver", self.ltv_base.silver),
            ("ltv_base.gold", self.ltv_base.gold),
            ("ltv_base.platinum", self.ltv_base.platinum),
            ("operational_cost_base", self.operational_cost_base),
            ("operational_cost_per_user", self.operational_cost_per_user),
            ("initial_reward_pool", self.initial_reward_pool),
            ("initial_liquidity", self.initial_liquidity),
            ("buyback_price_impact_pct", self.buyback_price_impact_pct),
            ("distribution_price_impact_pct", self.distribution_price_impact_pct),
        ] {
            if value < 0.0 {
                return Err(ParameterError::Negative { field, value });
            }
        }

        if self.market_sentiment.abs() > SENTIMENT_RANGE {
            return Err(ParameterError::SentimentOutOfRange(self.market_sentiment));
        }
        if self.total_token_supply <= 0.0 {
            return Err(ParameterError::NonPositiveSupply(self.total_token_supply));
        }
        if self.initial_reward_pool > self.total_token_supply {
            return Err(ParameterError::RewardPoolExceedsSupply {
                pool: self.initial_reward_pool,
                supply: self.total_token_supply,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RawParameters (wire form)
// ---------------------------------------------------------------------------

/// Wire form of [`SimulationParameters`]. Missing fields take the defaults;
/// unknown fields are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawParameters {
    pub buyback_pct: f64,
    pub user_rewards_pct: f64,
    /// Accepted for round-tripping; must agree with the derived value.
    pub company_profit_pct: Option<f64>,
    pub nft_prices: TierValues,
    pub ltv_base: TierValues,
    pub retention_pct: f64,
    pub operational_cost_base: f64,
    pub operational_cost_per_user: f64,
    pub marketing_pct: f64,
    pub total_token_supply: f64,
    pub initial_reward_pool: f64,
    pub initial_liquidity: f64,
    pub buyback_price_impact_pct: f64,
    pub distribution_price_impact_pct: f64,
    pub market_sentiment: f64,
}

impl Default for RawParameters {
    fn default() -> Self {
        Self {
            company_profit_pct: None,
            ..RawParameters::from(SimulationParameters::default())
        }
    }
}

impl From<SimulationParameters> for RawParameters {
    fn from(p: SimulationParameters) -> Self {
        Self {
            company_profit_pct: Some(p.company_profit_pct()),
            buyback_pct: p.buyback_pct,
            user_rewards_pct: p.user_rewards_pct,
            nft_prices: p.nft_prices,
            ltv_base: p.ltv_base,
            retention_pct: p.retention_pct,
            operational_cost_base: p.operational_cost_base,
            operational_cost_per_user: p.operational_cost_per_user,
            marketing_pct: p.marketing_pct,
            total_token_supply: p.total_token_supply,
            initial_reward_pool: p.initial_reward_pool,
            initial_liquidity: p.initial_liquidity,
            buyback_price_impact_pct: p.buyback_price_impact_pct,
            distribution_price_impact_pct: p.distribution_price_impact_pct,
            market_sentiment: p.market_sentiment,
        }
    }
}

impl TryFrom<RawParameters> for SimulationParameters {
    type Error = ParameterError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        let params = SimulationParameters {
            buyback_pct: raw.buyback_pct,
            user_rewards_pct: raw.user_rewards_pct,
            nft_prices: raw.nft_prices,
            ltv_base: raw.ltv_base,
            retention_pct: raw.retention_pct,
            operational_cost_base: raw.operational_cost_base,
            operational_cost_per_user: raw.operational_cost_per_user,
            marketing_pct: raw.marketing_pct,
            total_token_supply: raw.total_token_supply,
            initial_reward_pool: raw.initial_reward_pool,
            initial_liquidity: raw.initial_liquidity,
            buyback_price_impact_pct: raw.buyback_price_impact_pct,
            distribution_price_impact_pct: raw.distribution_price_impact_pct,
            market_sentiment: raw.market_sentiment,
        };
        params.validate()?;

        if let Some(given) = raw.company_profit_pct {
            let derived = params.company_profit_pct();
            if (given - derived).abs() > SHARE_TOLERANCE {
                return Err(ParameterError::CompanyProfitMismatch { given, derived });
            }
        }
        Ok(params)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
