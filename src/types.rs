// Copyright 2026 Hypermesh Foundation. All rights reserved.
// NFT Tokenomics Simulation Suite - Type Definitions

use serde::{Deserialize, Serialize};

// ─── NFT Tier ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NftTier {
    Silver = 0,
    Gold = 1,
    Platinum = 2,
}

impl NftTier {
    pub const ALL: [NftTier; 3] = [NftTier::Silver, NftTier::Gold, NftTier::Platinum];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        }
    }
}

// ─── Per-tier tables ────────────────────────────────────────────────────────

/// Per-tier NFT head counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierCounts {
    pub silver: u64,
    pub gold: u64,
    pub platinum: u64,
}

impl TierCounts {
    pub fn new(silver: u64, gold: u64, platinum: u64) -> Self {
        Self { silver, gold, platinum }
    }

    pub fn for_tier(&self, tier: NftTier) -> u64 {
        match tier {
            NftTier::Silver => self.silver,
            NftTier::Gold => self.gold,
            NftTier::Platinum => self.platinum,
        }
    }

    pub fn total(&self) -> u64 {
        self.silver + self.gold + self.platinum
    }
}

/// Per-tier monetary or fractional values (prices, LTV bases, revenue).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct TierValues {
    pub silver: f64,
    pub gold: f64,
    pub platinum: f64,
}

impl TierValues {
    pub fn new(silver: f64, gold: f64, platinum: f64) -> Self {
        Self { silver, gold, platinum }
    }

    pub fn for_tier(&self, tier: NftTier) -> f64 {
        match tier {
            NftTier::Silver => self.silver,
            NftTier::Gold => self.gold,
            NftTier::Platinum => self.platinum,
        }
    }

    /// Build a table by evaluating `f` once per tier.
    pub fn from_fn(mut f: impl FnMut(NftTier) -> f64) -> Self {
        Self {
            silver: f(NftTier::Silver),
            gold: f(NftTier::Gold),
            platinum: f(NftTier::Platinum),
        }
    }

    pub fn total(&self) -> f64 {
        self.silver + self.gold + self.platinum
    }

    pub fn is_finite(&self) -> bool {
        self.silver.is_finite() && self.gold.is_finite() && self.platinum.is_finite()
    }
}

/// Signed per-tier change in NFT counts over a window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierIssuance {
    pub silver: i64,
    pub gold: i64,
    pub platinum: i64,
}

impl TierIssuance {
    /// `closing - baseline`, tier by tier.
    pub fn between(baseline: &TierCounts, closing: &TierCounts) -> Self {
        let delta = |tier| closing.for_tier(tier) as i64 - baseline.for_tier(tier) as i64;
        Self {
            silver: delta(NftTier::Silver),
            gold: delta(NftTier::Gold),
            platinum: delta(NftTier::Platinum),
        }
    }

    pub fn for_tier(&self, tier: NftTier) -> i64 {
        match tier {
            NftTier::Silver => self.silver,
            NftTier::Gold => self.gold,
            NftTier::Platinum => self.platinum,
        }
    }
}

// ─── DailyRecord ────────────────────────────────────────────────────────────

/// One day of the upstream simulation, as handed over by the loader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyRecord {
    pub day: u32,
    pub nft_counts: TierCounts,
    pub active_nft_counts: TierCounts,
    #[serde(default)]
    pub meetings: u64,
    #[serde(default)]
    pub new_nfts: u64,
    #[serde(default)]
    pub new_nfts_value: f64,
    pub token_price: f64,
    pub reward_pool_tokens: f64,
}

// ─── QuarterSummary ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RevenueBreakdown {
    pub nft_revenue: f64,
    pub tier_revenue: TierValues,
    pub buyback_amount: f64,
    pub user_rewards_amount: f64,
    pub gross_profit_amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CostBreakdown {
    pub marketing_costs: f64,
    pub operational_costs: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TokenMetrics {
    pub tokens_bought_back: f64,
    pub tokens_distributed: f64,
    pub circulating_supply: f64,
    pub market_cap: f64,
    pub estimated_liquidity: f64,
}

/// Unitless growth-rate contributions for one window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceEffects {
    pub buyback: f64,
    pub distribution: f64,
    pub sentiment: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct LtvSnapshot {
    pub per_tier: TierValues,
    pub total_user_ltv: f64,
    pub avg_lifetime_value: f64,
}

/// NFT population and activity over a window.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActivitySnapshot {
    pub nft_counts: TierCounts,
    pub active_nft_counts: TierCounts,
    pub total_nfts: u64,
    pub active_total_nfts: u64,
    pub net_issuance: TierIssuance,
    pub meetings: u64,
    pub meetings_per_day: f64,
    pub new_nfts: u64,
    pub new_nfts_value: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuarterSummary {
    /// 1-based.
    pub quarter: u32,
    pub day_start: u32,
    pub day_end: u32,
    pub days_in_window: u32,
    pub activity: ActivitySnapshot,
    pub revenue: RevenueBreakdown,
    pub costs: CostBreakdown,
    pub net_profit: f64,
    pub net_profit_margin: f64,
    pub reward_pool: f64,
    pub tokens: TokenMetrics,
    pub effects: PriceEffects,
    pub actual_token_price: f64,
    pub modeled_token_price: f64,
    pub ltv: LtvSnapshot,
}

// ─── DailyModeledPrice ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyModeledPrice {
    pub day: u32,
    pub actual_token_price: f64,
    pub modeled_token_price: f64,
    pub reward_pool: f64,
    pub circulating_supply: f64,
}

// ─── SummaryMetrics ─────────────────────────────────────────────────────────

/// Revenue split in effect for a run, in percent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RevenueShares {
    pub buyback_pct: f64,
    pub user_rewards_pct: f64,
    pub company_profit_pct: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SummaryMetrics {
    pub total_nft_revenue: f64,
    pub buyback_amount: f64,
    pub user_rewards_amount: f64,
    pub gross_profit_amount: f64,
    pub marketing_costs: f64,
    pub operational_costs: f64,
    pub net_profit: f64,
    pub net_profit_margin: f64,
    pub total_tokens_bought_back: f64,

    pub first_token_price: f64,
    pub last_token_price: f64,
    pub token_price_change_pct: f64,
    pub avg_token_price: f64,
    pub modeled_token_price: f64,
    pub final_circulating_supply: f64,
    pub estimated_market_cap: f64,

    pub initial_users: u64,
    pub final_users: u64,
    pub user_growth_pct: f64,
    pub total_meetings: u64,
    pub avg_meetings_per_day: f64,
    pub avg_ltv: f64,
    pub total_user_ltv: f64,

    pub shares: RevenueShares,
}

// ─── SimulationOutput ───────────────────────────────────────────────────────

/// Everything the presentation layer consumes for one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationOutput {
    pub quarterly: Vec<QuarterSummary>,
    pub daily: Vec<DailyModeledPrice>,
    pub summary: SummaryMetrics,
}
