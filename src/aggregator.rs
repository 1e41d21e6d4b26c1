// Copyright (c) 2026 Hypermesh Foundation. All rights reserved.
// Licensed under the Business Source License 1.1.
// See the LICENSE file in the repository root for full license text.

//! Quarter aggregation.
//!
//! Runs in two passes over the windows produced by [`crate::window::partition`]:
//!
//! 1. **Window facts** -- everything that depends only on the window's own
//!    records: issuance against the day before the window, revenue and its
//!    split, costs, token flows, circulating supply, LTV, and the
//!    distribution and sentiment coefficients. Windows are independent here.
//! 2. **Fold** -- an [`AggregatorState`] is threaded through the windows in
//!    order, accumulating buyback into the liquidity estimate, deriving the
//!    buyback coefficient from it, and extending the modeled price chain.
//!
//! The output does not depend on how pass 1 is scheduled.

use crate::conservation::RevenueLedger;
use crate::error::EngineError;
use crate::input::InputError;
use crate::ltv::LtvCalculator;
use crate::params::SimulationParameters;
use crate::price_model::next_quarter_price;
use crate::split::{RevenueSplit, RevenueSplitter, SplitError};
use crate::types::{
    ActivitySnapshot, CostBreakdown, DailyRecord, LtvSnapshot, NftTier, PriceEffects,
    QuarterSummary, RevenueBreakdown, TierCounts, TierIssuance, TierValues, TokenMetrics,
};
use crate::window::QuarterWindow;

// ---------------------------------------------------------------------------
// Pass 1: window facts
// ---------------------------------------------------------------------------

/// Per-window quantities that do not depend on earlier windows.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFacts {
    pub window: QuarterWindow,
    pub day_start: u32,
    pub day_end: u32,
    pub activity: ActivitySnapshot,
    pub split: RevenueSplit,
    pub revenue: RevenueBreakdown,
    pub costs: CostBreakdown,
    pub net_profit: f64,
    pub net_profit_margin: f64,
    pub reward_pool: f64,
    pub tokens_bought_back: f64,
    pub tokens_distributed: f64,
    pub circulating_supply: f64,
    pub market_cap: f64,
    pub distribution_effect: f64,
    pub sentiment_effect: f64,
    pub actual_token_price: f64,
    pub ltv: LtvSnapshot,
}

// ---------------------------------------------------------------------------
// Pass 2: accumulator
// ---------------------------------------------------------------------------

/// Running state carried from one window to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregatorState {
    /// Buyback spend over every window folded so far, this one included.
    pub cumulative_buyback: f64,
    /// Modeled closing price of the previous window.
    pub prev_modeled_price: Option<f64>,
}

impl AggregatorState {
    /// Fold one window into the state, returning the next state and the
    /// finished quarter.
    pub fn step(
        self,
        facts: WindowFacts,
        params: &SimulationParameters,
    ) -> Result<(Self, QuarterSummary), InputError> {
        let quarter = facts.window.quarter();
        let buyback = facts.revenue.buyback_amount;

        let cumulative_buyback = self.cumulative_buyback + buyback;
        let estimated_liquidity = params.initial_liquidity + cumulative_buyback * 0.5;
        if estimated_liquidity <= 0.0 {
            return Err(InputError::NonPositiveLiquidity {
                quarter,
                liquidity: estimated_liquidity,
            });
        }

        let liquidity_ratio = buyback / estimated_liquidity;
        let effects = PriceEffects {
            buyback: liquidity_ratio * (params.buyback_price_impact_pct / 100.0),
            distribution: facts.distribution_effect,
            sentiment: facts.sentiment_effect,
        };
        let modeled_token_price =
            next_quarter_price(self.prev_modeled_price, &effects, facts.actual_token_price);

        log::debug!(
            "quarter {quarter}: revenue={:.2} liquidity={:.2} effects=({:.6}, {:.6}, {:.6}) modeled={:.6}",
            facts.revenue.nft_revenue,
            estimated_liquidity,
            effects.buyback,
            effects.distribution,
            effects.sentiment,
            modeled_token_price,
        );

        let summary = QuarterSummary {
            quarter,
            day_start: facts.day_start,
            day_end: facts.day_end,
            days_in_window: facts.window.len() as u32,
            activity: facts.activity,
            revenue: facts.revenue,
            costs: facts.costs,
            net_profit: facts.net_profit,
            net_profit_margin: facts.net_profit_margin,
            reward_pool: facts.reward_pool,
            tokens: TokenMetrics {
                tokens_bought_back: facts.tokens_bought_back,
                tokens_distributed: facts.tokens_distributed,
                circulating_supply: facts.circulating_supply,
                market_cap: facts.market_cap,
                estimated_liquidity,
            },
            effects,
            actual_token_price: facts.actual_token_price,
            modeled_token_price,
            ltv: facts.ltv,
        };

        let next = Self {
            cumulative_buyback,
            prev_modeled_price: Some(modeled_token_price),
        };
        Ok((next, summary))
    }
}

// ---------------------------------------------------------------------------
// QuarterAggregator
// ---------------------------------------------------------------------------

pub struct QuarterAggregator<'a> {
    params: &'a SimulationParameters,
    splitter: RevenueSplitter,
    ltv: LtvCalculator,
}

impl<'a> QuarterAggregator<'a> {
    pub fn new(params: &'a SimulationParameters) -> Result<Self, SplitError> {
        Ok(Self {
            params,
            splitter: RevenueSplitter::from_shares(&params.shares())?,
            ltv: LtvCalculator::new(params),
        })
    }

    /// Summaries for every window, in order. `records` must already be
    /// validated and `windows` must tile them.
    pub fn aggregate(
        &self,
        records: &[DailyRecord],
        windows: &[QuarterWindow],
    ) -> Result<Vec<QuarterSummary>, EngineError> {
        let facts = windows
            .iter()
            .map(|window| self.window_facts(records, window))
            .collect::<Result<Vec<_>, _>>()?;

        let mut ledger = RevenueLedger::new();
        let mut state = AggregatorState::default();
        let mut quarters = Vec::with_capacity(facts.len());
        for window_facts in facts {
            ledger.verify_split(window_facts.window.quarter(), &window_facts.split)?;
            let (next, summary) = state.step(window_facts, self.params)?;
            state = next;
            quarters.push(summary);
        }

        log::debug!(
            "aggregated {} quarters, split rounding error {}",
            ledger.windows_checked(),
            ledger.cumulative_error()
        );
        Ok(quarters)
    }

    /// Pass 1 for a single window.
    pub fn window_facts(
        &self,
        records: &[DailyRecord],
        window: &QuarterWindow,
    ) -> Result<WindowFacts, EngineError> {
        let params = self.params;
        let quarter = window.quarter();
        let days = &records[window.start..=window.end];
        let open = &records[window.start];
        let close = &records[window.end];

        let baseline = baseline_counts(records, window);
        let net_issuance = TierIssuance::between(&baseline, &close.nft_counts);

        let tier_revenue = TierValues::from_fn(|tier| {
            net_issuance.for_tier(tier) as f64 * params.nft_prices.for_tier(tier)
        });
        let nft_revenue = tier_revenue.total();

        let split = self.splitter.split(nft_revenue)?;
        let (buyback_amount, user_rewards_amount, gross_profit_amount) = split.to_f64_buckets()?;
        let revenue = RevenueBreakdown {
            nft_revenue,
            tier_revenue,
            buyback_amount,
            user_rewards_amount,
            gross_profit_amount,
        };

        let day_start = open.day;
        let day_end = close.day;
        let days_in_window = f64::from(day_end - day_start + 1);

        let avg_active_users: f64 = NftTier::ALL
            .iter()
            .map(|&tier| {
                (open.active_nft_counts.for_tier(tier) + close.active_nft_counts.for_tier(tier)) as f64
                    / 2.0
            })
            .sum();
        let costs = CostBreakdown {
            marketing_costs: nft_revenue * (params.marketing_pct / 100.0),
            operational_costs: params.operational_cost_base
                + avg_active_users * params.operational_cost_per_user * days_in_window,
        };

        let net_profit = revenue.gross_profit_amount - costs.marketing_costs - costs.operational_costs;
        let net_profit_margin = if nft_revenue > 0.0 {
            net_profit / nft_revenue * 100.0
        } else {
            0.0
        };

        let actual_token_price = close.token_price;
        let tokens_bought_back = revenue.buyback_amount / actual_token_price;
        let tokens_distributed = revenue.user_rewards_amount / actual_token_price;

        let circulating_supply = params.total_token_supply - close.reward_pool_tokens;
        if circulating_supply <= 0.0 {
            return Err(InputError::ZeroCirculatingSupply { quarter, day: close.day }.into());
        }
        let market_cap = circulating_supply * actual_token_price;

        let distribution_effect =
            -(tokens_distributed / circulating_supply) * (params.distribution_price_impact_pct / 100.0);
        let sentiment_effect = params.market_sentiment / 100.0;

        let meetings: u64 = days.iter().map(|r| r.meetings).sum();
        let activity = ActivitySnapshot {
            nft_counts: close.nft_counts,
            active_nft_counts: close.active_nft_counts,
            total_nfts: close.nft_counts.total(),
            active_total_nfts: close.active_nft_counts.total(),
            net_issuance,
            meetings,
            meetings_per_day: meetings as f64 / days_in_window,
            new_nfts: days.iter().map(|r| r.new_nfts).sum(),
            new_nfts_value: days.iter().map(|r| r.new_nfts_value).sum(),
        };

        Ok(WindowFacts {
            window: *window,
            day_start,
            day_end,
            activity,
            split,
            revenue,
            costs,
            net_profit,
            net_profit_margin,
            reward_pool: close.reward_pool_tokens,
            tokens_bought_back,
            tokens_distributed,
            circulating_supply,
            market_cap,
            distribution_effect,
            sentiment_effect,
            actual_token_price,
            ltv: self.ltv.snapshot(&close.nft_counts),
        })
    }
}

/// Issuance baseline for `window`: tier counts on the day before it starts,
/// or zero for the first window.
pub fn baseline_counts(records: &[DailyRecord], window: &QuarterWindow) -> TierCounts {
    window
        .baseline_index()
        .map(|i| records[i].nft_counts)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::partition;

    fn flat_records(len: u32, counts: TierCounts, price: f64) -> Vec<DailyRecord> {
        (0..len)
            .map(|day| DailyRecord {
                day,
                nft_counts: counts,
                active_nft_counts: counts,
                meetings: 2,
                new_nfts: 0,
                new_nfts_value: 0.0,
                token_price: price,
                reward_pool_tokens: 700_000_000.0,
            })
            .collect()
    }

    #[test]
    fn first_window_counts_issuance_from_zero() {
        let params = SimulationParameters::default();
        let records = flat_records(10, TierCounts::new(10, 2, 1), 0.01);
        let agg = QuarterAggregator::new(&params).expect("test: default split is valid");
        let windows = partition(records.len());
        let facts = agg.window_facts(&records, &windows[0]).expect("test: valid window");

        assert_eq!(facts.activity.net_issuance, TierIssuance { silver: 10, gold: 2, platinum: 1 });
        // 10*100 + 2*1000 + 1*10000
        assert!((facts.revenue.nft_revenue - 13_000.0).abs() < 1e-9);
        assert!((facts.revenue.buyback_amount - 2_600.0).abs() < 1e-9);
        assert!((facts.revenue.user_rewards_amount - 3_900.0).abs() < 1e-9);
        assert!((facts.revenue.gross_profit_amount - 6_500.0).abs() < 1e-9);
    }

    #[test]
    fn later_window_anchors_to_previous_day() {
        let params = SimulationParameters::default();
        let mut records = flat_records(100, TierCounts::new(10, 0, 0), 0.01);
        // Day 90 is the last day of window 0 and the baseline of window 1.
        records[90].nft_counts = TierCounts::new(15, 0, 0);
        for r in &mut records[91..] {
            r.nft_counts = TierCounts::new(18, 0, 0);
        }
        let agg = QuarterAggregator::new(&params).expect("test: default split is valid");
        let windows = partition(records.len());
        assert_eq!(baseline_counts(&records, &windows[1]), TierCounts::new(15, 0, 0));

        let facts = agg.window_facts(&records, &windows[1]).expect("test: valid window");
        assert_eq!(facts.activity.net_issuance.silver, 3);
        assert!((facts.revenue.nft_revenue - 300.0).abs() < 1e-9);
    }

    #[test]
    fn operational_cost_uses_average_active_users() {
        let params = SimulationParameters {
            operational_cost_base: 1_000.0,
            operational_cost_per_user: 2.0,
            ..Default::default()
        };
        let mut records = flat_records(10, TierCounts::new(0, 0, 0), 0.01);
        records[0].active_nft_counts = TierCounts::new(4, 0, 0);
        records[9].active_nft_counts = TierCounts::new(8, 2, 0);
        let agg = QuarterAggregator::new(&params).expect("test: default split is valid");
        let facts = agg
            .window_facts(&records, &partition(10)[0])
            .expect("test: valid window");
        // avg active = (4+8)/2 + (0+2)/2 = 7; 1000 + 7 * 2 * 10 days
        assert!((facts.costs.operational_costs - 1_140.0).abs() < 1e-9);
        assert_eq!(facts.net_profit_margin, 0.0, "zero revenue gives zero margin");
    }

    #[test]
    fn zero_circulating_supply_rejected() {
        let params = SimulationParameters::default();
        let mut records = flat_records(5, TierCounts::new(1, 0, 0), 0.01);
        records[4].reward_pool_tokens = params.total_token_supply;
        let agg = QuarterAggregator::new(&params).expect("test: default split is valid");
        let err = agg
            .aggregate(&records, &partition(5))
            .expect_err("test: zero supply must fail");
        assert!(err.is_invalid_input(), "got {err}");
    }

    #[test]
    fn zero_liquidity_rejected() {
        let params = SimulationParameters { initial_liquidity: 0.0, ..Default::default() };
        // No issuance, so no buyback to lift liquidity off zero.
        let records = flat_records(5, TierCounts::default(), 0.01);
        let agg = QuarterAggregator::new(&params).expect("test: default split is valid");
        let err = agg
            .aggregate(&records, &partition(5))
            .expect_err("test: zero liquidity must fail");
        assert!(matches!(
            err,
            EngineError::InvalidInput(InputError::NonPositiveLiquidity { quarter: 1, .. })
        ));
    }

    #[test]
    fn liquidity_accumulates_half_of_buyback() {
        let params = SimulationParameters::default();
        let mut records = flat_records(182, TierCounts::new(10, 0, 0), 0.01);
        for r in &mut records[91..] {
            r.nft_counts = TierCounts::new(20, 0, 0);
        }
        let agg = QuarterAggregator::new(&params).expect("test: default split is valid");
        let quarters = agg
            .aggregate(&records, &partition(182))
            .expect("test: valid run");
        // Window buybacks: 10*100*20% = 200, then another 200.
        assert!((quarters[0].tokens.estimated_liquidity - 50_100.0).abs() < 1e-9);
        assert!((quarters[1].tokens.estimated_liquidity - 50_200.0).abs() < 1e-9);
        let expected_effect = 200.0 / 50_200.0 * 0.15;
        assert!((quarters[1].effects.buyback - expected_effect).abs() < 1e-15);
    }

    #[test]
    fn state_step_chains_modeled_price() {
        let params = SimulationParameters::default();
        let records = flat_records(182, TierCounts::new(10, 0, 0), 0.02);
        let agg = QuarterAggregator::new(&params).expect("test: default split is valid");
        let quarters = agg
            .aggregate(&records, &partition(182))
            .expect("test: valid run");
        assert_eq!(quarters[0].modeled_token_price, 0.02);
        let growth = 1.0 + quarters[1].effects.buyback + quarters[1].effects.distribution
            + quarters[1].effects.sentiment;
        assert_eq!(quarters[1].modeled_token_price, 0.02 * growth);
    }

    #[test]
    fn meetings_summed_over_window() {
        let params = SimulationParameters::default();
        let records = flat_records(91, TierCounts::new(1, 0, 0), 0.01);
        let agg = QuarterAggregator::new(&params).expect("test: default split is valid");
        let facts = agg
            .window_facts(&records, &partition(91)[0])
            .expect("test: valid window");
        assert_eq!(facts.activity.meetings, 182);
        assert!((facts.activity.meetings_per_day - 2.0).abs() < 1e-12);
    }
}
