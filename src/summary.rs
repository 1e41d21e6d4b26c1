// Copyright 2026 Hypermesh Foundation. All rights reserved.
// NFT Tokenomics Simulation Suite - Summary Reducer

use crate::params::SimulationParameters;
use crate::types::{DailyModeledPrice, DailyRecord, QuarterSummary, SummaryMetrics};

/// Collapse a finished run into its headline figures.
///
/// Money totals are straight sums over quarters, except net profit, which is
/// recomputed from the summed components. Price, user and activity figures
/// come from the daily records; supply and market cap from the last entry of
/// the modeled daily series.
pub fn reduce(
    records: &[DailyRecord],
    quarterly: &[QuarterSummary],
    daily: &[DailyModeledPrice],
    params: &SimulationParameters,
) -> SummaryMetrics {
    let mut summary = SummaryMetrics {
        shares: params.shares(),
        ..Default::default()
    };

    for q in quarterly {
        summary.total_nft_revenue += q.revenue.nft_revenue;
        summary.buyback_amount += q.revenue.buyback_amount;
        summary.user_rewards_amount += q.revenue.user_rewards_amount;
        summary.gross_profit_amount += q.revenue.gross_profit_amount;
        summary.marketing_costs += q.costs.marketing_costs;
        summary.operational_costs += q.costs.operational_costs;
        summary.total_tokens_bought_back += q.tokens.tokens_bought_back;
    }
    summary.net_profit =
        summary.gross_profit_amount - summary.marketing_costs - summary.operational_costs;
    summary.net_profit_margin = if summary.total_nft_revenue > 0.0 {
        summary.net_profit / summary.total_nft_revenue * 100.0
    } else {
        0.0
    };

    if let Some(last) = quarterly.last() {
        summary.modeled_token_price = last.modeled_token_price;
        summary.avg_ltv = last.ltv.avg_lifetime_value;
        summary.total_user_ltv = last.ltv.total_user_ltv;
    }

    if let (Some(first), Some(last)) = (records.first(), records.last()) {
        summary.first_token_price = first.token_price;
        summary.last_token_price = last.token_price;
        summary.token_price_change_pct = (last.token_price / first.token_price - 1.0) * 100.0;

        let days = records.len() as f64;
        summary.avg_token_price = records.iter().map(|r| r.token_price).sum::<f64>() / days;

        summary.initial_users = first.nft_counts.total();
        summary.final_users = last.nft_counts.total();
        summary.user_growth_pct = if summary.initial_users > 0 {
            (summary.final_users as f64 / summary.initial_users as f64 - 1.0) * 100.0
        } else {
            0.0
        };

        summary.total_meetings = records.iter().map(|r| r.meetings).sum();
        summary.avg_meetings_per_day = summary.total_meetings as f64 / days;
    }

    if let Some(last_day) = daily.last() {
        summary.final_circulating_supply = last_day.circulating_supply;
        summary.estimated_market_cap = last_day.circulating_supply * last_day.actual_token_price;
    }

    summary
}
