// Console tables for quarterly detail and run summary

use nft_tokenomics::{NftTier, QuarterSummary, SummaryMetrics};

use crate::report::SweepReport;

pub fn print_quarters(quarters: &[QuarterSummary]) {
    println!("  {:<4} {:>11} {:>9} {:>13} {:>13} {:>13} {:>8} {:>11} {:>11} {:>9}",
        "Q", "Days", "NFTs", "Revenue", "Buyback", "Net Profit", "Margin", "Actual", "Modeled", "Avg LTV");
    println!("  {}", "-".repeat(112));
    for q in quarters {
        println!("  {:<4} {:>5}-{:<5} {:>9} {:>13.2} {:>13.2} {:>13.2} {:>7.1}% {:>11.6} {:>11.6} {:>9.2}",
            q.quarter,
            q.day_start,
            q.day_end,
            q.activity.total_nfts,
            q.revenue.nft_revenue,
            q.revenue.buyback_amount,
            q.net_profit,
            q.net_profit_margin,
            q.actual_token_price,
            q.modeled_token_price,
            q.ltv.avg_lifetime_value,
        );
    }
    println!("  {}", "-".repeat(112));
}

/// Per-tier issuance, revenue and LTV for one quarter.
pub fn print_tiers(q: &QuarterSummary) {
    println!("  Quarter {} by tier:", q.quarter);
    for tier in NftTier::ALL {
        println!("    {:<9} {:>8} held {:>+7} issued {:>13.2} USDT revenue {:>9.2} LTV",
            tier.label(),
            q.activity.nft_counts.for_tier(tier),
            q.activity.net_issuance.for_tier(tier),
            q.revenue.tier_revenue.for_tier(tier),
            q.ltv.per_tier.for_tier(tier),
        );
    }
    println!();
}

pub fn print_summary(s: &SummaryMetrics) {
    println!("  Revenue split:      {:.0}% buyback / {:.0}% rewards / {:.0}% company",
        s.shares.buyback_pct, s.shares.user_rewards_pct, s.shares.company_profit_pct);
    println!("  NFT revenue:        {:.2} USDT", s.total_nft_revenue);
    println!("  Buyback:            {:.2} USDT ({:.0} tokens)", s.buyback_amount, s.total_tokens_bought_back);
    println!("  User rewards:       {:.2} USDT", s.user_rewards_amount);
    println!("  Gross profit:       {:.2} USDT", s.gross_profit_amount);
    println!("  Costs:              {:.2} marketing + {:.2} operational", s.marketing_costs, s.operational_costs);
    println!("  Net profit:         {:.2} USDT ({:.1}% margin)", s.net_profit, s.net_profit_margin);
    println!("  Token price:        {:.6} -> {:.6} ({:+.1}%), avg {:.6}",
        s.first_token_price, s.last_token_price, s.token_price_change_pct, s.avg_token_price);
    println!("  Modeled price:      {:.6}", s.modeled_token_price);
    println!("  Circulating supply: {:.0}", s.final_circulating_supply);
    println!("  Market cap:         {:.2} USDT", s.estimated_market_cap);
    println!("  Users (NFTs):       {} -> {} ({:+.1}%)", s.initial_users, s.final_users, s.user_growth_pct);
    println!("  Meetings:           {} ({:.1}/day)", s.total_meetings, s.avg_meetings_per_day);
    println!("  LTV:                {:.2} avg, {:.2} total\n", s.avg_ltv, s.total_user_ltv);
}

pub fn print_sweep(sweep: &SweepReport) {
    println!("  Seed sweep: {} runs x {} days, seeds {}..{}",
        sweep.n_runs, sweep.days, sweep.base_seed, sweep.base_seed + sweep.n_runs as u64);
    println!("  {:<24} {:>16} {:>14} {:>16} {:>16}", "Metric", "Mean", "±95% CI", "Min", "Max");
    println!("  {}", "-".repeat(90));
    let rows = [
        ("NFT revenue", &sweep.total_nft_revenue),
        ("Net profit", &sweep.net_profit),
        ("Net margin %", &sweep.net_profit_margin),
        ("Price change %", &sweep.token_price_change_pct),
        ("Modeled price", &sweep.modeled_token_price),
        ("Final users", &sweep.final_users),
        ("Avg LTV", &sweep.avg_ltv),
        ("Market cap", &sweep.estimated_market_cap),
    ];
    for (label, stats) in rows {
        println!("  {:<24} {:>16.4} {:>14.4} {:>16.4} {:>16.4}",
            label, stats.mean, stats.ci_half_width(), stats.min, stats.max);
    }
    println!();
}
