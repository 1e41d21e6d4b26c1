// Copyright 2026 Hypermesh Foundation. All rights reserved.
// NFT Tokenomics Simulation Suite - Token Price Model

//! Modeled token price, at two resolutions sharing the same coefficients.
//!
//! Quarter chain: the first quarter is seeded with its observed closing
//! price; every later quarter compounds the previous modeled price by
//! `1 + buyback + distribution + sentiment`, using that quarter's own
//! effects.
//!
//! Daily series: within a window the quarterly effects are spread evenly
//! over [`WINDOW_SIZE`] days and compounded from the observed price on the
//! window's first day. Each window rebases to the observed price, so model
//! error never carries across a quarter boundary.

use crate::params::SimulationParameters;
use crate::types::{DailyModeledPrice, DailyRecord, PriceEffects, QuarterSummary};
use crate::window::{QuarterWindow, WINDOW_SIZE};

/// Days between chart samples in the weekly view.
pub const WEEKLY_STRIDE: usize = 7;

/// Quarter-over-quarter multiplier.
pub fn quarter_growth(effects: &PriceEffects) -> f64 {
    1.0 + effects.buyback + effects.distribution + effects.sentiment
}

/// Per-day multiplier: each effect divided by the window size.
pub fn daily_growth(effects: &PriceEffects) -> f64 {
    let days = WINDOW_SIZE as f64;
    1.0 + effects.buyback / days + effects.distribution / days + effects.sentiment / days
}

/// Next link of the quarter chain. `previous` is `None` for the first
/// quarter, which takes the observed closing price unchanged.
pub fn next_quarter_price(previous: Option<f64>, effects: &PriceEffects, actual_close: f64) -> f64 {
    match previous {
        None => actual_close,
        Some(prev) => prev * quarter_growth(effects),
    }
}

/// Modeled price `offset` days into a window opening at `window_open`.
pub fn modeled_daily_price(window_open: f64, effects: &PriceEffects, offset: usize) -> f64 {
    window_open * daily_growth(effects).powi(offset as i32)
}

/// One entry per record, rebased at every window start.
pub fn daily_series(
    records: &[DailyRecord],
    windows: &[QuarterWindow],
    quarters: &[QuarterSummary],
    params: &SimulationParameters,
) -> Vec<DailyModeledPrice> {
    let mut series = Vec::with_capacity(records.len());
    for (window, quarter) in windows.iter().zip(quarters) {
        let window_open = records[window.start].token_price;
        for j in window.indices() {
            let record = &records[j];
            series.push(DailyModeledPrice {
                day: record.day,
                actual_token_price: record.token_price,
                modeled_token_price: modeled_daily_price(window_open, &quarter.effects, j - window.start),
                reward_pool: record.reward_pool_tokens,
                circulating_supply: params.total_token_supply - record.reward_pool_tokens,
            });
        }
    }
    series
}

/// Every `stride`-th entry starting with the first, for chart density.
pub fn sample_every(series: &[DailyModeledPrice], stride: usize) -> Vec<DailyModeledPrice> {
    series.iter().step_by(stride.max(1)).copied().collect()
}
