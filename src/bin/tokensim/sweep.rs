// Seed Sweep: N synthetic horizons with statistical aggregation
// Each run uses seed base+i, computing mean ± 95% CI per headline metric

use nft_tokenomics::{summarize, EngineError, SimulationParameters};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::report::{SeedResult, Stats, SweepReport};
use crate::series::{SeriesConfig, SeriesGenerator};

/// Generate and summarize one synthetic horizon.
pub fn run_single(
    config: &SeriesConfig,
    params: &SimulationParameters,
    seed: u64,
) -> Result<SeedResult, EngineError> {
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let records = SeriesGenerator::new(rng, config.clone()).generate(params);
    let output = summarize(&records, params)?;
    Ok(SeedResult::from_output(seed, &output))
}

/// Run `n_runs` seeds starting at `base_seed` and aggregate.
pub fn run_sweep(
    config: &SeriesConfig,
    params: &SimulationParameters,
    n_runs: usize,
    base_seed: u64,
) -> Result<SweepReport, EngineError> {
    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed + i as u64;
        let result = run_single(config, params, seed)?;
        log::debug!("seed {}: revenue={:.2} margin={:.2}%", seed, result.total_nft_revenue, result.net_profit_margin);
        results.push(result);
    }
    Ok(aggregate(config, base_seed, results))
}

fn aggregate(config: &SeriesConfig, base_seed: u64, results: Vec<SeedResult>) -> SweepReport {
    let stats = |f: fn(&SeedResult) -> f64| {
        Stats::from_samples(&results.iter().map(f).collect::<Vec<_>>())
    };

    SweepReport {
        base_seed,
        n_runs: results.len(),
        days: config.days,
        total_nft_revenue: stats(|r| r.total_nft_revenue),
        net_profit: stats(|r| r.net_profit),
        net_profit_margin: stats(|r| r.net_profit_margin),
        token_price_change_pct: stats(|r| r.token_price_change_pct),
        modeled_token_price: stats(|r| r.modeled_token_price),
        final_users: stats(|r| r.final_users as f64),
        avg_ltv: stats(|r| r.avg_ltv),
        estimated_market_cap: stats(|r| r.estimated_market_cap),
        individual_runs: results,
    }
}
