// Tokenomics Run Report Types
// Structured JSON output for offline analysis of single runs and seed sweeps

use nft_tokenomics::{SimulationOutput, SimulationParameters};
use serde::Serialize;

// ─── Statistics (per-metric aggregation across seeds) ───────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub min: f64,
    pub max: f64,
    pub n: usize,
}

impl Stats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self { mean: 0.0, std_dev: 0.0, ci_lower: 0.0, ci_upper: 0.0, min: 0.0, max: 0.0, n: 0 };
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };
        let std_dev = variance.sqrt();
        let stderr = std_dev / (n as f64).sqrt();
        let z = 1.96; // 95% CI
        Self {
            mean,
            std_dev,
            ci_lower: mean - z * stderr,
            ci_upper: mean + z * stderr,
            min: samples.iter().cloned().fold(f64::INFINITY, f64::min),
            max: samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            n,
        }
    }

    /// Half-width of the confidence interval.
    pub fn ci_half_width(&self) -> f64 {
        (self.ci_upper - self.ci_lower) / 2.0
    }
}

// ─── Single-Seed Result ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SeedResult {
    pub seed: u64,
    pub quarters: usize,
    pub total_nft_revenue: f64,
    pub net_profit: f64,
    pub net_profit_margin: f64,
    pub token_price_change_pct: f64,
    pub modeled_token_price: f64,
    pub final_users: u64,
    pub avg_ltv: f64,
    pub estimated_market_cap: f64,
}

impl SeedResult {
    pub fn from_output(seed: u64, output: &SimulationOutput) -> Self {
        let s = &output.summary;
        Self {
            seed,
            quarters: output.quarterly.len(),
            total_nft_revenue: s.total_nft_revenue,
            net_profit: s.net_profit,
            net_profit_margin: s.net_profit_margin,
            token_price_change_pct: s.token_price_change_pct,
            modeled_token_price: s.modeled_token_price,
            final_users: s.final_users,
            avg_ltv: s.avg_ltv,
            estimated_market_cap: s.estimated_market_cap,
        }
    }
}

// ─── Sweep Report (aggregation over seeds) ──────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub base_seed: u64,
    pub n_runs: usize,
    pub days: u32,
    pub total_nft_revenue: Stats,
    pub net_profit: Stats,
    pub net_profit_margin: Stats,
    pub token_price_change_pct: Stats,
    pub modeled_token_price: Stats,
    pub final_users: Stats,
    pub avg_ltv: Stats,
    pub estimated_market_cap: Stats,
    pub individual_runs: Vec<SeedResult>,
}

// ─── Top-Level Report ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub timestamp: String,
    pub version: &'static str,
    /// `"file:<path>"` or `"synthetic:ChaCha8Rng"`.
    pub source: String,
    pub seed: Option<u64>,
    pub parameters: SimulationParameters,
    pub output: SimulationOutput,
    pub sweep: Option<SweepReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_basic() {
        let stats = Stats::from_samples(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(stats.n, 4);
        assert!((stats.mean - 2.5).abs() < 1e-12);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert!(stats.ci_lower < stats.mean && stats.mean < stats.ci_upper);
    }

    #[test]
    fn test_stats_single_sample_has_zero_width() {
        let stats = Stats::from_samples(&[7.0]);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.ci_half_width(), 0.0);
    }

    #[test]
    fn test_stats_empty() {
        let stats = Stats::from_samples(&[]);
        assert_eq!(stats.n, 0);
        assert_eq!(stats.mean, 0.0);
    }
}
