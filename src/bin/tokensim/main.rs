// NFT Tokenomics Simulator CLI
// Quarterly breakdown, modeled token price and summary for a daily NFT series
//
// Usage:
//   cargo run --release --bin tokensim                          # Synthetic 730-day horizon, seed 0
//   cargo run --release --bin tokensim -- --days 365 --seed 42  # Custom synthetic horizon
//   cargo run --release --bin tokensim -- --runs 30             # Seed sweep with 95% CI
//   cargo run --release --bin tokensim -- --input records.json  # Summarize recorded series
//   cargo run --release --bin tokensim -- --params params.json --out report.json

mod report;
mod series;
mod sweep;
mod table;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use nft_tokenomics::{summarize, DailyRecord, EngineError, SimulationParameters};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use report::RunReport;
use series::{SeriesConfig, SeriesGenerator};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("{path}: {source}")]
    Json { path: PathBuf, source: serde_json::Error },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to encode report: {0}")]
    Encode(serde_json::Error),
}

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    days: u32,
    runs: usize,
    seed: u64,
    input: Option<PathBuf>,
    params: Option<PathBuf>,
    out: Option<PathBuf>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        days: 730,
        runs: 1,
        seed: 0,
        input: None,
        params: None,
        out: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--days" => {
                i += 1;
                if i < args.len() {
                    cli.days = args[i].parse().unwrap_or(730);
                }
            }
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(1);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--input" => {
                i += 1;
                cli.input = args.get(i).map(PathBuf::from);
            }
            "--params" => {
                i += 1;
                cli.params = args.get(i).map(PathBuf::from);
            }
            "--out" => {
                i += 1;
                cli.out = args.get(i).map(PathBuf::from);
            }
            _ => {
                log::warn!("unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| CliError::Io { path: path.clone(), source })?;
    serde_json::from_str(&text).map_err(|source| CliError::Json { path: path.clone(), source })
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn run(cli: CliArgs) -> Result<(), CliError> {
    let params: SimulationParameters = match &cli.params {
        Some(path) => read_json(path)?,
        None => SimulationParameters::default(),
    };
    let config = SeriesConfig { days: cli.days, ..Default::default() };

    let (records, source, seed): (Vec<DailyRecord>, String, Option<u64>) = match &cli.input {
        Some(path) => (read_json(path)?, format!("file:{}", path.display()), None),
        None => {
            let rng = ChaCha8Rng::seed_from_u64(cli.seed);
            let records = SeriesGenerator::new(rng, config.clone()).generate(&params);
            (records, "synthetic:ChaCha8Rng".to_string(), Some(cli.seed))
        }
    };

    println!("\n  NFT Tokenomics Simulator v{}", env!("CARGO_PKG_VERSION"));
    println!("  Source: {} | Days: {}\n", source, records.len());

    let start = Instant::now();
    let output = summarize(&records, &params)?;
    table::print_quarters(&output.quarterly);
    if let Some(last) = output.quarterly.last() {
        table::print_tiers(last);
    }
    table::print_summary(&output.summary);
    log::info!("run finished in {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);

    let sweep = if cli.runs > 1 && cli.input.is_none() {
        let report = sweep::run_sweep(&config, &params, cli.runs, cli.seed)?;
        table::print_sweep(&report);
        Some(report)
    } else {
        if cli.runs > 1 {
            log::warn!("--runs ignored for recorded input");
        }
        None
    };

    if let Some(path) = &cli.out {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis().to_string())
            .unwrap_or_default();
        let report = RunReport {
            timestamp,
            version: env!("CARGO_PKG_VERSION"),
            source,
            seed,
            parameters: params,
            output,
            sweep,
        };
        let json = serde_json::to_string_pretty(&report).map_err(CliError::Encode)?;
        std::fs::write(path, json).map_err(|source| CliError::Io { path: path.clone(), source })?;
        println!("  Results saved to: {}\n", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(parse_args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
