//! Weil Positivity Experiment Runner
//!
//! Command-line front end for the explicit-formula evaluator: loads a
//! local zero table, runs the functional for each requested sigma, and
//! reports the breakdown plus the positivity verdict.
//!
//! ## Usage
//!
//! ```bash
//! weil --zeros data/zeta_zeros.txt --count 10000 \
//!      --sigma 1.0 --sigma 1.5 --sigma 2.0 --num-primes 500
//! ```

mod loader;

use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use weil_core::PrecisionContext;
use weil_formula::{FormulaConfig, ResultSummary, WeilFunctional};

/// Weil explicit-formula positivity experiment
#[derive(Parser, Debug)]
#[command(name = "weil")]
#[command(version = "0.1.0")]
#[command(about = "Evaluates the Weil explicit formula against a zero table", long_about = None)]
struct Args {
    /// Path to a local zero table (one ordinate per line, ascending)
    #[arg(short = 'z', long)]
    zeros: PathBuf,

    /// Number of zero ordinates to load
    #[arg(short = 'n', long, default_value_t = 10_000)]
    count: usize,

    /// Gaussian width parameter; repeat for several experiments
    #[arg(short = 's', long = "sigma", default_values_t = [1.0, 1.5, 2.0])]
    sigmas: Vec<f64>,

    /// Number of primes in the geometric-side sum
    #[arg(short = 'p', long, default_value_t = 500)]
    num_primes: usize,

    /// Decimal digits of working precision
    #[arg(short = 'd', long, default_value_t = 50)]
    digits: u32,

    /// Write per-sigma result summaries to this JSON file
    #[arg(short = 'j', long)]
    json: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let ctx = PrecisionContext::new(args.digits)?;
    info!(digits = args.digits, "precision established");

    let zeros = loader::load_zeros(&args.zeros, args.count, &ctx)?;
    let config = FormulaConfig::default();

    let mut summaries: Vec<ResultSummary> = Vec::with_capacity(args.sigmas.len());
    let mut all_positive = true;

    for &sigma in &args.sigmas {
        info!(sigma, num_primes = args.num_primes, "running experiment");
        let result =
            WeilFunctional::compute_verified(&zeros, ctx.float(sigma), args.num_primes, &config, &ctx)?;
        let summary = result.summary();
        println!("--- sigma = {sigma} ---");
        println!("{summary}");
        if !summary.positive {
            error!(sigma, total = summary.total, "positivity violated");
            all_positive = false;
        }
        summaries.push(summary);
    }

    if let Some(path) = args.json {
        std::fs::write(&path, serde_json::to_string_pretty(&summaries)?)?;
        info!(path = %path.display(), "wrote result summaries");
    }

    if !all_positive {
        std::process::exit(1);
    }
    Ok(())
}
