//! Conformance runner binary.
//!
//! Runs the YAML chain and shuffle fixtures under `--tests-dir` against the
//! committee core and exits non-zero on the first failure.
//!
//! ## Configuration
//!
//! - `--tests-dir`: fixture directory containing `chain-tests/` and `shuffle-tests/` (required)
//! - `--config`: TOML protocol constants used for shuffle cases (optional)
//! - `--log-format`: "pretty" or "json" (default: pretty, or `LOG_FORMAT`)
//! - `RUST_LOG`: Log level filter (default: info)
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin chaintest -- --tests-dir ./fixtures
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use beacon_committees::{load_suites, run_suites, ProtocolConstants, SimulatedBackend};

#[derive(Parser, Debug)]
#[command(name = "chaintest", version, about = "Run committee conformance fixtures")]
struct Args {
    /// Path to directory of yaml tests.
    #[arg(long = "tests-dir")]
    tests_dir: PathBuf,

    /// Protocol constants file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chaintest=info,beacon_committees=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}

fn run(args: &Args) -> Result<()> {
    let constants = match &args.config {
        Some(path) => ProtocolConstants::from_toml_file(path)
            .with_context(|| format!("Fail to load constants from {}", path.display()))?,
        None => ProtocolConstants::default(),
    };
    info!(params_hash = %constants.params_hash(), "Protocol constants loaded");

    let suites = load_suites(&args.tests_dir).context("Fail to load tests from yaml")?;
    let backend = SimulatedBackend::with_constants(constants);

    info!(suites = suites.len(), "----Running Tests----");
    let start = Instant::now();

    let summary = run_suites(&suites, &backend).context("Test failed")?;

    info!(
        suites = summary.suites,
        cases = summary.cases,
        seconds = start.elapsed().as_secs_f64(),
        "Test runs finished"
    );
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(&args.log_format);

    if let Err(e) = run(&args) {
        error!("Conformance run failed: {e:#}");
        std::process::exit(1);
    }
}
