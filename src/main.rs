//! Benchmark runner: `matmul-bench <matrix_size> <num_runs>`.

use clap::Parser;
use clap::error::ErrorKind;
use matmul_bench::config::{BenchConfig, RESULTS_ENV_VAR};
use matmul_bench::matrix::fill::{seeded_rng, time_seed};
use matmul_bench::measure::default_sampler;
use matmul_bench::run_benchmark;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: matmul-bench <matrix_size> <num_runs>";

#[derive(Parser, Debug)]
#[command(name = "matmul-bench")]
#[command(about = "Time naive n x n matrix multiplication and append results to a shared CSV")]
#[command(version)]
#[command(after_help = "Set RESULTS_CSV to write somewhere other than ../data/results.csv")]
struct Cli {
    /// Dimension n of the square matrices
    matrix_size: usize,

    /// Number of timed multiplications
    num_runs: usize,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            if let Err(io_err) = e.print() {
                tracing::debug!(error = %io_err, "could not print help");
            }
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            tracing::debug!(error = %e, "argument parsing failed");
            println!("{USAGE}");
            return ExitCode::from(1);
        }
    };

    let config = BenchConfig::from_env(cli.matrix_size, cli.num_runs);
    tracing::debug!(
        csv = %config.csv_path.display(),
        env = RESULTS_ENV_VAR,
        "resolved results path"
    );

    let seed = time_seed();
    tracing::debug!(seed, "seeded input generator");
    let mut rng = seeded_rng(seed);
    let sampler = default_sampler();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = run_benchmark(&config, sampler.as_ref(), &mut rng, &mut out);
    if let Err(e) = out.flush() {
        tracing::debug!(error = %e, "stdout flush failed");
    }

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "benchmark aborted");
            ExitCode::FAILURE
        }
    }
}
