//! Benchmark driver: setup, the timed run loop, and teardown.
//!
//! Progress goes to `out` (stdout in the binary). Console and CSV failures
//! are logged through `tracing` and skipped; only allocation failures abort.

use crate::config::BenchConfig;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::matrix::fill::fill_random;
use crate::measure::{MemorySampler, memory_delta_mb, time_it};
use crate::multiply;
use crate::results::{append_row, ensure_file};
use rand::Rng;
use std::fmt;
use std::hint::black_box;
use std::io::Write;

const BANNER: &str = "=========== RUST BENCHMARK ===========";
const RULE: &str = "--------------------------------------";

/// Running total of elapsed times, for the closing average.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub runs: usize,
    pub total_secs: f64,
}

impl RunSummary {
    pub fn record(&mut self, elapsed_secs: f64) {
        self.runs += 1;
        self.total_secs += elapsed_secs;
    }

    /// Arithmetic mean; 0 when nothing ran.
    pub fn average_secs(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.total_secs / self.runs as f64
        }
    }
}

/// Progress sink that never fails the benchmark.
///
/// The first write error is logged and later lines are discarded, so a
/// closed stdout costs the console output but not the measurements.
struct Console<'a, W: Write> {
    out: &'a mut W,
    broken: bool,
}

impl<'a, W: Write> Console<'a, W> {
    fn new(out: &'a mut W) -> Self {
        Self { out, broken: false }
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.broken {
            return;
        }
        if let Err(e) = self.out.write_fmt(args).and_then(|()| self.out.write_all(b"\n")) {
            tracing::warn!(error = %e, "console output lost, benchmark continues");
            self.broken = true;
        }
    }
}

/// Run the full benchmark described by `config`.
///
/// A and B are filled once from `rng` and shared by every run; C is
/// reused and overwritten each time.
pub fn run_benchmark<R, W>(
    config: &BenchConfig,
    sampler: &dyn MemorySampler,
    rng: &mut R,
    out: &mut W,
) -> Result<RunSummary>
where
    R: Rng + ?Sized,
    W: Write,
{
    let n = config.matrix_size;
    let csv_path = config.csv_path.as_path();
    let mut console = Console::new(out);

    // Setup
    if let Err(e) = ensure_file(csv_path) {
        tracing::error!(path = %csv_path.display(), error = %e, "could not prepare results file");
    }
    console.line(format_args!("[INFO] CSV path: {}", csv_path.display()));

    let mut a = Matrix::new(n)?;
    let mut b = Matrix::new(n)?;
    let mut c = Matrix::new(n)?;
    fill_random(&mut a, rng);
    fill_random(&mut b, rng);

    console.line(format_args!("{BANNER}"));
    console.line(format_args!("Matrix size: {n}x{n} | Runs: {}", config.runs));
    console.line(format_args!("{RULE}"));

    // Run loop
    let mut summary = RunSummary::default();
    for run_index in 1..=config.runs {
        let mem_before = sampler.resident_mb();
        let ((), elapsed) = time_it(|| multiply(&a, &b, &mut c));
        let mem_after = sampler.resident_mb();
        black_box(&c);

        let mem_used = memory_delta_mb(mem_before, mem_after);
        summary.record(elapsed);

        if let Err(e) = append_row(csv_path, n, run_index, elapsed, mem_used) {
            tracing::error!(path = %csv_path.display(), run_index, error = %e, "dropped CSV row");
        }
        console.line(format_args!("Run {run_index}: {elapsed:.6} s | Memory used: {mem_used} MB"));
    }

    // Teardown
    console.line(format_args!("{RULE}"));
    console.line(format_args!("Average time: {:.6} s", summary.average_secs()));
    console.line(format_args!("{}", "=".repeat(BANNER.len())));

    drop((a, b, c));
    tracing::debug!(runs = summary.runs, total_secs = summary.total_secs, "benchmark finished");
    Ok(summary)
}
