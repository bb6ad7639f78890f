//! Naive matrix multiplication benchmark, Rust port.
//!
//! Every language port runs the same textbook triple loop on the same
//! kind of input and appends one row per run to a shared CSV file, so the
//! numbers can be compared side by side. Nothing here is optimized on
//! purpose; the interesting part is measuring it the same way everywhere.
//!
//! ## Usage
//!
//! ```
//! use matmul_bench::{Matrix, multiply};
//!
//! let a = Matrix::from_vec(2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! let b = Matrix::from_vec(2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
//! let mut c = Matrix::new(2).unwrap();
//!
//! multiply(&a, &b, &mut c);
//! assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
//! ```
//!
//! A whole benchmark, writing rows to a CSV of your choice:
//!
//! ```no_run
//! use matmul_bench::{BenchConfig, run_benchmark};
//! use matmul_bench::matrix::fill::{seeded_rng, time_seed};
//! use matmul_bench::measure::default_sampler;
//!
//! let config = BenchConfig::new(256, 3, "results.csv");
//! let mut rng = seeded_rng(time_seed());
//! let summary = run_benchmark(&config, default_sampler().as_ref(), &mut rng, &mut std::io::stdout())?;
//! println!("{:.6}", summary.average_secs());
//! # Ok::<(), matmul_bench::BenchError>(())
//! ```
//!
//! ## What's inside
//!
//! - Contiguous row-major [`Matrix`] with fallible allocation
//! - i-j-k multiply kernel
//! - Monotonic stopwatch and per-OS resident memory sampling
//! - Idempotent CSV header creation and per-run row appends

pub mod config;
pub mod error;
pub mod matrix;
pub mod measure;
pub mod results;
pub mod runner;

pub use config::BenchConfig;
pub use error::{BenchError, Result};
pub use matrix::Matrix;
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use runner::{RunSummary, run_benchmark};

/// Matrix multiply: C = A * B
///
/// Runs the naive i-j-k kernel. C is fully overwritten.
///
/// # Panics
///
/// Panics if the three matrices don't share one dimension.
pub fn multiply(a: &Matrix, b: &Matrix, c: &mut Matrix) {
    let n = a.size();
    assert_eq!(b.size(), n, "B: expected {}x{}, got {}x{}", n, n, b.size(), b.size());
    assert_eq!(c.size(), n, "C: expected {}x{}, got {}x{}", n, n, c.size(), c.size());

    matmul_naive_ijk(a.as_slice(), b.as_slice(), c.as_mut_slice(), n);
}
