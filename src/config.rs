//! Run configuration: matrix size, run count, and where results go.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable that overrides the results file location.
pub const RESULTS_ENV_VAR: &str = "RESULTS_CSV";

/// Tag written in the `language` column of every row this binary emits.
pub const LANGUAGE_TAG: &str = "Rust";

/// `../data/results.csv`, joined with the platform separator.
pub fn default_results_path() -> PathBuf {
    ["..", "data", "results.csv"].iter().collect()
}

/// Pick the results path: a non-empty override wins, else the default.
pub fn resolve_csv_path(override_path: Option<OsString>) -> PathBuf {
    match override_path {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => default_results_path(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub matrix_size: usize,
    pub runs: usize,
    pub csv_path: PathBuf,
}

impl BenchConfig {
    pub fn new(matrix_size: usize, runs: usize, csv_path: impl Into<PathBuf>) -> Self {
        Self {
            matrix_size,
            runs,
            csv_path: csv_path.into(),
        }
    }

    /// Build a config whose CSV path honors [`RESULTS_ENV_VAR`].
    pub fn from_env(matrix_size: usize, runs: usize) -> Self {
        let csv_path = resolve_csv_path(std::env::var_os(RESULTS_ENV_VAR));
        Self::new(matrix_size, runs, csv_path)
    }
}
