//! Error types for the benchmark harness.
//!
//! Library code returns these; the binary decides what is fatal. CSV
//! failures are logged and skipped, allocation failures abort the process.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BenchError>;

#[derive(Error, Debug)]
pub enum BenchError {
    /// Matrix dimension was zero.
    #[error("matrix size must be positive, got {0}")]
    InvalidSize(usize),

    /// `n * n` overflowed or the buffer could not be reserved.
    #[error("cannot allocate a {n}x{n} matrix")]
    Allocation { n: usize },

    /// Buffer length does not match the requested dimension.
    #[error("dimension mismatch: expected {expected} elements, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Filesystem failure while touching the results file.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV writer failure while emitting a record.
    #[error("CSV error on {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl BenchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
