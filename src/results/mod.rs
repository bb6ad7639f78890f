//! Append-only CSV results file shared by every language port.
//!
//! The file is opened and closed on every call; nothing is held across
//! runs. There is no locking, so two benchmark processes writing the same
//! path may interleave rows.

use crate::config::LANGUAGE_TAG;
use crate::error::{BenchError, Result};
use chrono::{Local, NaiveDateTime};
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

/// Column names, in order. Every port writes exactly this header.
pub const CSV_HEADER: [&str; 6] = [
    "language",
    "matrix_size",
    "run_index",
    "elapsed_sec",
    "memory_used_mb",
    "timestamp_iso",
];

/// Local time, second resolution, no offset: `YYYY-MM-DDTHH:MM:SS`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One benchmark run, written as a single CSV row and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub matrix_size: usize,
    /// 1-based.
    pub run_index: usize,
    pub elapsed_seconds: f64,
    pub memory_used_mb: u64,
    pub timestamp: NaiveDateTime,
}

impl RunResult {
    /// Stamp a result with the current local time.
    pub fn now(matrix_size: usize, run_index: usize, elapsed_seconds: f64, memory_used_mb: u64) -> Self {
        Self {
            matrix_size,
            run_index,
            elapsed_seconds,
            memory_used_mb,
            timestamp: Local::now().naive_local(),
        }
    }

    /// Fields in [`CSV_HEADER`] order.
    pub fn to_record(&self) -> [String; 6] {
        [
            LANGUAGE_TAG.to_string(),
            self.matrix_size.to_string(),
            self.run_index.to_string(),
            format!("{:.6}", self.elapsed_seconds),
            self.memory_used_mb.to_string(),
            iso_timestamp(&self.timestamp),
        ]
    }
}

pub fn iso_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn writer_for(file: File) -> csv::Writer<File> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file)
}

/// Make sure `path` exists and starts with [`CSV_HEADER`].
///
/// Creates missing parent directories. An existing file is left alone, so
/// calling this any number of times never duplicates the header or loses
/// rows. Returns `true` if the file was created by this call.
pub fn ensure_file(path: &Path) -> Result<bool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| BenchError::io(parent, e))?;
    }

    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(BenchError::io(path, e)),
    };

    let mut wtr = writer_for(file);
    wtr.write_record(CSV_HEADER)
        .map_err(|e| BenchError::csv(path, e))?;
    wtr.flush().map_err(|e| BenchError::io(path, e))?;

    tracing::debug!(path = %path.display(), "created results file");
    Ok(true)
}

/// Append one row for `result`.
///
/// Call [`ensure_file`] first; a file that vanished in between is
/// recreated without a header.
pub fn append_result(path: &Path, result: &RunResult) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| BenchError::io(path, e))?;

    let mut wtr = writer_for(file);
    wtr.write_record(result.to_record())
        .map_err(|e| BenchError::csv(path, e))?;
    wtr.flush().map_err(|e| BenchError::io(path, e))?;
    Ok(())
}

/// Append a row for a run that just finished, timestamped now.
pub fn append_row(
    path: &Path,
    matrix_size: usize,
    run_index: usize,
    elapsed_seconds: f64,
    memory_used_mb: u64,
) -> Result<()> {
    let result = RunResult::now(matrix_size, run_index, elapsed_seconds, memory_used_mb);
    append_result(path, &result)
}
