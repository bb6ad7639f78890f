use matmul_bench::matrix::fill::seeded_rng;
use matmul_bench::measure::{MemorySampler, NullSampler};
use matmul_bench::results::{CSV_HEADER, RunResult, append_result, append_row, ensure_file};
use matmul_bench::{BenchConfig, BenchError, run_benchmark};
use std::cell::Cell;
use std::fs;
use std::io::{self, Write};
use tempfile::TempDir;

fn header_line() -> String {
    CSV_HEADER.join(",")
}

fn read_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// Reports a shrinking RSS so every delta goes negative.
struct ShrinkingSampler {
    next: Cell<u64>,
}

impl MemorySampler for ShrinkingSampler {
    fn resident_mb(&self) -> u64 {
        let v = self.next.get();
        self.next.set(v.saturating_sub(10));
        v
    }
}

/// Stdout whose reader has gone away.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::ErrorKind::BrokenPipe.into())
    }
}

// ============================================================
// Header creation
// ============================================================

#[test]
fn test_ensure_creates_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.csv");

    assert!(ensure_file(&path).unwrap());

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "language,matrix_size,run_index,elapsed_sec,memory_used_mb,timestamp_iso\n"
    );
}

#[test]
fn test_ensure_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("data").join("results.csv");

    ensure_file(&path).unwrap();

    assert_eq!(read_lines(&path), vec![header_line()]);
}

#[test]
fn test_ensure_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.csv");

    ensure_file(&path).unwrap();
    append_row(&path, 4, 1, 0.5, 0).unwrap();
    assert!(!ensure_file(&path).unwrap());
    assert!(!ensure_file(&path).unwrap());

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], header_line());
    assert!(lines[1].starts_with("Rust,4,1,0.500000,0,"));
}

#[test]
fn test_ensure_leaves_foreign_rows_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.csv");
    let existing = format!("{}\nC,128,1,0.012345,0,2025-01-01T00:00:00\n", header_line());
    fs::write(&path, &existing).unwrap();

    ensure_file(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), existing);
}

#[test]
fn test_ensure_fails_when_parent_is_a_file() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let err = ensure_file(&blocker.join("results.csv")).unwrap_err();
    assert!(matches!(err, BenchError::Io { .. }), "{err}");
}

// ============================================================
// Row appends
// ============================================================

#[test]
fn test_row_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.csv");
    ensure_file(&path).unwrap();

    append_row(&path, 128, 2, 1.25, 17).unwrap();

    let lines = read_lines(&path);
    let fields: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(fields.len(), 6);
    assert_eq!(&fields[..5], &["Rust", "128", "2", "1.250000", "17"]);

    let ts = fields[5];
    assert_eq!(ts.len(), 19, "timestamp {ts}");
    assert_eq!(&ts[4..5], "-");
    assert_eq!(&ts[10..11], "T");
    assert_eq!(&ts[13..14], ":");
}

#[test]
fn test_append_result_keeps_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.csv");
    ensure_file(&path).unwrap();

    for run_index in 1..=3 {
        let r = RunResult::now(8, run_index, 0.001 * run_index as f64, 0);
        append_result(&path, &r).unwrap();
    }

    let runs: Vec<String> = read_lines(&path)[1..]
        .iter()
        .map(|l| l.split(',').nth(2).unwrap().to_string())
        .collect();
    assert_eq!(runs, vec!["1", "2", "3"]);
}

#[test]
fn test_append_into_missing_dir_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent").join("results.csv");

    assert!(append_row(&path, 2, 1, 0.1, 0).is_err());
    assert!(!path.exists());
}

// ============================================================
// Full driver
// ============================================================

#[test]
fn test_run_writes_one_row_per_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("results.csv");
    let config = BenchConfig::new(8, 4, &path);
    let mut out = Vec::new();

    let summary = run_benchmark(&config, &NullSampler, &mut seeded_rng(1), &mut out).unwrap();

    assert_eq!(summary.runs, 4);
    assert!(summary.average_secs() >= 0.0);

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1 + 4);
    for (i, line) in lines[1..].iter().enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields[0], "Rust");
        assert_eq!(fields[1], "8");
        assert_eq!(fields[2], (i + 1).to_string());
        assert!(fields[3].parse::<f64>().unwrap() >= 0.0);
        assert_eq!(fields[4], "0");
    }

    let stdout = String::from_utf8(out).unwrap();
    assert!(stdout.contains("Matrix size: 8x8 | Runs: 4"));
    assert!(stdout.contains("Run 1: "));
    assert!(stdout.contains("Run 4: "));
    assert!(!stdout.contains("Run 0: "));
    assert!(stdout.contains("Average time: "));
}

#[test]
fn test_negative_memory_delta_recorded_as_zero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.csv");
    let config = BenchConfig::new(4, 2, &path);
    let sampler = ShrinkingSampler {
        next: Cell::new(500),
    };
    let mut out = Vec::new();

    run_benchmark(&config, &sampler, &mut seeded_rng(3), &mut out).unwrap();

    for line in &read_lines(&path)[1..] {
        assert_eq!(line.split(',').nth(4), Some("0"));
    }
    assert!(String::from_utf8(out).unwrap().contains("Memory used: 0 MB"));
}

#[test]
fn test_second_invocation_appends() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.csv");
    let mut out = Vec::new();

    run_benchmark(&BenchConfig::new(3, 2, &path), &NullSampler, &mut seeded_rng(5), &mut out).unwrap();
    run_benchmark(&BenchConfig::new(5, 3, &path), &NullSampler, &mut seeded_rng(6), &mut out).unwrap();

    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1 + 2 + 3);
    assert_eq!(lines.iter().filter(|l| **l == header_line()).count(), 1);
}

#[test]
fn test_unwritable_csv_does_not_abort() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let config = BenchConfig::new(4, 3, blocker.join("results.csv"));
    let mut out = Vec::new();

    let summary = run_benchmark(&config, &NullSampler, &mut seeded_rng(9), &mut out).unwrap();

    assert_eq!(summary.runs, 3);
    assert!(String::from_utf8(out).unwrap().contains("Run 3: "));
}

#[test]
fn test_closed_stdout_keeps_measuring() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.csv");
    let config = BenchConfig::new(6, 5, &path);

    let summary = run_benchmark(&config, &NullSampler, &mut seeded_rng(4), &mut ClosedPipe).unwrap();

    assert_eq!(summary.runs, 5);
    let lines = read_lines(&path);
    assert_eq!(lines.len(), 1 + 5);
    assert_eq!(lines[5].split(',').nth(2), Some("5"));
}

#[test]
fn test_zero_size_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = BenchConfig::new(0, 2, dir.path().join("results.csv"));
    let mut out = Vec::new();

    let err = run_benchmark(&config, &NullSampler, &mut seeded_rng(0), &mut out).unwrap_err();
    assert!(matches!(err, BenchError::InvalidSize(0)));
}
