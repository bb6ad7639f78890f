//! Timing and memory instrumentation around a single kernel call.

pub mod memory;

pub use memory::{MemorySampler, NullSampler, default_sampler, memory_delta_mb};

use std::time::Instant;

/// Monotonic wall-clock stopwatch.
///
/// Backed by [`Instant`], so elapsed time never goes negative and has
/// sub-microsecond resolution on every supported platform.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since [`Stopwatch::start`], fractional.
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Run `f` and return its output with the elapsed seconds.
pub fn time_it<T>(f: impl FnOnce() -> T) -> (T, f64) {
    let watch = Stopwatch::start();
    let out = f();
    (out, watch.elapsed_secs())
}
