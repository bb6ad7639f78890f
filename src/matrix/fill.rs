//! Random input generation.
//!
//! The generator is owned by the caller and passed in by reference. The
//! binary seeds one [`StdRng`] from the clock at startup and reuses it for
//! both inputs.

use super::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Seed derived from the current wall-clock time.
///
/// Falls back to 0 if the clock reads before the Unix epoch.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Build the process RNG from a seed.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Assign every cell a uniform value in `[0.0, 1.0)`.
pub fn fill_random<R: Rng + ?Sized>(m: &mut Matrix, rng: &mut R) {
    for x in m.as_mut_slice() {
        *x = rng.random::<f64>();
    }
}
