//! Per-run random number generation
//!
//! Every run owns exactly one generator, created from an explicit seed and
//! passed by `&mut` to each stochastic component. Nothing is process-wide.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Generator handle threaded through a simulation run
pub type SimRng = StdRng;

/// Seed used when a scenario does not provide `random_seed`
pub const DEFAULT_SEED: u64 = 42;

/// Create a run generator; `None` draws from OS entropy
pub fn seeded_rng(seed: Option<u64>) -> SimRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
