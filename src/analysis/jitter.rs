//! Randomness behind the simulated `improvement` metric.
//!
//! Production analysis perturbs `improvement` by a small uniform amount.
//! Nothing else in the pipeline is random, so pinning the source makes the
//! whole analysis reproducible.

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Perturbations are drawn from `[-JITTER_AMPLITUDE, JITTER_AMPLITUDE]`.
pub const JITTER_AMPLITUDE: f64 = 0.1;

pub trait JitterSource: Send + Sync {
    fn sample(&self) -> f64;
}

/// Thread-local entropy. The default for production use.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomJitter;

impl JitterSource for RandomJitter {
    fn sample(&self) -> f64 {
        rand::thread_rng().gen_range(-JITTER_AMPLITUDE..=JITTER_AMPLITUDE)
    }
}

/// Reproducible sequence from a fixed seed.
pub struct SeededJitter {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl JitterSource for SeededJitter {
    fn sample(&self) -> f64 {
        self.rng
            .lock()
            .gen_range(-JITTER_AMPLITUDE..=JITTER_AMPLITUDE)
    }
}

/// Always returns the same value, clamped to the jitter range.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn sample(&self) -> f64 {
        self.0.clamp(-JITTER_AMPLITUDE, JITTER_AMPLITUDE)
    }
}
