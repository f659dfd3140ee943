//! Random Replacement Policy.
//!
//! Evicts a uniformly random way. The generator is owned by the policy, and so
//! by the cache instance, which keeps runs with the same seed reproducible and
//! independent of any other cache in the process.

use super::ReplacementPolicy;
use crate::cache::set::CacheLine;
use crate::common::XorShift64;

/// Random Policy state.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: XorShift64,
}

impl RandomPolicy {
    /// Creates a Random policy with a fixed seed.
    pub const fn new(seed: u64) -> Self {
        Self {
            rng: XorShift64::new(seed),
        }
    }

    /// Creates a Random policy seeded from the system clock.
    pub fn from_clock() -> Self {
        Self {
            rng: XorShift64::from_clock(),
        }
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn get_victim(&mut self, lines: &[CacheLine]) -> usize {
        self.rng.below(lines.len())
    }

    fn name(&self) -> &'static str {
        "RR"
    }
}
