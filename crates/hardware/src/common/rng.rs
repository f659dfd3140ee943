//! Seedable pseudo-random source.
//!
//! A xorshift64 generator: three shifts and three XORs per draw. Cheap enough
//! for the eviction hot path and reproducible from a single `u64` seed. Each
//! owner holds its own instance, so two caches never share random state.

use std::time::{SystemTime, UNIX_EPOCH};

/// Substitute for a zero seed, which would lock xorshift at zero forever.
const ZERO_SEED_REPLACEMENT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Xorshift64 pseudo-random generator.
#[derive(Debug, Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Creates a generator from `seed`.
    ///
    /// A zero seed is replaced by a fixed non-zero constant.
    pub const fn new(seed: u64) -> Self {
        let state = if seed == 0 {
            ZERO_SEED_REPLACEMENT
        } else {
            seed
        };
        Self { state }
    }

    /// Creates a generator seeded from the system clock.
    ///
    /// Two generators created this way are not reproducible across runs.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        Self::new(nanos)
    }

    /// Returns the next raw 64-bit value.
    #[inline]
    pub const fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Returns a value in `[0, bound)`.
    ///
    /// `bound` must be non-zero. The modulo bias is negligible for the
    /// small bounds used here (associativity).
    #[inline]
    pub const fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }

    /// Returns an `f32` uniformly distributed in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }
}
