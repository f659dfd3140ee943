//! Common utilities shared by the cache model and the workload drivers.
//!
//! This module provides:
//! 1. **Error Handling:** Configuration, statistics, and top-level simulator errors.
//! 2. **Randomness:** A seedable per-instance pseudo-random source.

/// Error types for configuration, statistics, and I/O failures.
pub mod error;

/// Seedable xorshift pseudo-random generator.
pub mod rng;

pub use error::{ConfigError, SimError, StatsError};
pub use rng::XorShift64;
