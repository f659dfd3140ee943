//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting a victim way when a miss lands in a
//! set whose ways are all occupied.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used (oldest store timestamp).
//! - `Random`: Random selection from a per-cache seeded generator.

/// Least Recently Used replacement policy.
pub mod lru;

/// Random replacement policy.
pub mod random;

pub use lru::LruPolicy;
pub use random::RandomPolicy;

use super::set::CacheLine;
use crate::config::ReplacementPolicy as PolicyType;

/// Trait for cache replacement policies.
///
/// A policy sees only the lines of the set being filled. It is consulted
/// exclusively when every way of that set is occupied.
pub trait ReplacementPolicy {
    /// Selects the way to evict.
    ///
    /// # Arguments
    ///
    /// * `lines` - The full set's ways in index order; never empty.
    ///
    /// # Returns
    ///
    /// A way index in `0..lines.len()`.
    fn get_victim(&mut self, lines: &[CacheLine]) -> usize;

    /// Short display name used in reports.
    fn name(&self) -> &'static str;
}

/// Builds the policy selected by `kind`.
///
/// `seed` feeds the random policy; `None` seeds it from the system clock.
pub fn build(kind: PolicyType, seed: Option<u64>) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyType::Lru => Box::new(LruPolicy),
        PolicyType::Random => Box::new(seed.map_or_else(RandomPolicy::from_clock, RandomPolicy::new)),
    }
}
