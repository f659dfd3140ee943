//! Least Recently Used (LRU) Replacement Policy.
//!
//! Evicts the way with the smallest `last_access` timestamp. Ties go to the
//! lowest way index.
//!
//! Timestamps are written when a line is stored and are not refreshed on a
//! hit, so recency is tracked per set clock rather than per touch. Under a
//! trace with re-references this evicts in fill order.
//!
//! # Performance
//!
//! - **Time Complexity:** `get_victim()`: O(W) where W is the associativity
//! - **Space Complexity:** O(1); the timestamps live in the lines themselves

use super::ReplacementPolicy;
use crate::cache::set::CacheLine;

/// LRU Policy. Stateless; reads timestamps from the set.
#[derive(Debug, Clone, Copy, Default)]
pub struct LruPolicy;

impl ReplacementPolicy for LruPolicy {
    fn get_victim(&mut self, lines: &[CacheLine]) -> usize {
        let mut victim = 0;
        let mut oldest = u64::MAX;
        for (way, line) in lines.iter().enumerate() {
            // Strict comparison keeps the first minimum.
            if line.last_access < oldest {
                oldest = line.last_access;
                victim = way;
            }
        }
        victim
    }

    fn name(&self) -> &'static str {
        "LRU"
    }
}
