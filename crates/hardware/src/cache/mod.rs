//! Set-Associative Cache Simulator.
//!
//! This module implements a passive set-associative cache model driven by a
//! stream of addresses. Each access decodes the address, advances the target
//! set's logical clock, and either hits or stores the line, evicting a victim
//! chosen by the configured replacement policy when the set is full.
//!
//! Hits do not refresh a line's timestamp; recency comes only from the store
//! time stamped with the set clock.

/// Address decoding and derived masks.
pub mod geometry;

/// Cache replacement policy implementations (LRU, Random).
pub mod policies;

/// Cache line and set storage.
pub mod set;

/// Per-access diagnostic log.
pub mod trace;

use std::fmt;
use std::io::{self, Write};

use tracing::{debug, trace};

pub use self::geometry::{CacheGeometry, DecodedAddr};
use self::policies::ReplacementPolicy;
pub use self::set::{CacheLine, CacheSet};
pub use self::trace::TraceLog;
use crate::common::{SimError, StatsError};
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// Cache simulator implementing a set-associative cache with a pluggable
/// replacement policy.
///
/// Single-threaded: `access` mutates set clocks and lines without
/// synchronization, so sharing an instance across threads needs an external lock.
pub struct CacheSim {
    geometry: CacheGeometry,
    sets: Box<[CacheSet]>,
    policy: Box<dyn ReplacementPolicy>,
    stats: CacheStats,
    log: Option<TraceLog>,
}

impl CacheSim {
    /// Creates a cache from its configuration.
    ///
    /// Validates the geometry, builds the policy (seeding the random policy
    /// from `config.seed` or the clock), and opens the diagnostic log if one
    /// was requested.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for an inconsistent geometry and
    /// [`SimError::TraceLog`] if the requested log cannot be created.
    pub fn new(config: &CacheConfig) -> Result<Self, SimError> {
        let geometry = CacheGeometry::new(config.size_bytes, config.line_bytes, config.ways)?;
        let policy = policies::build(config.policy, config.seed);
        let mut cache = Self::with_policy(geometry, policy);
        if let Some(path) = &config.log_path {
            cache.log = Some(TraceLog::create(path)?);
        }

        debug!(
            size = geometry.size_bytes(),
            line = geometry.line_bytes(),
            ways = geometry.ways(),
            sets = geometry.num_sets(),
            policy = config.policy.name(),
            seed = ?config.seed,
            log = ?config.log_path,
            "cache built"
        );
        Ok(cache)
    }

    /// Creates a cache with an already-validated geometry and a custom policy.
    pub fn with_policy(geometry: CacheGeometry, policy: Box<dyn ReplacementPolicy>) -> Self {
        let sets = (0..geometry.num_sets())
            .map(|_| CacheSet::new(geometry.ways()))
            .collect();
        Self {
            geometry,
            sets,
            policy,
            stats: CacheStats::default(),
            log: None,
        }
    }

    /// Attaches a diagnostic log, replacing any existing one.
    #[must_use]
    pub fn with_trace_log(mut self, log: TraceLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Accesses the cache for the specified address.
    ///
    /// # Arguments
    ///
    /// * `addr` - Raw address of the memory reference.
    ///
    /// # Returns
    ///
    /// `true` on a hit, `false` on a miss. A miss has already stored the line
    /// when this returns.
    pub fn access(&mut self, addr: u64) -> bool {
        let decoded = self.geometry.decode(addr);
        self.stats.record_access();
        if let Some(log) = self.log.as_mut() {
            log.access(decoded);
        }

        let set = &mut self.sets[decoded.set_index];
        set.tick();
        if set.lookup(decoded.tag).is_some() {
            return true;
        }

        self.stats.record_miss();
        self.store(decoded);
        false
    }

    /// Stores a missed line into its set, evicting if every way is occupied.
    fn store(&mut self, decoded: DecodedAddr) {
        let set = &mut self.sets[decoded.set_index];
        let now = set.access_counter();
        let line = CacheLine::occupied(decoded.tag, now);

        if let Some(way) = set.first_empty() {
            let _ = set.replace(way, line);
            self.stats.record_cold_fill();
            return;
        }

        let way = self.policy.get_victim(set.lines());
        debug_assert!(way < set.lines().len(), "policy returned way {way} out of range");
        if let Some(log) = self.log.as_mut() {
            log.eviction(way);
        }
        let victim = set.replace(way, line);
        let lifespan = now - victim.last_access;
        self.stats.record_eviction(lifespan);
        trace!(set = decoded.set_index, way, lifespan, "evict");
    }

    /// Returns `true` if the line holding `addr` is resident. No side effects.
    pub fn contains(&self, addr: u64) -> bool {
        let decoded = self.geometry.decode(addr);
        self.sets[decoded.set_index].lookup(decoded.tag).is_some()
    }

    /// Flushes the diagnostic log and reports any write failure it hit.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TraceLog`] if any log write or the final flush failed.
    pub fn finish(&mut self) -> Result<(), SimError> {
        self.log.as_mut().map_or(Ok(()), TraceLog::finish)
    }

    /// Cache geometry and masks.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Display name of the replacement policy.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Accumulated statistics.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Total accesses.
    pub const fn access_count(&self) -> u64 {
        self.stats.access_count()
    }

    /// Accesses that missed.
    pub const fn miss_count(&self) -> u64 {
        self.stats.miss_count()
    }

    /// `misses / accesses`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::NoAccesses`] before the first access.
    pub fn miss_rate(&self) -> Result<f64, StatsError> {
        self.stats.miss_rate()
    }

    /// Lifespan histogram of evicted lines.
    pub const fn lifespan_histogram(&self) -> &std::collections::BTreeMap<u64, u64> {
        self.stats.lifespan_histogram()
    }

    /// Logical clock of set `set_index`, or `None` if out of range.
    pub fn set_access_count(&self, set_index: usize) -> Option<u64> {
        self.sets.get(set_index).map(CacheSet::access_counter)
    }

    /// Read-only view of set `set_index`.
    pub fn set(&self, set_index: usize) -> Option<&CacheSet> {
        self.sets.get(set_index)
    }

    /// Writes the configuration block: inputs, policy, and derived masks.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn write_config(&self, out: &mut impl Write) -> io::Result<()> {
        let g = &self.geometry;
        writeln!(out, "**************Cache Config**************")?;
        writeln!(out, "Metrics:")?;
        writeln!(out, "{:<20}{:>20}", "Total Size(B): ", g.size_bytes())?;
        writeln!(out, "{:<20}{:>20}", "Line Size(B): ", g.line_bytes())?;
        writeln!(out, "{:<20}{:>20}", "Num. Ways: ", g.ways())?;
        writeln!(out, "{:<20}{:>20}", "Num. Sets: ", g.num_sets())?;
        writeln!(out, "{:<20}{:>20}", "Eviction Policy:", self.policy_name())?;
        writeln!(out, "Calculated Masks:")?;
        writeln!(out, "{:<20}{:>20x}", "Offset Mask: ", g.offset_mask())?;
        writeln!(out, "{:<20}{:>20x}", "Index Mask: ", g.index_mask())?;
        writeln!(out, "{:<20}{:>20x}", "Tag Mask: ", g.tag_mask())
    }
}

impl fmt::Debug for CacheSim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheSim")
            .field("geometry", &self.geometry)
            .field("policy", &self.policy.name())
            .field("stats", &self.stats)
            .field("log", &self.log)
            .finish_non_exhaustive()
    }
}
