//! Run results, as plain data for printing or JSON export.

use std::io::{self, Write};

use serde::Serialize;

use crate::cache::CacheSim;
use crate::config::WorkloadConfig;
use crate::stats::significant;

/// One `lifespan,occurrences` histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LifespanBucket {
    /// Set-accesses the evicted lines survived.
    pub lifespan: u64,
    /// Number of evicted lines with that lifespan.
    pub occurrences: u64,
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    /// Workload name.
    pub workload: &'static str,
    /// Matrix dimension.
    pub n: usize,
    /// Cache capacity in bytes.
    pub size_bytes: usize,
    /// Line size in bytes.
    pub line_bytes: usize,
    /// Associativity.
    pub ways: usize,
    /// Number of sets.
    pub sets: usize,
    /// Replacement policy name.
    pub policy: &'static str,
    /// Total accesses.
    pub accesses: u64,
    /// Accesses that missed.
    pub misses: u64,
    /// Misses that replaced an occupied way.
    pub evictions: u64,
    /// `misses / accesses`, absent when nothing was accessed.
    pub miss_rate: Option<f64>,
    /// Lifespan histogram in ascending lifespan order.
    pub lifespans: Vec<LifespanBucket>,
}

impl SimReport {
    /// Snapshots the cache's statistics.
    pub fn from_cache(cache: &CacheSim, workload: &WorkloadConfig) -> Self {
        let g = cache.geometry();
        let stats = cache.stats();
        Self {
            workload: workload.kind.name(),
            n: workload.n,
            size_bytes: g.size_bytes(),
            line_bytes: g.line_bytes(),
            ways: g.ways(),
            sets: g.num_sets(),
            policy: cache.policy_name(),
            accesses: stats.access_count(),
            misses: stats.miss_count(),
            evictions: stats.evictions(),
            miss_rate: stats.miss_rate().ok(),
            lifespans: stats
                .lifespan_histogram()
                .iter()
                .map(|(&lifespan, &occurrences)| LifespanBucket {
                    lifespan,
                    occurrences,
                })
                .collect(),
        }
    }

    /// Writes the plain result format: `n`, miss rate, number of histogram
    /// buckets, then one `lifespan,occurrences` line per bucket.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.n)?;
        match self.miss_rate {
            Some(rate) => writeln!(out, "{}", significant(rate, 4))?,
            None => writeln!(out, "n/a")?,
        }
        writeln!(out, "{}", self.lifespans.len())?;
        for bucket in &self.lifespans {
            writeln!(out, "{},{}", bucket.lifespan, bucket.occurrences)?;
        }
        Ok(())
    }
}
