//! Simulator: owns the cache and the workload buffers side by side.

use tracing::{debug, info};

use crate::cache::CacheSim;
use crate::common::SimError;
use crate::config::{Config, WorkloadConfig, WorkloadKind};
use crate::workload::{self, AddressSpace, Matrix};

use super::report::SimReport;

/// Buffers a workload needs, allocated up front.
#[derive(Debug)]
enum Buffers {
    Multiply { a: Matrix, b: Matrix, c: Matrix },
    Transpose { a: Matrix },
}

/// One configured run: a fresh cache and the workload that drives it.
#[derive(Debug)]
pub struct Simulation {
    cache: CacheSim,
    workload: WorkloadConfig,
    buffers: Buffers,
}

impl Simulation {
    /// Builds the cache and allocates and fills the workload buffers.
    ///
    /// Buffers are aligned to the cache line size.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for an invalid geometry or workload and
    /// [`SimError::TraceLog`] if the diagnostic log cannot be created.
    pub fn new(config: &Config) -> Result<Self, SimError> {
        let cache = CacheSim::new(&config.cache)?;
        let w = &config.workload;
        let mut space = AddressSpace::new(w.base_addr, cache.geometry().line_bytes() as u64);

        let buffers = match w.kind {
            WorkloadKind::Multiply => {
                let mut a = Matrix::new(&mut space, w.n, w.element_bytes)?;
                let mut b = Matrix::new(&mut space, w.n, w.element_bytes)?;
                let c = Matrix::new(&mut space, w.n, w.element_bytes)?;
                workload::fill_random(&mut a, w.fill_seed);
                workload::fill_random(&mut b, w.fill_seed.wrapping_add(1));
                Buffers::Multiply { a, b, c }
            }
            WorkloadKind::Transpose => {
                let mut a = Matrix::new(&mut space, w.n, w.element_bytes)?;
                workload::fill_random(&mut a, w.fill_seed);
                Buffers::Transpose { a }
            }
        };
        debug!(
            kind = w.kind.name(),
            n = w.n,
            base = w.base_addr,
            end = space.watermark(),
            "workload buffers allocated"
        );

        Ok(Self {
            cache,
            workload: w.clone(),
            buffers,
        })
    }

    /// Drives the workload through the cache and reports the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TraceLog`] if the diagnostic log failed during the run.
    pub fn run(&mut self) -> Result<SimReport, SimError> {
        match &mut self.buffers {
            Buffers::Multiply { a, b, c } => workload::multiply(&mut self.cache, a, b, c),
            Buffers::Transpose { a } => workload::transpose(&mut self.cache, a),
        }
        self.cache.finish()?;

        let report = SimReport::from_cache(&self.cache, &self.workload);
        info!(
            accesses = report.accesses,
            misses = report.misses,
            evictions = report.evictions,
            "run complete"
        );
        Ok(report)
    }

    /// The simulated cache.
    pub const fn cache(&self) -> &CacheSim {
        &self.cache
    }
}
