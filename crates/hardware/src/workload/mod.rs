//! Workload drivers.
//!
//! Drivers turn a computation into the ordered stream of addresses it would
//! reference and feed that stream to a [`Tracer`], normally a
//! [`CacheSim`](crate::cache::CacheSim). Buffers live in a synthetic
//! [`AddressSpace`], so traces are deterministic and never depend on where the
//! host allocator put the data.

/// Synthetic address allocation for workload buffers.
pub mod address_space;

/// Square `f32` matrices and the multiply/transpose drivers.
pub mod matrix;

pub use address_space::AddressSpace;
pub use matrix::{Matrix, fill_random, multiply, transpose};

use crate::cache::CacheSim;

/// Receiver of a workload's memory references, in program order.
pub trait Tracer {
    /// Handles one reference; returns `true` on a cache hit.
    fn access(&mut self, addr: u64) -> bool;

    /// Handles one reference, discarding the outcome.
    #[inline]
    fn touch(&mut self, addr: u64) {
        let _ = self.access(addr);
    }
}

impl Tracer for CacheSim {
    #[inline]
    fn access(&mut self, addr: u64) -> bool {
        Self::access(self, addr)
    }
}

/// Records the trace without simulating anything; every reference "misses".
impl Tracer for Vec<u64> {
    fn access(&mut self, addr: u64) -> bool {
        self.push(addr);
        false
    }
}
