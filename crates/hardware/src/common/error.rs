//! Error definitions for the cache simulator.
//!
//! This module defines every failure the simulator can report. It provides:
//! 1. **Configuration errors:** Inconsistent cache geometry or workload parameters,
//!    detected once at construction.
//! 2. **Statistics errors:** Queries that have no meaningful answer yet.
//! 3. **Top-level errors:** A single `SimError` wrapping the above plus I/O and
//!    parse failures, with a distinct process exit status per category.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid cache geometry or workload configuration.
///
/// Raised by [`CacheGeometry::new`](crate::cache::CacheGeometry::new) and the
/// workload constructors before any state is allocated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Total capacity of zero bytes.
    #[error("cache size must be non-zero")]
    ZeroSize,

    /// Line size of zero bytes.
    #[error("line size must be non-zero")]
    ZeroLineSize,

    /// Associativity of zero ways.
    #[error("associativity must be at least one way")]
    ZeroWays,

    /// Line size is not a power of two, so no offset mask can be derived.
    #[error("line size {0} bytes is not a power of two")]
    LineSizeNotPowerOfTwo(usize),

    /// Capacity is not an exact multiple of `line_bytes * ways`.
    #[error("cache size {size} bytes is not a multiple of {line} B lines x {ways} ways")]
    UnevenSets {
        /// Total capacity in bytes.
        size: usize,
        /// Line size in bytes.
        line: usize,
        /// Associativity.
        ways: usize,
    },

    /// Derived set count is zero or not a power of two.
    #[error("derived set count {0} is not a power of two")]
    SetCountNotPowerOfTwo(usize),

    /// Capacity given in KiB does not fit in `usize` bytes.
    #[error("cache size {0} KiB overflows the host word size")]
    SizeOverflow(usize),

    /// Workload dimension of zero.
    #[error("matrix dimension must be non-zero")]
    ZeroDimension,

    /// Workload buffers do not fit in the 64-bit address space.
    #[error("workload buffers overflow the address space")]
    AddressOverflow,
}

/// Statistics query that cannot be answered from the collected data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    /// Miss rate requested before any access was recorded.
    #[error("no accesses recorded")]
    NoAccesses,
}

/// Top-level simulator error.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid geometry or workload configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Statistics query failed.
    #[error("statistics unavailable: {0}")]
    Stats(#[from] StatsError),

    /// The diagnostic trace log could not be opened or written.
    #[error("trace log {}: {source}", path.display())]
    TraceLog {
        /// Requested log path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A configuration file could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    ConfigFile {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A configuration document is not valid JSON for [`Config`](crate::Config).
    #[error("malformed config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl SimError {
    /// Process exit status for this error category.
    ///
    /// Status 2 is left to the argument parser for usage errors, so every
    /// value returned here is distinct from it and from success.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 3,
            Self::Stats(_) => 4,
            Self::TraceLog { .. } => 5,
            Self::ConfigFile { .. } | Self::ConfigParse(_) => 6,
        }
    }
}
