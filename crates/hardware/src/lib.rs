//! Set-associative cache simulator library.
//!
//! This crate replays a stream of memory addresses against a model of a
//! set-associative cache to measure miss rates and line lifespans:
//! 1. **Cache:** Address decoding, set/way storage, LRU and random replacement.
//! 2. **Statistics:** Access and miss counters plus an eviction lifespan histogram.
//! 3. **Workloads:** Matrix multiply and transpose drivers over a synthetic address space.
//! 4. **Simulation:** Configuration, runner, and result reports.
//!
//! The model is line-granular and single-level. It does not model timing,
//! write policies, coherence, or prefetching.
//!
//! ```
//! use cachesim_core::cache::CacheSim;
//! use cachesim_core::config::CacheConfig;
//!
//! let config = CacheConfig { size_bytes: 1024, line_bytes: 64, ways: 2, ..CacheConfig::default() };
//! let mut cache = CacheSim::new(&config).unwrap();
//! assert!(!cache.access(0x0));
//! assert!(!cache.access(0x400));
//! assert!(cache.access(0x0));
//! assert_eq!(cache.miss_count(), 2);
//! ```

/// Set-associative cache model (geometry, sets, policies, trace log).
pub mod cache;
/// Common types (errors, random source).
pub mod common;
/// Simulator configuration (defaults, enums, config structures).
pub mod config;
/// Simulation runner and reports.
pub mod sim;
/// Cache statistics collection and reporting.
pub mod stats;
/// Workload drivers producing address traces.
pub mod workload;

/// Main cache type; construct with `CacheSim::new`.
pub use crate::cache::CacheSim;
/// Root configuration type; use `Config::default()` or `Config::from_file`.
pub use crate::config::Config;
/// Top-level error type.
pub use crate::common::SimError;
/// One configured run; construct with `Simulation::new`.
pub use crate::sim::Simulation;
