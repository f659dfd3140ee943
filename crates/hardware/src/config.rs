//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline cache geometry and workload constants.
//! 2. **Structures:** `CacheConfig` for the cache, `WorkloadConfig` for the driver,
//!    and the root `Config` combining both.
//! 3. **Enums:** Replacement policy and workload kind.
//!
//! Configuration is supplied as JSON (`cachesim run --config`) or built directly
//! by the CLI from positional arguments.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::SimError;

/// Default configuration constants.
mod defaults {
    /// Default cache size in bytes (4 KiB).
    pub const CACHE_SIZE: usize = 4096;

    /// Default cache line size in bytes.
    pub const CACHE_LINE: usize = 64;

    /// Default cache associativity (1 way = direct-mapped).
    pub const CACHE_WAYS: usize = 1;

    /// Default matrix dimension.
    pub const MATRIX_N: usize = 64;

    /// First address handed out to workload buffers.
    ///
    /// Non-zero so that no buffer line decodes to tag 0.
    pub const BASE_ADDR: u64 = 0x1000_0000;

    /// Size of one matrix element (`f32`).
    pub const ELEMENT_BYTES: usize = 4;

    /// Seed for the matrix fill.
    pub const FILL_SEED: u64 = 0x5EED;
}

/// Cache replacement policy algorithms.
///
/// Selects which occupied way is evicted when a miss lands in a full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum ReplacementPolicy {
    /// Least Recently Used replacement policy.
    ///
    /// Evicts the way with the oldest timestamp, lowest index on ties.
    #[default]
    #[serde(rename = "LRU", alias = "Lru", alias = "lru")]
    Lru,
    /// Random replacement policy.
    ///
    /// Evicts a uniformly random way drawn from the cache's own generator.
    #[serde(rename = "RR", alias = "Random", alias = "random", alias = "rr")]
    Random,
}

impl ReplacementPolicy {
    /// Short display name, as printed in configuration reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lru => "LRU",
            Self::Random => "RR",
        }
    }
}

impl std::fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Cache geometry, policy, and diagnostics settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Cache line size in bytes
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity (number of ways)
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Replacement policy
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Seed for the random replacement policy; `None` seeds from the clock.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Per-access diagnostic log path; `None` disables the log.
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    const fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache line size in bytes.
    const fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default cache associativity (number of ways).
    const fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
            seed: None,
            log_path: None,
        }
    }
}

/// Memory access pattern driven against the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum WorkloadKind {
    /// Naive row-major `C = A * B`.
    #[default]
    #[serde(alias = "mul", alias = "multiply")]
    Multiply,
    /// In-place full-loop transpose of `A`.
    #[serde(alias = "trans", alias = "transpose")]
    Transpose,
}

impl WorkloadKind {
    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Multiply => "multiply",
            Self::Transpose => "transpose",
        }
    }
}

/// Workload driver parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkloadConfig {
    /// Access pattern
    #[serde(default)]
    pub kind: WorkloadKind,

    /// Matrix dimension (`n x n`)
    #[serde(default = "WorkloadConfig::default_n")]
    pub n: usize,

    /// First address of the simulated buffers
    #[serde(default = "WorkloadConfig::default_base_addr")]
    pub base_addr: u64,

    /// Bytes per matrix element
    #[serde(default = "WorkloadConfig::default_element_bytes")]
    pub element_bytes: usize,

    /// Seed for the random matrix fill
    #[serde(default = "WorkloadConfig::default_fill_seed")]
    pub fill_seed: u64,
}

impl WorkloadConfig {
    const fn default_n() -> usize {
        defaults::MATRIX_N
    }

    const fn default_base_addr() -> u64 {
        defaults::BASE_ADDR
    }

    const fn default_element_bytes() -> usize {
        defaults::ELEMENT_BYTES
    }

    const fn default_fill_seed() -> u64 {
        defaults::FILL_SEED
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            kind: WorkloadKind::default(),
            n: defaults::MATRIX_N,
            base_addr: defaults::BASE_ADDR,
            element_bytes: defaults::ELEMENT_BYTES,
            fill_seed: defaults::FILL_SEED,
        }
    }
}

/// Root configuration: one cache and one workload.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{Config, ReplacementPolicy, WorkloadKind};
///
/// let json = r#"{
///     "cache": { "size_bytes": 32768, "line_bytes": 64, "ways": 8, "policy": "RR", "seed": 1 },
///     "workload": { "kind": "Transpose", "n": 128 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.cache.ways, 8);
/// assert_eq!(config.cache.policy, ReplacementPolicy::Random);
/// assert_eq!(config.workload.kind, WorkloadKind::Transpose);
/// assert_eq!(config.workload.element_bytes, 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Cache under study
    #[serde(default)]
    pub cache: CacheConfig,
    /// Workload driving it
    #[serde(default)]
    pub workload: WorkloadConfig,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigParse`] if the document is malformed.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigFile`] if the file cannot be read and
    /// [`SimError::ConfigParse`] if it is malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
