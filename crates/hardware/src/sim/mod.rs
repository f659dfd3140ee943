//! Simulation runner and result reporting.

/// Result report types and their text rendering.
pub mod report;

/// Top-level simulator: cache plus workload buffers.
pub mod simulator;

pub use report::SimReport;
pub use simulator::Simulation;
