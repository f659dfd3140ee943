//! Diagnostic Trace Log Tests.
//!
//! Verifies the per-access log format, that opening failures are fatal at
//! construction, and that write failures surface from `finish` without
//! disturbing the simulation.

use cachesim_core::SimError;
use cachesim_core::cache::{CacheSim, TraceLog};
use cachesim_core::config::CacheConfig;
use pretty_assertions::assert_eq;
use std::fs;

use crate::common::{FailingWriter, SharedBuf, lru, replay};

fn logged_config(path: std::path::PathBuf) -> CacheConfig {
    CacheConfig {
        size_bytes: 1024,
        line_bytes: 64,
        ways: 1,
        log_path: Some(path),
        ..CacheConfig::default()
    }
}

/// One `Accessing` line per access, plus an eviction note after the access
/// that caused it.
#[test]
fn log_file_records_accesses_and_evictions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.log");

    let mut cache = CacheSim::new(&logged_config(path.clone())).unwrap();
    assert_eq!(replay(&mut cache, &[0x0, 0x400, 0x0 + 5]), vec![false, false, false]);
    cache.finish().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Accessing 0|0|0",
            "Accessing 1|0|0",
            "Up to evict index 0",
            "Accessing 0|0|5",
            "Up to evict index 0",
        ]
    );
}

/// Logging was asked for and cannot be honoured: construction fails.
#[test]
fn unopenable_log_path_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("trace.log");

    let err = CacheSim::new(&logged_config(path.clone())).unwrap_err();
    match err {
        SimError::TraceLog { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected TraceLog error, got {other:?}"),
    }
}

/// Without a log path nothing is written and `finish` is a no-op.
#[test]
fn no_log_path_means_no_log() {
    let mut cache = lru(1024, 64, 1);
    let _ = cache.access(0x40);
    assert!(cache.finish().is_ok());
}

/// A failing sink does not change outcomes; the failure is reported at the end.
#[test]
fn write_failure_surfaces_from_finish() {
    let mut cache = lru(1024, 64, 1).with_trace_log(TraceLog::from_writer("broken", FailingWriter));

    assert_eq!(replay(&mut cache, &[0x0, 0x0, 0x400]), vec![false, true, false]);
    assert_eq!(cache.miss_count(), 2);

    match cache.finish() {
        Err(SimError::TraceLog { path, source }) => {
            assert_eq!(path, std::path::PathBuf::from("broken"));
            assert_eq!(source.to_string(), "disk full");
        }
        other => panic!("expected TraceLog error, got {other:?}"),
    }
}

/// Offsets are logged even though they never affect the outcome.
#[test]
fn log_carries_offset_for_diagnostics() {
    let buf = SharedBuf::default();
    let mut cache = lru(1024, 64, 2).with_trace_log(TraceLog::from_writer("mem", buf.clone()));
    let _ = cache.access(0x7C5);
    cache.finish().unwrap();
    // Two ways → 8 sets: tag = 0x7C5 >> 9 = 3, set = (0x7C5 >> 6) & 7 = 7, offset = 5.
    assert_eq!(buf.contents(), "Accessing 3|7|5\n");
}
