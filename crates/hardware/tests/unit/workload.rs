//! # Workload Tests
//!
//! Address allocation, matrix layout, and the exact reference streams of the
//! multiply and transpose drivers, recorded through the `Vec<u64>` tracer.

use cachesim_core::common::ConfigError;
use cachesim_core::workload::{AddressSpace, Matrix, Tracer, fill_random, multiply, transpose};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn square(space: &mut AddressSpace, n: usize) -> Matrix {
    Matrix::new(space, n, 4).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Address space and layout
// ══════════════════════════════════════════════════════════

#[test]
fn test_alignment_rounds_up_to_power_of_two() {
    let mut space = AddressSpace::new(0x1000, 48);
    assert_eq!(space.alloc(1).unwrap(), 0x1000);
    assert_eq!(space.alloc(1).unwrap(), 0x1040);
    assert_eq!(space.watermark(), 0x1041);
}

#[test]
fn test_unaligned_space_packs_buffers() {
    let mut space = AddressSpace::new(0x10, 0);
    assert_eq!(space.alloc(3).unwrap(), 0x10);
    assert_eq!(space.alloc(3).unwrap(), 0x13);
}

#[rstest]
#[case(0, 4)]
#[case(4, 0)]
fn test_zero_dimension_rejected(#[case] n: usize, #[case] elem: usize) {
    let mut space = AddressSpace::new(0x1000, 64);
    assert_eq!(Matrix::new(&mut space, n, elem), Err(ConfigError::ZeroDimension));
}

#[test]
fn test_matrix_addresses_are_row_major() {
    let mut space = AddressSpace::new(0x2000, 64);
    let m = Matrix::new(&mut space, 4, 8).unwrap();
    assert_eq!(m.base(), 0x2000);
    assert_eq!(m.addr(0, 1), 0x2008);
    assert_eq!(m.addr(1, 0), 0x2020);
    assert_eq!(m.addr(3, 3), 0x2000 + 15 * 8);
}

#[test]
fn test_fill_is_seeded_and_in_unit_range() {
    let mut space = AddressSpace::new(0x1000, 64);
    let mut a = square(&mut space, 8);
    let mut b = square(&mut space, 8);
    fill_random(&mut a, 7);
    fill_random(&mut b, 7);
    assert_eq!(a.as_slice(), b.as_slice());
    assert!(a.as_slice().iter().all(|v| (0.0..1.0).contains(v)));
}

// ══════════════════════════════════════════════════════════
// 2. Multiply
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
fn test_multiply_trace_length(#[case] n: usize) {
    let mut space = AddressSpace::new(0x1000, 64);
    let a = square(&mut space, n);
    let b = square(&mut space, n);
    let mut c = square(&mut space, n);
    let mut trace: Vec<u64> = Vec::new();
    multiply(&mut trace, &a, &b, &mut c);
    assert_eq!(trace.len(), n * n * (1 + 3 * n));
}

#[test]
fn test_multiply_reference_order() {
    let mut space = AddressSpace::new(0x1000, 64);
    let a = square(&mut space, 1);
    let b = square(&mut space, 1);
    let mut c = square(&mut space, 1);
    let mut trace: Vec<u64> = Vec::new();
    multiply(&mut trace, &a, &b, &mut c);
    assert_eq!(trace, vec![0x1080, 0x1000, 0x1040, 0x1080]);
}

#[test]
fn test_multiply_computes_product() {
    let mut space = AddressSpace::new(0x1000, 64);
    let mut a = square(&mut space, 2);
    let mut b = square(&mut space, 2);
    let mut c = square(&mut space, 2);
    for (i, j, x, y) in [(0, 0, 1.0, 5.0), (0, 1, 2.0, 6.0), (1, 0, 3.0, 7.0), (1, 1, 4.0, 8.0)] {
        a.set(i, j, x);
        b.set(i, j, y);
    }
    multiply(&mut Vec::<u64>::new(), &a, &b, &mut c);
    assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
}

#[test]
#[should_panic(expected = "matrix dimensions differ")]
fn test_multiply_dimension_mismatch() {
    let mut space = AddressSpace::new(0x1000, 64);
    let a = square(&mut space, 2);
    let b = square(&mut space, 3);
    let mut c = square(&mut space, 2);
    multiply(&mut Vec::<u64>::new(), &a, &b, &mut c);
}

// ══════════════════════════════════════════════════════════
// 3. Transpose
// ══════════════════════════════════════════════════════════

#[test]
fn test_transpose_trace() {
    let mut space = AddressSpace::new(0x1000, 64);
    let mut a = square(&mut space, 2);
    let mut trace: Vec<u64> = Vec::new();
    transpose(&mut trace, &mut a);
    assert_eq!(
        trace,
        vec![
            0x1000, 0x1000, // (0,0) (0,0)
            0x1004, 0x1008, // (0,1) (1,0)
            0x1008, 0x1004, // (1,0) (0,1)
            0x100C, 0x100C, // (1,1) (1,1)
        ]
    );
}

#[test]
fn test_transpose_double_swap_restores_values() {
    let mut space = AddressSpace::new(0x1000, 64);
    let mut a = square(&mut space, 5);
    fill_random(&mut a, 3);
    let before = a.clone();
    transpose(&mut Vec::<u64>::new(), &mut a);
    assert_eq!(a, before);
}

// ══════════════════════════════════════════════════════════
// 4. Tracer
// ══════════════════════════════════════════════════════════

#[test]
fn test_cache_tracer_reports_hits() {
    let mut cache = crate::common::lru(1024, 64, 1);
    assert!(!Tracer::access(&mut cache, 0x0));
    assert!(Tracer::access(&mut cache, 0x4));
    cache.touch(0x8);
    assert_eq!(cache.access_count(), 3);
}
