//! Geometry Validation and Address Decoding Tests.
//!
//! Verifies that `CacheGeometry::new` rejects inconsistent shapes with the
//! right `ConfigError`, and that decoding splits addresses into the expected
//! tag, set index, and offset.

use cachesim_core::cache::CacheGeometry;
use cachesim_core::common::ConfigError;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Validation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::zero_size(0, 64, 1, ConfigError::ZeroSize)]
#[case::zero_line(1024, 0, 1, ConfigError::ZeroLineSize)]
#[case::zero_ways(1024, 64, 0, ConfigError::ZeroWays)]
#[case::line_not_pow2(1024, 48, 1, ConfigError::LineSizeNotPowerOfTwo(48))]
#[case::uneven(1000, 64, 1, ConfigError::UnevenSets { size: 1000, line: 64, ways: 1 })]
#[case::line_larger_than_cache(64, 128, 1, ConfigError::UnevenSets { size: 64, line: 128, ways: 1 })]
#[case::sets_not_pow2(3 * 64 * 2, 64, 2, ConfigError::SetCountNotPowerOfTwo(3))]
fn rejects_inconsistent_geometry(
    #[case] size: usize,
    #[case] line: usize,
    #[case] ways: usize,
    #[case] expected: ConfigError,
) {
    assert_eq!(CacheGeometry::new(size, line, ways), Err(expected));
}

/// Non-power-of-two associativity is fine as long as the set count is a power of two.
#[test]
fn accepts_three_way_cache() {
    let g = CacheGeometry::new(3 * 64 * 4, 64, 3).unwrap();
    assert_eq!(g.num_sets(), 4);
    assert_eq!(g.ways(), 3);
}

#[rstest]
#[case(1024, 64, 1, 16)]
#[case(1024, 64, 2, 8)]
#[case(32 * 1024, 64, 8, 64)]
#[case(4096, 4096, 1, 1)]
fn derives_set_count(
    #[case] size: usize,
    #[case] line: usize,
    #[case] ways: usize,
    #[case] sets: usize,
) {
    let g = CacheGeometry::new(size, line, ways).unwrap();
    assert_eq!(g.num_sets(), sets);
    assert_eq!(g.offset_bits() + g.index_bits() + g.tag_bits(), 64);
}

// ══════════════════════════════════════════════════════════
// 2. Decoding
// ══════════════════════════════════════════════════════════

/// 1 KiB direct-mapped, 64-byte lines: 6 offset bits, 4 index bits.
#[test]
fn decodes_direct_mapped_fields() {
    let g = CacheGeometry::new(1024, 64, 1).unwrap();

    let d = g.decode(0x0);
    assert_eq!((d.tag, d.set_index, d.offset), (0, 0, 0));

    // 0x400 collides with 0x0 on the set but differs in tag.
    let d = g.decode(0x400);
    assert_eq!((d.tag, d.set_index, d.offset), (1, 0, 0));

    // 0x7C5 = 0b111_1100_0101 → tag 1, set 0xF, offset 5.
    let d = g.decode(0x7C5);
    assert_eq!((d.tag, d.set_index, d.offset), (1, 15, 5));
}

/// Addresses within the same line decode to the same (tag, set).
#[test]
fn bytes_of_one_line_share_identity() {
    let g = CacheGeometry::new(4096, 32, 4).unwrap();
    let base = g.decode(0x1_2340);
    for off in 0..32 {
        let d = g.decode(0x1_2340 + off);
        assert_eq!((d.tag, d.set_index), (base.tag, base.set_index));
        assert_eq!(d.offset, off);
    }
    let next = g.decode(0x1_2340 + 32);
    assert_ne!((next.tag, next.set_index), (base.tag, base.set_index));
}

/// The highest address decodes to all-ones fields.
#[test]
fn decodes_top_of_address_space() {
    let g = CacheGeometry::new(1024, 64, 1).unwrap();
    let d = g.decode(u64::MAX);
    assert_eq!(d.offset, 63);
    assert_eq!(d.set_index, 15);
    assert_eq!(d.tag, u64::MAX >> 10);
}

#[test]
fn compose_places_fields() {
    let g = CacheGeometry::new(1024, 64, 2).unwrap();
    // 8 sets: offset 6 bits, index 3 bits, tag from bit 9.
    assert_eq!(g.compose(3, 5, 7), (3 << 9) | (5 << 6) | 7);
}

/// Validation runs in const context, so fixed geometries can be checked at
/// compile time.
#[test]
fn geometry_validates_in_const_context() {
    const TWO_WAY: Result<CacheGeometry, ConfigError> = CacheGeometry::new(1024, 64, 2);
    const UNEVEN: Result<CacheGeometry, ConfigError> = CacheGeometry::new(1000, 64, 2);

    assert_eq!(TWO_WAY.map(|g| g.num_sets()), Ok(8));
    assert_eq!(
        UNEVEN,
        Err(ConfigError::UnevenSets {
            size: 1000,
            line: 64,
            ways: 2
        })
    );
}
