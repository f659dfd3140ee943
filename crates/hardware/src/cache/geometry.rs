//! Cache geometry and address decoding.
//!
//! An address is split into three contiguous bit ranges, low to high:
//!
//! ```text
//!  63                    offset_bits + index_bits      offset_bits        0
//! +-----------------------------+---------------------------+-------------+
//! |             tag             |         set index         |   offset    |
//! +-----------------------------+---------------------------+-------------+
//! ```
//!
//! The masks are computed once from the geometry and never change. Decoding is
//! a pure function of the address bits: the simulation is line-granular, and
//! the offset is carried only for diagnostics.

use crate::common::ConfigError;

/// Address split into its tag, set index, and line offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodedAddr {
    /// High-order bits identifying the line within its set.
    pub tag: u64,
    /// Set the line maps to, in `0..num_sets`.
    pub set_index: usize,
    /// Byte offset within the line.
    pub offset: u64,
}

/// Immutable cache shape and the bit masks derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeometry {
    size_bytes: usize,
    line_bytes: usize,
    ways: usize,
    num_sets: usize,
    offset_bits: u32,
    index_bits: u32,
    offset_mask: u64,
    index_mask: u64,
    tag_mask: u64,
}

impl CacheGeometry {
    /// Validates the geometry and derives the address masks.
    ///
    /// # Arguments
    ///
    /// * `size_bytes` - Total capacity.
    /// * `line_bytes` - Bytes per line; must be a power of two.
    /// * `ways` - Associativity; `size_bytes / (line_bytes * ways)` must be a
    ///   power of two.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first inconsistency found.
    pub const fn new(size_bytes: usize, line_bytes: usize, ways: usize) -> Result<Self, ConfigError> {
        if size_bytes == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if line_bytes == 0 {
            return Err(ConfigError::ZeroLineSize);
        }
        if ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if !line_bytes.is_power_of_two() {
            return Err(ConfigError::LineSizeNotPowerOfTwo(line_bytes));
        }

        let uneven = ConfigError::UnevenSets {
            size: size_bytes,
            line: line_bytes,
            ways,
        };
        let Some(set_bytes) = line_bytes.checked_mul(ways) else {
            return Err(uneven);
        };
        if !size_bytes.is_multiple_of(set_bytes) {
            return Err(uneven);
        }
        let num_sets = size_bytes / set_bytes;
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::SetCountNotPowerOfTwo(num_sets));
        }

        let offset_bits = line_bytes.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        let offset_mask = line_bytes as u64 - 1;
        let index_mask = (num_sets as u64 - 1) << offset_bits;
        let tag_mask = !(offset_mask | index_mask);

        Ok(Self {
            size_bytes,
            line_bytes,
            ways,
            num_sets,
            offset_bits,
            index_bits,
            offset_mask,
            index_mask,
            tag_mask,
        })
    }

    /// Splits `addr` into tag, set index, and offset.
    #[inline(always)]
    pub const fn decode(&self, addr: u64) -> DecodedAddr {
        DecodedAddr {
            tag: (addr & self.tag_mask) >> (self.offset_bits + self.index_bits),
            set_index: ((addr & self.index_mask) >> self.offset_bits) as usize,
            offset: addr & self.offset_mask,
        }
    }

    /// Reassembles an address from its parts; the inverse of [`decode`](Self::decode).
    ///
    /// Bits of `tag`, `set_index`, or `offset` that do not fit their field are
    /// discarded.
    pub const fn compose(&self, tag: u64, set_index: usize, offset: u64) -> u64 {
        let shift = self.offset_bits + self.index_bits;
        ((tag << shift) & self.tag_mask)
            | (((set_index as u64) << self.offset_bits) & self.index_mask)
            | (offset & self.offset_mask)
    }

    /// Total capacity in bytes.
    pub const fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    /// Line size in bytes.
    pub const fn line_bytes(&self) -> usize {
        self.line_bytes
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of sets.
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Width of the offset field.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the set index field.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the tag field.
    pub const fn tag_bits(&self) -> u32 {
        u64::BITS - self.offset_bits - self.index_bits
    }

    /// Mask selecting the offset bits.
    pub const fn offset_mask(&self) -> u64 {
        self.offset_mask
    }

    /// Mask selecting the set index bits.
    pub const fn index_mask(&self) -> u64 {
        self.index_mask
    }

    /// Mask selecting the tag bits.
    pub const fn tag_mask(&self) -> u64 {
        self.tag_mask
    }
}
