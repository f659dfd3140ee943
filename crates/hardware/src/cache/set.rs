//! Cache line and cache set storage.

/// One way of a set.
///
/// `last_access` is the owning set's logical clock at the moment the line was
/// stored. It is not refreshed by later hits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Tag of the cached line.
    pub tag: u64,
    /// Set clock value when the line was stored.
    pub last_access: u64,
    /// Whether the way holds a line at all.
    pub valid: bool,
}

impl CacheLine {
    /// Creates an occupied line.
    pub const fn occupied(tag: u64, last_access: u64) -> Self {
        Self {
            tag,
            last_access,
            valid: true,
        }
    }
}

/// A fixed group of ways sharing one index and one logical clock.
#[derive(Debug, Clone)]
pub struct CacheSet {
    access_counter: u64,
    lines: Box<[CacheLine]>,
}

impl CacheSet {
    /// Creates a set of `ways` empty lines with its clock at zero.
    pub fn new(ways: usize) -> Self {
        Self {
            access_counter: 0,
            lines: vec![CacheLine::default(); ways].into_boxed_slice(),
        }
    }

    /// Advances the set clock.
    #[inline]
    pub(crate) const fn tick(&mut self) {
        self.access_counter += 1;
    }

    /// Way holding `tag`, if any.
    #[inline]
    pub fn lookup(&self, tag: u64) -> Option<usize> {
        self.lines.iter().position(|l| l.valid && l.tag == tag)
    }

    /// Lowest-index way that has never been filled.
    #[inline]
    pub fn first_empty(&self) -> Option<usize> {
        self.lines.iter().position(|l| !l.valid)
    }

    /// Number of accesses that have touched this set.
    pub const fn access_counter(&self) -> u64 {
        self.access_counter
    }

    /// The set's ways, in index order.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Overwrites way `way` with `line`, returning the previous occupant.
    #[inline]
    pub(crate) fn replace(&mut self, way: usize, line: CacheLine) -> CacheLine {
        std::mem::replace(&mut self.lines[way], line)
    }
}
