//! Bump allocator over a synthetic 64-bit address space.

use crate::common::ConfigError;

/// Hands out aligned, non-overlapping base addresses for workload buffers.
#[derive(Debug, Clone)]
pub struct AddressSpace {
    next: u64,
    align: u64,
}

impl AddressSpace {
    /// Starts allocating at `base`, aligning each buffer to `align` bytes.
    ///
    /// An `align` of zero or one disables alignment; other values are rounded
    /// up to the next power of two.
    pub const fn new(base: u64, align: u64) -> Self {
        let align = if align <= 1 {
            1
        } else {
            align.next_power_of_two()
        };
        Self { next: base, align }
    }

    /// Reserves `bytes` bytes and returns the buffer's base address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AddressOverflow`] if the buffer would run past
    /// the end of the address space.
    pub fn alloc(&mut self, bytes: u64) -> Result<u64, ConfigError> {
        let mask = self.align - 1;
        let base = self
            .next
            .checked_add(mask)
            .ok_or(ConfigError::AddressOverflow)?
            & !mask;
        self.next = base
            .checked_add(bytes)
            .ok_or(ConfigError::AddressOverflow)?;
        Ok(base)
    }

    /// First address that has not been handed out yet.
    pub const fn watermark(&self) -> u64 {
        self.next
    }
}
