//! Cache statistics collection and reporting.
//!
//! This module tracks the outcome of every access. It provides:
//! 1. **Counters:** Accesses, misses, cold fills, and evictions.
//! 2. **Lifespans:** A histogram of how many set-accesses each evicted line survived.
//! 3. **Derived metrics:** Miss rate, reported as an error when nothing was accessed.
//!
//! Every miss is either a cold fill (an empty way was used) or an eviction, and
//! every eviction adds exactly one histogram entry, so
//! `misses == cold_fills + evictions == cold_fills + sum(histogram)`.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;

use crate::common::StatsError;

/// Accumulated cache statistics. Never reset; recreate the cache to start over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    accesses: u64,
    misses: u64,
    cold_fills: u64,
    evictions: u64,
    lifespans: BTreeMap<u64, u64>,
}

impl CacheStats {
    #[inline]
    pub(crate) const fn record_access(&mut self) {
        self.accesses += 1;
    }

    #[inline]
    pub(crate) const fn record_miss(&mut self) {
        self.misses += 1;
    }

    #[inline]
    pub(crate) const fn record_cold_fill(&mut self) {
        self.cold_fills += 1;
    }

    #[inline]
    pub(crate) fn record_eviction(&mut self, lifespan: u64) {
        self.evictions += 1;
        *self.lifespans.entry(lifespan).or_insert(0) += 1;
    }

    /// Total accesses.
    pub const fn access_count(&self) -> u64 {
        self.accesses
    }

    /// Accesses that missed.
    pub const fn miss_count(&self) -> u64 {
        self.misses
    }

    /// Accesses that hit.
    pub const fn hit_count(&self) -> u64 {
        self.accesses - self.misses
    }

    /// Misses that filled a never-used way.
    pub const fn cold_fills(&self) -> u64 {
        self.cold_fills
    }

    /// Misses that replaced an occupied way.
    pub const fn evictions(&self) -> u64 {
        self.evictions
    }

    /// `misses / accesses`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::NoAccesses`] if no access has been recorded.
    pub fn miss_rate(&self) -> Result<f64, StatsError> {
        if self.accesses == 0 {
            return Err(StatsError::NoAccesses);
        }
        Ok(self.misses as f64 / self.accesses as f64)
    }

    /// Lifespan (in set-accesses) to number of evicted lines with that lifespan,
    /// in ascending lifespan order.
    pub const fn lifespan_histogram(&self) -> &BTreeMap<u64, u64> {
        &self.lifespans
    }

    /// Writes the statistics block.
    ///
    /// # Errors
    ///
    /// Propagates write failures from `out`.
    pub fn write_report(&self, out: &mut impl Write) -> io::Result<()> {
        let rate = self
            .miss_rate()
            .map_or_else(|e| e.to_string(), |r| significant(100.0 * r, 4));
        writeln!(out, "**************Cache Stats***************")?;
        writeln!(out, "{:<20}{:>20}", "Accesses:", self.accesses)?;
        writeln!(out, "{:<20}{:>20}", "Misses:", self.misses)?;
        writeln!(out, "{:<20}{:>20}", "Cold Fills:", self.cold_fills)?;
        writeln!(out, "{:<20}{:>20}", "Evictions:", self.evictions)?;
        writeln!(out, "{:<20}{:>20}", "Miss Rate(%):", rate)
    }
}

/// Formats `value` with `digits` significant digits, like C's `%g`.
///
/// Fixed notation is used while the decimal exponent lies in `-4..digits`,
/// scientific notation otherwise. Trailing zeros are dropped in both forms,
/// e.g. `0.03125 -> "0.03125"`, `33.333333 -> "33.33"`,
/// `0.00001234 -> "1.234e-05"`.
pub fn significant(value: f64, digits: u32) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let digits = digits.max(1);
    let precision = (digits - 1) as usize;
    let sci = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exponent) = exponent.parse::<i64>() else {
        return sci;
    };

    if exponent < -4 || exponent >= i64::from(digits) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs())
    } else {
        let decimals = (i64::from(digits) - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Drops trailing fractional zeros, and the point if nothing is left after it.
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
