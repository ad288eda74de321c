// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search statistics.
//!
//! Counters are incremented by the driver as it sweeps and are carried on
//! the query report for tests and diagnostics. They never influence the
//! search itself.

use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

/// The events the driver counts.
#[derive(EnumCountMacro, Debug, Copy, Clone)]
#[repr(u8)]
pub enum Counter {
    /// Zeroboard bucket lookups issued (prefix and terminal).
    BucketLookups,

    /// Entries accepted by a lookup after the dedup filter.
    SuffixMatches,

    /// Multisets registered by a fast path (all-minimum, all-maximum, or
    /// an ascent equality hit).
    FastPathMatches,

    /// Prefix positions abandoned because their minimum completion
    /// overshot the query.
    Backtracks,
}

/// Flat counter storage, one slot per [`Counter`].
#[derive(Debug, Default, Clone)]
pub struct Statistics {
    stats: [u64; Counter::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counter) {
        self.stats[counter as usize] += 1;
    }

    /// Increment the specified counter by `n`.
    pub fn add(&mut self, counter: Counter, n: u64) {
        self.stats[counter as usize] += n;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counter) -> u64 {
        self.stats[counter as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let stats = Statistics::new();
        assert_eq!(stats.get(Counter::BucketLookups), 0);
        assert_eq!(stats.get(Counter::SuffixMatches), 0);
    }

    #[test]
    fn test_increment_and_add() {
        let mut stats = Statistics::new();
        stats.increment(Counter::BucketLookups);
        stats.increment(Counter::BucketLookups);
        stats.add(Counter::SuffixMatches, 5);
        assert_eq!(stats.get(Counter::BucketLookups), 2);
        assert_eq!(stats.get(Counter::SuffixMatches), 5);
        assert_eq!(stats.get(Counter::Backtracks), 0);
    }
}
