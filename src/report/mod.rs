// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Result aggregation and emission.
//!
//! The driver registers one count per searched cardinality, in the order
//! the cardinalities were visited (highest first, the pair scan last). No
//! deduplication happens here; the driver's canonical-split invariant is
//! what guarantees each multiset arrives exactly once.
//!
//! Concrete multisets are written to the injected sink as they are found,
//! one line per multiset, atom values space-separated in nondecreasing
//! order.

use crate::search::statistics::Statistics;
use std::io::{self, Write};

/// Write one multiset line: values space-separated, canonical order.
pub fn emit_values<W, I>(out: &mut W, values: I) -> io::Result<()>
where
    W: Write + ?Sized,
    I: Iterator<Item = f64>,
{
    for (i, value) in values.enumerate() {
        if i > 0 {
            write!(out, " ")?;
        }
        write!(out, "{}", value)?;
    }
    writeln!(out)
}

/// The count registered for one searched cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthCount {
    pub length: usize,
    pub count: u64,
}

/// Per-cardinality counts plus search statistics for one query run.
#[derive(Debug, Default)]
pub struct QueryReport {
    lengths: Vec<LengthCount>,
    pub statistics: Statistics,
}

impl QueryReport {
    pub fn new() -> Self {
        QueryReport::default()
    }

    /// Register the count for one searched cardinality.
    pub fn push(&mut self, length: usize, count: u64) {
        self.lengths.push(LengthCount { length, count });
    }

    /// Counts in visit order.
    pub fn lengths(&self) -> &[LengthCount] {
        &self.lengths
    }

    /// The count registered for `length`; zero when it was not searched.
    pub fn count_for(&self, length: usize) -> u64 {
        self.lengths
            .iter()
            .find(|entry| entry.length == length)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    /// Total matches across all searched cardinalities.
    pub fn total(&self) -> u64 {
        self.lengths.iter().map(|entry| entry.count).sum()
    }

    /// Write the per-cardinality rows and the total footer.
    pub fn write_details<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for entry in &self.lengths {
            writeln!(out, "{}\t{}", entry.length, entry.count)?;
        }
        writeln!(out, "Total results: {}", self.total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_values_format() {
        let mut out = Vec::new();
        emit_values(&mut out, [100.0, 120.0, 180.0].into_iter()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "100 120 180\n");
    }

    #[test]
    fn test_emit_values_fractional() {
        let mut out = Vec::new();
        emit_values(&mut out, [1.5, 2.25].into_iter()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1.5 2.25\n");
    }

    #[test]
    fn test_totals_and_lookup() {
        let mut report = QueryReport::new();
        report.push(4, 1);
        report.push(3, 5);
        report.push(2, 6);
        assert_eq!(report.total(), 12);
        assert_eq!(report.count_for(3), 5);
        assert_eq!(report.count_for(7), 0);
        assert_eq!(report.lengths().len(), 3);
    }

    #[test]
    fn test_write_details() {
        let mut report = QueryReport::new();
        report.push(3, 5);
        report.push(2, 6);
        let mut out = Vec::new();
        report.write_details(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "3\t5\n2\t6\nTotal results: 11\n"
        );
    }
}
