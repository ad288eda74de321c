// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Writing the zeroboard: multiset enumeration plus the shortfall transform.
//!
//! The builder walks every nondecreasing k-tuple of atom indices over
//! {0, …, n−1} exactly once, in lexicographic order, computes the tuple's
//! shortfall from k·aₙ₋₁ and inserts it. The tuple count is the multiset
//! coefficient C(n + k − 1, k), which is checked against an entry budget
//! before any allocation happens; oversized boards are refused rather than
//! exhausting memory.

use super::Zeroboard;
use crate::atoms::AtomSet;
use crate::quantize::{PrecisionError, Quantizer};
use std::fmt;

/// Hard ceiling on stored entries (2²⁵).
///
/// Each entry costs k indices in its bucket pool; the ceiling keeps a
/// runaway user-specified cardinality from exhausting memory during build.
pub const MAX_ENTRIES: u128 = 1 << 25;

/// Failures while writing a board. None of these are recoverable; they
/// surface before any search work starts.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// Board cardinality below 2 cannot index multisets.
    ArityTooSmall { arity: usize },

    /// C(n + k − 1, k) exceeds the entry budget.
    EntryBudgetExceeded { required: u128, limit: u128 },

    /// A shortfall key cannot be represented exactly at this precision.
    Precision(PrecisionError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::ArityTooSmall { arity } => {
                write!(f, "zeroboard cardinality {} is below the minimum of 2", arity)
            }
            BuildError::EntryBudgetExceeded { required, limit } => {
                write!(
                    f,
                    "zeroboard would hold {} entries, above the budget of {}",
                    required, limit
                )
            }
            BuildError::Precision(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<PrecisionError> for BuildError {
    fn from(err: PrecisionError) -> Self {
        BuildError::Precision(err)
    }
}

/// The multiset coefficient C(n + k − 1, k).
///
/// Returns `None` on `u128` overflow, which the caller treats the same as
/// blowing the entry budget. Division is exact at every step because each
/// prefix product is itself a binomial coefficient.
pub fn multiset_count(n: usize, k: usize) -> Option<u128> {
    if n == 0 {
        return Some(if k == 0 { 1 } else { 0 });
    }
    let n = n as u128;
    let mut result: u128 = 1;
    for i in 1..=(k as u128) {
        result = result.checked_mul(n + i - 1)? / i;
    }
    Some(result)
}

impl Zeroboard {
    /// Enumerate every nondecreasing `arity`-tuple over the atom indices
    /// and insert each under its quantized shortfall.
    pub fn build(atoms: &AtomSet, arity: usize, quant: Quantizer) -> Result<Self, BuildError> {
        if arity < 2 {
            return Err(BuildError::ArityTooSmall { arity });
        }

        let required = multiset_count(atoms.len(), arity).unwrap_or(u128::MAX);
        if required > MAX_ENTRIES {
            return Err(BuildError::EntryBudgetExceeded {
                required,
                limit: MAX_ENTRIES,
            });
        }

        // The largest shortfall on the board; every key is below it.
        quant.ensure_exact(arity as f64 * (atoms.max() - atoms.min()))?;

        let mut board = Zeroboard::new(arity, quant);
        let max = atoms.max();
        let top = atoms.last_index();

        let mut entry = vec![0u32; arity];
        loop {
            let shortfall: f64 = entry.iter().map(|&i| max - atoms.get(i)).sum();
            board.insert(shortfall, &entry);

            // Multiset successor: bump the rightmost index that has room,
            // then level everything to its right.
            let mut pos = arity;
            loop {
                if pos == 0 {
                    return Ok(board);
                }
                pos -= 1;
                if entry[pos] < top {
                    break;
                }
            }
            let next = entry[pos] + 1;
            for slot in entry[pos..].iter_mut() {
                *slot = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms(values: &[f64]) -> AtomSet {
        AtomSet::from_unsorted(values, &Quantizer::new(5)).unwrap()
    }

    #[test]
    fn test_multiset_count() {
        assert_eq!(multiset_count(4, 2), Some(10));
        assert_eq!(multiset_count(20, 3), Some(1540));
        assert_eq!(multiset_count(2, 3), Some(4));
        assert_eq!(multiset_count(1, 5), Some(1));
        assert_eq!(multiset_count(60, 7), Some(778_789_440));
    }

    #[test]
    fn test_entry_count_matches_multiset_coefficient() {
        let set = atoms(&[3.0, 5.0, 7.0, 11.0]);
        for arity in 2..=4 {
            let zb = Zeroboard::build(&set, arity, Quantizer::new(5)).unwrap();
            assert_eq!(
                zb.entry_count() as u128,
                multiset_count(set.len(), arity).unwrap()
            );
        }
    }

    #[test]
    fn test_entries_are_nondecreasing_and_distinct() {
        let set = atoms(&[2.0, 3.0, 5.0]);
        let zb = Zeroboard::build(&set, 3, Quantizer::new(5)).unwrap();

        let mut seen = std::collections::HashSet::new();
        for key in zb.keys() {
            let value = zb.quantizer().key_value(key);
            for entry in zb.suffixes(value) {
                assert!(entry.windows(2).all(|w| w[0] <= w[1]));
                assert!(seen.insert(entry.to_vec()), "duplicate entry {:?}", entry);
            }
        }
        assert_eq!(seen.len(), 10); // C(3 + 3 - 1, 3)
    }

    #[test]
    fn test_shortfall_keys_are_consistent() {
        let set = atoms(&[100.0, 120.0, 140.0]);
        let zb = Zeroboard::build(&set, 3, Quantizer::new(5)).unwrap();
        let quant = *zb.quantizer();

        for key in zb.keys().collect::<Vec<_>>() {
            for entry in zb.suffixes(quant.key_value(key)) {
                let shortfall: f64 = entry.iter().map(|&i| set.max() - set.get(i)).sum();
                assert_eq!(quant.bucket(shortfall), key);
            }
        }
    }

    #[test]
    fn test_pair_board_is_the_pair_triangle() {
        let set = atoms(&[1.0, 2.0, 4.0, 8.0]);
        let zb = Zeroboard::build(&set, 2, Quantizer::new(5)).unwrap();
        assert_eq!(zb.entry_count(), 10); // C(5, 2)

        // The all-maximum pair carries shortfall zero
        let hits: Vec<&[u32]> = zb.suffixes(0.0).collect();
        assert_eq!(hits, vec![&[3u32, 3][..]]);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let set = atoms(&[3.0, 5.0, 7.0]);
        let first = Zeroboard::build(&set, 3, Quantizer::new(5)).unwrap();
        let second = Zeroboard::build(&set, 3, Quantizer::new(5)).unwrap();

        let mut out_first = Vec::new();
        let mut out_second = Vec::new();
        first.write_contents(&mut out_first).unwrap();
        second.write_contents(&mut out_second).unwrap();
        assert_eq!(out_first, out_second);
    }

    #[test]
    fn test_arity_below_two_is_refused() {
        let set = atoms(&[1.0, 2.0]);
        assert_eq!(
            Zeroboard::build(&set, 1, Quantizer::new(5)),
            Err(BuildError::ArityTooSmall { arity: 1 })
        );
    }

    #[test]
    fn test_entry_budget_is_enforced() {
        let values: Vec<f64> = (1..=60).map(|i| i as f64).collect();
        let set = atoms(&values);
        match Zeroboard::build(&set, 7, Quantizer::new(5)) {
            Err(BuildError::EntryBudgetExceeded { required, .. }) => {
                assert_eq!(required, 778_789_440);
            }
            other => panic!("expected entry budget error, got {:?}", other),
        }
    }

    #[test]
    fn test_precision_guard() {
        let set = atoms(&[1.0, 1e9]);
        assert!(matches!(
            Zeroboard::build(&set, 3, Quantizer::new(12)),
            Err(BuildError::Precision(_))
        ));
    }
}
