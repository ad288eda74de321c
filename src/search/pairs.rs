// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The cardinality-2 scan.
//!
//! Pairs are cheap enough to resolve by a direct triangular scan over
//! (i, j), i ≤ j, so the default configuration keeps the zeroboard at
//! cardinality 3 or more and answers pairs here. Equality goes through the
//! quantizer like everywhere else.

use crate::atoms::AtomSet;
use crate::quantize::Quantizer;
use crate::report::emit_values;
use std::io::{self, Write};

/// Count (and optionally emit) the pairs summing to `query`.
pub fn pair_scan<W: Write + ?Sized>(
    atoms: &AtomSet,
    quant: &Quantizer,
    query: f64,
    emit: bool,
    out: &mut W,
) -> io::Result<u64> {
    let n = atoms.len() as u32;
    let mut count = 0;
    for i in 0..n {
        for j in i..n {
            if quant.same_sum(atoms.get(i) + atoms.get(j), query) {
                count += 1;
                if emit {
                    emit_values(out, [atoms.get(i), atoms.get(j)].into_iter())?;
                }
            }
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms(values: &[f64]) -> AtomSet {
        AtomSet::from_unsorted(values, &Quantizer::new(5)).unwrap()
    }

    #[test]
    fn test_counts_canonical_pairs_once() {
        let set = atoms(&[100.0, 120.0, 140.0, 160.0, 180.0, 200.0]);
        let mut sink = io::sink();
        // 100+200, 120+180, 140+160
        let count = pair_scan(&set, &Quantizer::new(5), 300.0, false, &mut sink).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_counts_doubled_atom() {
        let set = atoms(&[3.0, 5.0]);
        let mut sink = io::sink();
        let count = pair_scan(&set, &Quantizer::new(5), 6.0, false, &mut sink).unwrap();
        assert_eq!(count, 1); // {3, 3}
    }

    #[test]
    fn test_emits_pairs_in_canonical_order() {
        let set = atoms(&[3.0, 5.0, 8.0]);
        let mut out = Vec::new();
        let count = pair_scan(&set, &Quantizer::new(5), 11.0, true, &mut out).unwrap();
        assert_eq!(count, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "3 8\n");
    }

    #[test]
    fn test_no_matches() {
        let set = atoms(&[3.0, 5.0]);
        let mut sink = io::sink();
        let count = pair_scan(&set, &Quantizer::new(5), 7.0, false, &mut sink).unwrap();
        assert_eq!(count, 0);
    }
}
