// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Zeroboard invariants at realistic scale.

mod common;

use common::step20;
use std::collections::HashSet;
use subset_sum_search::quantize::Quantizer;
use subset_sum_search::zeroboard::builder::multiset_count;
use subset_sum_search::{AtomSet, Zeroboard};

fn build(values: &[f64], arity: usize) -> (AtomSet, Zeroboard) {
    let quant = Quantizer::new(5);
    let atoms = AtomSet::from_unsorted(values, &quant).expect("valid atoms");
    let board = Zeroboard::build(&atoms, arity, quant).expect("board built");
    (atoms, board)
}

#[test]
fn test_step20_board_holds_every_triple_once() {
    let (atoms, board) = build(&step20(), 3);
    assert_eq!(board.entry_count(), 1540); // C(22, 3)
    assert_eq!(
        board.entry_count() as u128,
        multiset_count(atoms.len(), 3).unwrap()
    );

    let mut seen = HashSet::new();
    for key in board.keys() {
        let residual = board.quantizer().key_value(key);
        for entry in board.suffixes(residual) {
            assert_eq!(entry.len(), 3);
            assert!(entry.windows(2).all(|w| w[0] <= w[1]));
            assert!(entry.iter().all(|&i| (i as usize) < atoms.len()));
            assert!(seen.insert(entry.to_vec()), "tuple {:?} stored twice", entry);
        }
    }
    assert_eq!(seen.len(), 1540);
}

#[test]
fn test_every_key_matches_its_entries() {
    let (atoms, board) = build(&step20(), 3);
    let quant = *board.quantizer();
    for key in board.keys().collect::<Vec<_>>() {
        for entry in board.suffixes(quant.key_value(key)) {
            let shortfall: f64 = entry.iter().map(|&i| atoms.max() - atoms.get(i)).sum();
            assert_eq!(quant.bucket(shortfall), key);
        }
    }
}

#[test]
fn test_lookup_by_shortfall_value() {
    let (_, board) = build(&step20(), 3);
    // Shortfall 1040 ↔ triples summing to 400; there are five of them
    assert_eq!(board.suffixes(1040.0).count(), 5);
    // No triple sums to 200: its shortfall bucket is absent
    assert_eq!(board.suffixes(1240.0).count(), 0);
}

#[test]
fn test_rebuild_produces_equal_contents() {
    let (_, first) = build(&step20(), 3);
    let (_, second) = build(&step20(), 3);

    let mut dump_first = Vec::new();
    let mut dump_second = Vec::new();
    first.write_contents(&mut dump_first).unwrap();
    second.write_contents(&mut dump_second).unwrap();
    assert!(!dump_first.is_empty());
    assert_eq!(dump_first, dump_second);
}

#[test]
fn test_board_survives_larger_arity() {
    let (atoms, board) = build(&step20(), 5);
    assert_eq!(
        board.entry_count() as u128,
        multiset_count(atoms.len(), 5).unwrap()
    );
    // The all-maximum quintuple sits in the zero-shortfall bucket
    let hits: Vec<&[u32]> = board.suffixes(0.0).collect();
    assert_eq!(hits, vec![&[19u32, 19, 19, 19, 19][..]]);
}
