// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The zeroboard: a hash index of every fixed-cardinality multiset.
//!
//! A board is built once per query for one cardinality k (its *arity*).
//! Each entry is a nondecreasing k-tuple of atom indices, stored under the
//! quantized key of its *shortfall* from k·aₙ₋₁:
//!
//! ```text
//! shortfall(e) = Σⱼ (aₙ₋₁ − a[eⱼ])
//! ```
//!
//! During the query the driver turns a fixed prefix into the shortfall its
//! suffix must carry (the *tare*) and resolves it with one bucket lookup.
//! Looking up an absent key yields an empty iterator, never an error.
//!
//! # Storage
//!
//! Buckets hold a flat pool of indices with stride k rather than one heap
//! allocation per entry; an entry is a k-long slice of its bucket's pool.
//! The board owns all entry memory and is read-only after the build phase.

pub mod builder;

pub use builder::BuildError;

use crate::quantize::{BucketKey, Quantizer};
use std::collections::HashMap;
use std::io::{self, Write};
use std::slice::ChunksExact;

/// Hash board mapping quantized shortfall keys to entry buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct Zeroboard {
    arity: usize,
    quant: Quantizer,
    buckets: HashMap<BucketKey, Vec<u32>>,
    entries: usize,
}

impl Zeroboard {
    /// Create an empty board for entries of length `arity`.
    ///
    /// Normal construction goes through [`Zeroboard::build`], which also
    /// enforces the entry budget and precision guards.
    pub fn new(arity: usize, quant: Quantizer) -> Self {
        Self {
            arity,
            quant,
            buckets: HashMap::new(),
            entries: 0,
        }
    }

    /// Entry length k shared by every entry on this board.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The quantizer keys are derived with.
    pub fn quantizer(&self) -> &Quantizer {
        &self.quant
    }

    /// Insert `entry` into the bucket keyed by the quantized `sum`.
    ///
    /// No deduplication is performed; the builder enumerates each tuple
    /// exactly once.
    ///
    /// # Panics
    ///
    /// Panics if `entry` is not exactly `arity` long.
    pub fn insert(&mut self, sum: f64, entry: &[u32]) {
        assert_eq!(
            entry.len(),
            self.arity,
            "entry length {} does not match board arity {}",
            entry.len(),
            self.arity
        );
        let key = self.quant.bucket(sum);
        self.buckets.entry(key).or_default().extend_from_slice(entry);
        self.entries += 1;
    }

    /// Iterate the entries whose quantized shortfall matches `residual`.
    ///
    /// Finding the bucket is expected constant time; traversal is linear in
    /// the bucket. A missing bucket yields an empty iterator.
    pub fn suffixes(&self, residual: f64) -> ChunksExact<'_, u32> {
        let key = self.quant.bucket(residual);
        self.buckets
            .get(&key)
            .map(|pool| pool.as_slice())
            .unwrap_or(&[])
            .chunks_exact(self.arity)
    }

    /// Total number of stored entries.
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    /// Number of distinct bucket keys.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Iterate all bucket keys, in hash order.
    pub fn keys(&self) -> impl Iterator<Item = BucketKey> + '_ {
        self.buckets.keys().copied()
    }

    /// Write every bucket with its entries, smallest key first.
    ///
    /// Only reasonable for small boards; intended for debugging and tests.
    pub fn write_contents(&self, out: &mut dyn Write) -> io::Result<()> {
        let mut keys: Vec<BucketKey> = self.keys().collect();
        keys.sort();
        for key in keys {
            writeln!(out, "{}:", self.quant.key_value(key))?;
            let pool = &self.buckets[&key];
            for entry in pool.chunks_exact(self.arity) {
                write!(out, " ")?;
                for &index in entry {
                    write!(out, " {}", index)?;
                }
                writeln!(out)?;
            }
        }
        Ok(())
    }
}
