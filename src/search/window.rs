// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The prefix window: the driver's per-cardinality search state.
//!
//! For a candidate cardinality ℓ and a board cardinality k, the window
//! tracks the prefix tuple p[0..L), L = ℓ − k, together with per-position
//! completion bounds:
//!
//! - `maxs[d]` is the largest sum any completion of p[0..=d] can reach
//!   (fill every later position with aₙ₋₁);
//! - `mins[d]` is the smallest (fill every later position with a\[p\[d\]]).
//!
//! All updates are incremental, one atom difference at a time, so a sweep
//! over the whole prefix space costs O(1) arithmetic per step. The window
//! knows nothing about the query value or the board; the driver owns the
//! phase logic and calls one mutation per transition.
//!
//! A retreat that runs an index past the top atom poisons that position's
//! minimum bound with `+∞`, which drives further backtracking and gives
//! the driver its termination condition without ever indexing out of
//! range.

use crate::atoms::AtomSet;

/// Prefix tuple plus completion bounds for one candidate cardinality.
#[derive(Debug)]
pub struct PrefixWindow {
    /// Total multiset cardinality ℓ.
    len: usize,

    /// Board (suffix) cardinality k.
    zb_len: usize,

    /// The prefix under construction, nondecreasing in index.
    pub p: Vec<u32>,

    /// Smallest completion sum per position.
    pub mins: Vec<f64>,

    /// Largest completion sum per position.
    pub maxs: Vec<f64>,

    /// The position currently being advanced.
    pub dim: usize,
}

impl PrefixWindow {
    /// Open a window over prefixes of length `len - zb_len`.
    ///
    /// # Panics
    ///
    /// Panics if `len <= zb_len`; cardinalities at or below the board
    /// cardinality have no prefix to search.
    pub fn new(atoms: &AtomSet, len: usize, zb_len: usize) -> Self {
        assert!(len > zb_len, "no prefix below cardinality {}", zb_len + 1);
        let l = len - zb_len;
        let a0 = atoms.min();
        let max = atoms.max();
        let maxs = (0..l)
            .map(|i| a0 * (i + 1) as f64 + max * (len - (i + 1)) as f64)
            .collect();
        Self {
            len,
            zb_len,
            p: vec![0; l],
            mins: vec![a0 * len as f64; l],
            maxs,
            dim: 0,
        }
    }

    /// Prefix length L.
    pub fn prefix_len(&self) -> usize {
        self.p.len()
    }

    /// Bump the current position, carrying `maxs` along.
    pub fn advance_max(&mut self, atoms: &AtomSet) {
        let d = self.dim;
        self.p[d] += 1;
        self.maxs[d] += atoms.get(self.p[d]) - atoms.get(self.p[d] - 1);
    }

    /// Fix the current position and move one position deeper, seeding the
    /// new position's maximum bound from the old one.
    pub fn descend(&mut self, atoms: &AtomSet) {
        let d = self.dim;
        self.p[d + 1] = self.p[d];
        self.maxs[d + 1] = self.maxs[d] - (atoms.max() - atoms.get(self.p[d]));
        self.dim = d + 1;
    }

    /// Seed the minimum bound at the current position from its maximum:
    /// swap the k board positions from aₙ₋₁ down to a\[p\[dim\]].
    pub fn seed_min(&mut self, atoms: &AtomSet) {
        let d = self.dim;
        self.mins[d] =
            self.maxs[d] - (atoms.max() - atoms.get(self.p[d])) * self.zb_len as f64;
    }

    /// Bump the current position, carrying `mins` along.
    pub fn advance_min(&mut self, atoms: &AtomSet) {
        let d = self.dim;
        self.p[d] += 1;
        self.mins[d] +=
            (atoms.get(self.p[d]) - atoms.get(self.p[d] - 1)) * (self.zb_len + 1) as f64;
    }

    /// Step back one position and advance it past the exhausted subtree.
    ///
    /// The retreated position's minimum bound is recomputed from scratch;
    /// if the position ran past the top atom it is poisoned with `+∞`.
    pub fn retreat(&mut self, atoms: &AtomSet) {
        debug_assert!(self.dim > 0, "cannot retreat from the root position");
        let d = self.dim - 1;
        self.dim = d;
        self.p[d] += 1;
        if self.p[d] > atoms.last_index() {
            self.mins[d] = f64::INFINITY;
            return;
        }
        let fixed: f64 = self.p[..d].iter().map(|&i| atoms.get(i)).sum();
        self.mins[d] = fixed + atoms.get(self.p[d]) * (self.len - d) as f64;
    }

    /// Restore the nondecreasing invariant after a retreat and re-enter
    /// the next position with a fresh maximum bound.
    pub fn resync(&mut self, atoms: &AtomSet) {
        let l = self.prefix_len();
        for r in self.dim + 1..l {
            self.p[r] = self.p[r - 1];
        }
        self.dim += 1;
        let d = self.dim;
        if d < l {
            self.maxs[d] = self.mins[d - 1]
                + (atoms.max() - atoms.get(self.p[d])) * (self.len - (d + 1)) as f64;
        }
    }

    /// The shortfall the suffix must carry for the current full prefix:
    /// (ℓ·aₙ₋₁ − q) − Σᵤ (aₙ₋₁ − a\[p\[u\]]).
    pub fn tare(&self, atoms: &AtomSet, query: f64) -> f64 {
        let max = atoms.max();
        let prefix_shortfall: f64 = self.p.iter().map(|&i| max - atoms.get(i)).sum();
        (self.len as f64 * max - query) - prefix_shortfall
    }
}
