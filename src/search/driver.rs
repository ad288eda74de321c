// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The bounded search driver.
//!
//! For each candidate cardinality ℓ, highest first, the driver enumerates
//! the prefixes (the first ℓ − k positions of a nondecreasing multiset)
//! and resolves each surviving prefix with one zeroboard lookup. The
//! per-cardinality machine is:
//!
//! ```text
//! INIT → MAX_ASCEND ⇄ DESCEND → MIN_SWEEP → BACKTRACK → (MAX_ASCEND | DONE)
//! ```
//!
//! - **MAX_ASCEND** advances the current position while even the largest
//!   completion stays at or below the query; every skipped position rules
//!   out a whole subtree. A quantized equality between the maximum bound
//!   and the query pins the unique completion that fills every later
//!   position with the top atom; it is tallied on the spot.
//! - **DESCEND** fixes the position and drops to the next one (folded into
//!   the ascent loop).
//! - **MIN_SWEEP** walks the deepest position while the smallest
//!   completion stays at or below the query; each step computes the tare
//!   and looks up the board for matching suffixes.
//! - **BACKTRACK** retreats while the minimum bound overshoots, then
//!   re-syncs the trailing positions and re-enters the ascent. The machine
//!   is DONE when the root bound overshoots or the prefix space is
//!   exhausted.
//!
//! Cardinality ℓ = k resolves by a single lookup with no prefix; the
//! deduplication filter is disabled there because the entire multiset is
//! the board entry.
//!
//! # Deduplication
//!
//! A full multiset is counted iff its board suffix starts at or above the
//! last prefix index. Both halves are nondecreasing and the split point is
//! fixed, so every canonical multiset corresponds to exactly one
//! (prefix, suffix) pair passing the filter; the search visits full
//! prefixes in strictly increasing lexicographic order, so none is offered
//! twice.

use crate::atoms::AtomSet;
use crate::config::QueryPlan;
use crate::quantize::Quantizer;
use crate::report::{emit_values, QueryReport};
use crate::search::pairs::pair_scan;
use crate::search::statistics::{Counter, Statistics};
use crate::search::window::PrefixWindow;
use crate::zeroboard::Zeroboard;
use std::io::{self, Write};
use std::iter;

/// The per-cardinality machine states. DESCEND lives inside the ascent
/// loop; a separate state would re-test the same guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    MaxAscend,
    MinSweep,
    Backtrack,
    Done,
}

/// Drives one query against a built zeroboard.
///
/// The driver borrows everything it touches; the board stays immutable
/// throughout and can serve further queries afterwards at the same
/// precision.
pub struct QueryDriver<'a> {
    atoms: &'a AtomSet,
    board: &'a Zeroboard,
    plan: &'a QueryPlan,
    quant: Quantizer,
    emit: bool,
}

impl<'a> QueryDriver<'a> {
    /// Create a driver. `emit` switches per-multiset output lines on.
    pub fn new(
        atoms: &'a AtomSet,
        board: &'a Zeroboard,
        plan: &'a QueryPlan,
        emit: bool,
    ) -> Self {
        Self {
            atoms,
            board,
            plan,
            quant: *board.quantizer(),
            emit,
        }
    }

    /// Run every planned cardinality and the pair scan, highest first.
    pub fn run<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<QueryReport> {
        let mut report = QueryReport::new();
        let mut stats = Statistics::new();

        for len in self.plan.board_lengths() {
            let count = if len == self.plan.zb_len {
                self.terminal_lookup(len, &mut stats, out)?
            } else {
                self.sweep_length(len, &mut stats, out)?
            };
            report.push(len, count);
        }

        if self.plan.pair_scan {
            let count = pair_scan(self.atoms, &self.quant, self.plan.query, self.emit, out)?;
            report.push(2, count);
        }

        report.statistics = stats;
        Ok(report)
    }

    /// Branch-and-bound over prefixes of cardinality `len` (> board
    /// cardinality).
    fn sweep_length<W: Write + ?Sized>(
        &self,
        len: usize,
        stats: &mut Statistics,
        out: &mut W,
    ) -> io::Result<u64> {
        let atoms = self.atoms;
        let q = self.plan.query;
        let max = atoms.max();
        let top = atoms.last_index();
        let comb_max = len as f64 * max;
        let comb_min = len as f64 * atoms.min();

        if comb_max < q {
            return Ok(0); // even all-maximum falls short
        }

        // Fast checks: at the extremes the multiset is forced.
        if self.quant.same_sum(comb_max, q) {
            stats.increment(Counter::FastPathMatches);
            if self.emit {
                emit_values(out, iter::repeat(max).take(len))?;
            }
            return Ok(1);
        }
        if self.quant.same_sum(comb_min, q) {
            stats.increment(Counter::FastPathMatches);
            if self.emit {
                emit_values(out, iter::repeat(atoms.min()).take(len))?;
            }
            return Ok(1);
        }

        let mut count = 0;
        let l = len - self.plan.zb_len;
        let mut win = PrefixWindow::new(atoms, len, self.plan.zb_len);
        if win.mins[0] > q {
            return Ok(0);
        }

        let mut phase = Phase::MaxAscend;
        loop {
            match phase {
                Phase::MaxAscend => {
                    while win.maxs[win.dim] <= q && win.p[win.dim] < top {
                        if self.quant.same_sum(win.maxs[win.dim], q) {
                            count += self.tally_max_fill(len, &win, stats, out)?;
                        }
                        win.advance_max(atoms);
                    }
                    if win.dim + 1 < l && win.p[win.dim] < top {
                        win.descend(atoms);
                    } else {
                        win.seed_min(atoms);
                        phase = Phase::MinSweep;
                    }
                }
                Phase::MinSweep => {
                    while win.mins[win.dim] <= q && win.p[win.dim] < top {
                        count += self.lookup_prefix(&win, stats, out)?;
                        win.advance_min(atoms);
                    }
                    phase = Phase::Backtrack;
                }
                Phase::Backtrack => {
                    while win.mins[win.dim] > q && win.dim > 0 {
                        win.retreat(atoms);
                        stats.increment(Counter::Backtracks);
                    }
                    if win.mins[0] > q {
                        phase = Phase::Done;
                    } else {
                        win.resync(atoms);
                        phase = if win.dim < l { Phase::MaxAscend } else { Phase::Done };
                    }
                }
                Phase::Done => break,
            }
        }
        Ok(count)
    }

    /// The ascent equality hit: the only completion of the fixed prefix
    /// fills every later position with the top atom.
    fn tally_max_fill<W: Write + ?Sized>(
        &self,
        len: usize,
        win: &PrefixWindow,
        stats: &mut Statistics,
        out: &mut W,
    ) -> io::Result<u64> {
        stats.increment(Counter::FastPathMatches);
        if self.emit {
            let atoms = self.atoms;
            let fixed = win.dim + 1;
            emit_values(
                out,
                win.p[..fixed]
                    .iter()
                    .map(|&i| atoms.get(i))
                    .chain(iter::repeat(atoms.max()).take(len - fixed)),
            )?;
        }
        Ok(1)
    }

    /// Resolve the current full prefix: one bucket lookup, filtered so the
    /// suffix starts at or above the last prefix index.
    fn lookup_prefix<W: Write + ?Sized>(
        &self,
        win: &PrefixWindow,
        stats: &mut Statistics,
        out: &mut W,
    ) -> io::Result<u64> {
        let atoms = self.atoms;
        let tare = win.tare(atoms, self.plan.query);
        let floor = win.p[win.prefix_len() - 1];
        stats.increment(Counter::BucketLookups);

        let mut hits = 0;
        for suffix in self.board.suffixes(tare) {
            if suffix[0] < floor {
                continue;
            }
            hits += 1;
            if self.emit {
                emit_values(
                    out,
                    win.p.iter().chain(suffix.iter()).map(|&i| atoms.get(i)),
                )?;
            }
        }
        stats.add(Counter::SuffixMatches, hits);
        Ok(hits)
    }

    /// Cardinality ℓ = k: the whole multiset is a board entry, so a single
    /// unfiltered lookup of ℓ·aₙ₋₁ − q settles it.
    fn terminal_lookup<W: Write + ?Sized>(
        &self,
        len: usize,
        stats: &mut Statistics,
        out: &mut W,
    ) -> io::Result<u64> {
        let atoms = self.atoms;
        let tare = len as f64 * atoms.max() - self.plan.query;
        stats.increment(Counter::BucketLookups);

        let mut hits = 0;
        for suffix in self.board.suffixes(tare) {
            hits += 1;
            if self.emit {
                emit_values(out, suffix.iter().map(|&i| atoms.get(i)))?;
            }
        }
        stats.add(Counter::SuffixMatches, hits);
        Ok(hits)
    }
}
