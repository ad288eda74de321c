// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Unbounded subset-sum enumeration over a finite set of positive reals.
//!
//! Given an ordered atom set A = {a₀ < a₁ < … < aₙ₋₁} and a query value q,
//! the crate counts (and optionally lists) every multiset of atoms summing
//! to q at a configured decimal precision, broken down by multiset
//! cardinality. Atoms may be reused without limit.
//!
//! # Architecture
//!
//! The implementation uses a two-tier memory model:
//!
//! ## Tier 1: Zeroboard (Immutable)
//!
//! Precomputed data that never changes during a query:
//! - Every nondecreasing k-tuple of atom indices, for one fixed cardinality
//!   k, stored in a hash board keyed by its *shortfall* from k·aₙ₋₁
//! - The validated atom set itself
//!
//! ## Tier 2: Search state (Mutable)
//!
//! State that changes while a query runs:
//! - The prefix window: a nondecreasing index tuple with per-position
//!   minimum/maximum completion bounds
//! - Per-cardinality result counters and search statistics
//!
//! # Query Algorithm
//!
//! A query proceeds in three phases:
//!
//! 1. **Build**: enumerate all C(n + k − 1, k) index tuples of cardinality k
//!    and insert each under the quantized key of its shortfall.
//! 2. **Search**: for each candidate cardinality ℓ from the top of the range
//!    down to k, enumerate prefixes of length ℓ − k under min/max sum
//!    bounds, resolving each surviving prefix by one board lookup.
//!    Cardinality 2 is handled by a direct pair scan.
//! 3. **Teardown**: the board is dropped when the query completes.
//!
//! All sum equalities go through [`quantize::Quantizer`]; raw `==` on
//! floating-point sums appears nowhere in the pipeline.
//!
//! # Example
//!
//! ```
//! use subset_sum_search::{QueryConfig, run_query};
//!
//! let input = [3.0, 5.0];
//! let config = QueryConfig::new(11.0);
//! let mut out = Vec::new();
//! let report = run_query(&input, &config, &mut out).unwrap();
//! assert_eq!(report.total(), 1); // {3, 3, 5}
//! assert_eq!(report.count_for(3), 1);
//! ```

pub mod atoms;
pub mod config;
pub mod quantize;
pub mod query;
pub mod report;
pub mod search;
pub mod zeroboard;

// Re-export commonly used types
pub use atoms::AtomSet;
pub use config::{ConfigError, QueryConfig, QueryPlan};
pub use query::{run_query, Error, QuerySession};
pub use quantize::{BucketKey, Quantizer};
pub use report::QueryReport;
pub use zeroboard::Zeroboard;
