// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Configuration intake: the recognized options, their validation, and
//! their resolution into an executable query plan.
//!
//! Validation never touches the process; every rejection is a
//! [`ConfigError`] value surfaced at the crate boundary. The binary maps
//! errors to exit codes.
//!
//! # Resolution rules
//!
//! - The searched ceiling ℓ_hi is ⌊q / a₀⌋, clipped by `k_max` when set.
//! - An unset `k_zb` is chosen as ⌊q / aₙ₋₁⌋, clipped below to
//!   max(`k_min`, 3) and above to `k_max` when set. Every cardinality the
//!   board machinery can answer lies in [k_zb, ℓ_hi]; smaller ones (other
//!   than 2) would need a smaller board and, with an auto-chosen k_zb,
//!   cannot hold solutions anyway because ℓ·aₙ₋₁ < q there.
//! - Cardinality 2 runs as a direct pair scan iff it is inside the
//!   reported range and the board cardinality is not itself 2 (a pair
//!   board answers cardinality 2 through the terminal lookup instead).
//! - A nonzero `k_fixed` collapses the range to that one cardinality.

use crate::atoms::{AtomSet, InputError};
use std::fmt;

/// Highest accepted decimal precision. Beyond this even modest sums leave
/// the exact integer range of `f64` and key comparisons degrade.
const MAX_DP: u32 = 15;

/// The recognized query options.
///
/// All fields are public; [`QueryConfig::new`] fills in the defaults
/// (exact matching, five decimal places, unrestricted cardinalities).
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Target sum q. Must be at least the smallest atom.
    pub query: f64,

    /// Nonnegative tolerance. Only 0 is supported; nonzero values produce
    /// a warning and are treated as 0.
    pub epsilon: f64,

    /// Decimal places for every sum comparison; 0 means "use 2".
    pub dp_precision: u32,

    /// Minimum multiset cardinality reported (at least 2).
    pub k_min: usize,

    /// Maximum multiset cardinality reported; 0 means unbounded.
    pub k_max: usize,

    /// If nonzero, search exactly this cardinality.
    pub k_fixed: usize,

    /// Cardinality of the multisets indexed in the zeroboard; 0 means
    /// choose automatically.
    pub k_zb: usize,

    /// Write per-cardinality detail lines and a total footer to the sink.
    pub print_details: bool,

    /// Write every counted multiset, one line per multiset, to the sink.
    pub print_comb: bool,
}

impl QueryConfig {
    /// A configuration with defaults for everything but the query value.
    pub fn new(query: f64) -> Self {
        Self {
            query,
            epsilon: 0.0,
            dp_precision: 5,
            k_min: 2,
            k_max: 0,
            k_fixed: 0,
            k_zb: 0,
            print_details: false,
            print_comb: false,
        }
    }
}

/// Rejected configurations. All are fatal before any computation starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The input set failed preprocessing.
    Input(InputError),

    /// The query value is NaN or infinite.
    QueryNotFinite { query: f64 },

    /// The query value is below the smallest atom.
    QueryBelowMinimum { query: f64, minimum: f64 },

    /// Epsilon is negative.
    NegativeEpsilon { epsilon: f64 },

    /// Decimal precision beyond the supported ceiling.
    PrecisionTooHigh { dp: u32, max: u32 },

    /// `k_min` below the smallest countable cardinality.
    KMinTooSmall { k_min: usize },

    /// `k_max` is set but below `k_min`.
    RangeInverted { k_min: usize, k_max: usize },

    /// A nonzero `k_fixed` outside [k_min, k_max].
    KFixedOutOfRange { k_fixed: usize, k_min: usize, k_max: usize },

    /// A nonzero `k_zb` outside [k_min, k_max].
    KZbOutOfRange { k_zb: usize, k_min: usize, k_max: usize },

    /// A board cardinality above the fixed search cardinality would leave
    /// the fixed cardinality unsearchable.
    KZbExceedsKFixed { k_zb: usize, k_fixed: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Input(err) => write!(f, "{}", err),
            ConfigError::QueryNotFinite { query } => {
                write!(f, "query value {} is not finite", query)
            }
            ConfigError::QueryBelowMinimum { query, minimum } => {
                write!(
                    f,
                    "query value {} is below the input set minimum {}",
                    query, minimum
                )
            }
            ConfigError::NegativeEpsilon { epsilon } => {
                write!(f, "epsilon {} is negative", epsilon)
            }
            ConfigError::PrecisionTooHigh { dp, max } => {
                write!(f, "decimal precision {} exceeds the maximum of {}", dp, max)
            }
            ConfigError::KMinTooSmall { k_min } => {
                write!(f, "k_min {} is below the minimum cardinality of 2", k_min)
            }
            ConfigError::RangeInverted { k_min, k_max } => {
                write!(f, "k_max {} is below k_min {}", k_max, k_min)
            }
            ConfigError::KFixedOutOfRange { k_fixed, k_min, k_max } => {
                write!(
                    f,
                    "k_fixed {} is outside the cardinality range [{}, {}]",
                    k_fixed, k_min, k_max
                )
            }
            ConfigError::KZbOutOfRange { k_zb, k_min, k_max } => {
                write!(
                    f,
                    "k_zb {} is outside the cardinality range [{}, {}]",
                    k_zb, k_min, k_max
                )
            }
            ConfigError::KZbExceedsKFixed { k_zb, k_fixed } => {
                write!(
                    f,
                    "k_zb {} exceeds the fixed search cardinality {}",
                    k_zb, k_fixed
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<InputError> for ConfigError {
    fn from(err: InputError) -> Self {
        ConfigError::Input(err)
    }
}

/// A validated configuration resolved against a concrete atom set.
///
/// The plan fixes which cardinalities the board machinery sweeps
/// (descending, `len_hi` down to `len_lo`; empty when inverted), the board
/// cardinality itself, and whether the separate pair scan runs.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub query: f64,
    pub zb_len: usize,
    pub len_lo: usize,
    pub len_hi: usize,
    pub pair_scan: bool,
}

impl QueryPlan {
    /// Validate `config` against `atoms` and resolve the searched range.
    pub fn resolve(config: &QueryConfig, atoms: &AtomSet) -> Result<Self, ConfigError> {
        let q = config.query;
        if !q.is_finite() {
            return Err(ConfigError::QueryNotFinite { query: q });
        }
        if q < atoms.min() {
            return Err(ConfigError::QueryBelowMinimum {
                query: q,
                minimum: atoms.min(),
            });
        }
        if config.epsilon < 0.0 {
            return Err(ConfigError::NegativeEpsilon {
                epsilon: config.epsilon,
            });
        }
        if config.dp_precision > MAX_DP {
            return Err(ConfigError::PrecisionTooHigh {
                dp: config.dp_precision,
                max: MAX_DP,
            });
        }
        if config.k_min < 2 {
            return Err(ConfigError::KMinTooSmall { k_min: config.k_min });
        }
        if config.k_max != 0 && config.k_max < config.k_min {
            return Err(ConfigError::RangeInverted {
                k_min: config.k_min,
                k_max: config.k_max,
            });
        }
        let in_range = |k: usize| {
            k >= config.k_min && (config.k_max == 0 || k <= config.k_max)
        };
        if config.k_fixed != 0 && !in_range(config.k_fixed) {
            return Err(ConfigError::KFixedOutOfRange {
                k_fixed: config.k_fixed,
                k_min: config.k_min,
                k_max: config.k_max,
            });
        }
        if config.k_zb != 0 && !in_range(config.k_zb) {
            return Err(ConfigError::KZbOutOfRange {
                k_zb: config.k_zb,
                k_min: config.k_min,
                k_max: config.k_max,
            });
        }
        if config.k_zb != 0 && config.k_fixed != 0 && config.k_zb > config.k_fixed {
            return Err(ConfigError::KZbExceedsKFixed {
                k_zb: config.k_zb,
                k_fixed: config.k_fixed,
            });
        }

        let len_cap = (q / atoms.min()).floor() as usize;
        let len_hi_all = if config.k_max == 0 {
            len_cap
        } else {
            config.k_max.min(len_cap)
        };

        let zb_len = if config.k_zb != 0 {
            config.k_zb
        } else {
            let auto = (q / atoms.max()).floor() as usize;
            let mut zb = auto.max(config.k_min.max(3));
            if config.k_max != 0 {
                zb = zb.min(config.k_max);
            }
            zb
        };

        let plan = if config.k_fixed != 0 {
            if config.k_fixed == 2 && zb_len != 2 {
                Self {
                    query: q,
                    zb_len,
                    len_lo: 1,
                    len_hi: 0,
                    pair_scan: true,
                }
            } else if config.k_fixed >= zb_len {
                Self {
                    query: q,
                    zb_len,
                    len_lo: config.k_fixed,
                    len_hi: config.k_fixed.min(len_hi_all),
                    pair_scan: false,
                }
            } else {
                // Cardinalities below the board (other than 2) have no
                // lookup path; an auto-chosen board only lands here when
                // k_fixed · aₙ₋₁ < q, where no solutions exist.
                Self {
                    query: q,
                    zb_len,
                    len_lo: 1,
                    len_hi: 0,
                    pair_scan: false,
                }
            }
        } else {
            Self {
                query: q,
                zb_len,
                len_lo: zb_len,
                len_hi: len_hi_all,
                pair_scan: config.k_min == 2 && len_hi_all >= 2 && zb_len != 2,
            }
        };
        Ok(plan)
    }

    /// The cardinalities the board machinery sweeps, highest first.
    pub fn board_lengths(&self) -> impl Iterator<Item = usize> {
        (self.len_lo..=self.len_hi).rev()
    }
}
