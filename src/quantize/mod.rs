// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Decimal-precision quantization of real sums.
//!
//! Every comparison between sums in this crate is decided at a configured
//! number of decimal places d. Two distinct roundings are used, on purpose:
//!
//! - **Bucket keys** (zeroboard hashing) round *up*: κ(x) = ⌈x · 10ᵈ⌉.
//! - **Sum equality** (driver comparisons) *truncates*: x ≈ y iff
//!   ⌊x · 10ᵈ⌋ = ⌊y · 10ᵈ⌋.
//!
//! The asymmetry biases borderline values into the bucket that the lookup
//! side also consults. Both sides of any one board must use the same
//! [`Quantizer`]; mixing precisions across a board breaks lookup.
//!
//! Keys are carried as integers so that bucket identity is decidable by
//! integer comparison, never by floating-point `==`.
//!
//! # Examples
//!
//! ```
//! use subset_sum_search::quantize::Quantizer;
//!
//! let quant = Quantizer::new(5);
//! assert_eq!(quant.bucket(1.5), quant.bucket(1.5));
//! assert!(quant.same_sum(0.5 + 0.25, 0.75));
//! assert!(!quant.same_sum(0.30002, 0.3));
//! ```

use std::fmt;

/// Largest magnitude exactly representable as an integer in an `f64` (2⁵³).
///
/// Scaled sums beyond this lose unit precision and would make the integer
/// key comparisons meaningless, so quantization refuses them up front.
const MAX_EXACT_SCALED: f64 = 9_007_199_254_740_992.0;

/// Decimal precision assumed when the configured precision is zero.
const FALLBACK_DP: u32 = 2;

/// A zeroboard bucket identifier: a sum rounded up at fixed decimal
/// precision, carried as the scaled integer ⌈x · 10ᵈ⌉.
///
/// This is a newtype wrapper so keys cannot be mixed with other integers
/// and cannot be compared against keys of a different precision by
/// accident (keys only meet inside one board, which owns one quantizer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BucketKey(i64);

impl BucketKey {
    /// The raw scaled integer.
    pub fn raw(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scaled sum exceeded the exact integer range of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionError {
    pub value: f64,
    pub dp: u32,
}

impl fmt::Display for PrecisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sum {} cannot be quantized exactly at {} decimal places (scaled magnitude exceeds 2^53)",
            self.value, self.dp
        )
    }
}

impl std::error::Error for PrecisionError {}

/// Quantizes sums at a fixed decimal precision.
///
/// Construct once per query from the configured `dp_precision` and share it
/// between the board builder and the search driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    dp: u32,
    scale: f64,
}

impl Quantizer {
    /// Create a quantizer for `dp` decimal places.
    ///
    /// A `dp` of zero falls back to two decimal places, matching the
    /// board's historical default for unspecified precision.
    pub fn new(dp: u32) -> Self {
        let dp = if dp == 0 { FALLBACK_DP } else { dp };
        Self {
            dp,
            scale: 10f64.powi(dp as i32),
        }
    }

    /// The effective number of decimal places.
    pub fn dp(&self) -> u32 {
        self.dp
    }

    /// The bucket key for a sum: ⌈x · 10ᵈ⌉.
    ///
    /// Monotone nondecreasing in `x`. Callers must have verified the value
    /// range with [`Quantizer::ensure_exact`] (the builder and the query
    /// plan both do); out-of-range values would saturate the cast.
    pub fn bucket(&self, x: f64) -> BucketKey {
        BucketKey((x * self.scale).ceil() as i64)
    }

    /// The real value a bucket key stands for: κ / 10ᵈ.
    pub fn key_value(&self, key: BucketKey) -> f64 {
        key.raw() as f64 / self.scale
    }

    /// Truncation equality: ⌊x · 10ᵈ⌋ = ⌊y · 10ᵈ⌋.
    ///
    /// This is the equality used by every sum comparison in the search
    /// driver (fast paths, ascent checks, the pair scan).
    pub fn same_sum(&self, x: f64, y: f64) -> bool {
        (x * self.scale).trunc() as i64 == (y * self.scale).trunc() as i64
    }

    /// Check that `x` survives scaling without losing unit precision.
    pub fn ensure_exact(&self, x: f64) -> Result<(), PrecisionError> {
        let scaled = x * self.scale;
        if !scaled.is_finite() || scaled.abs() >= MAX_EXACT_SCALED {
            return Err(PrecisionError {
                value: x,
                dp: self.dp,
            });
        }
        Ok(())
    }
}
