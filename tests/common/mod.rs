// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

use std::collections::BTreeMap;
use subset_sum_search::quantize::Quantizer;
use subset_sum_search::{run_query, QueryConfig, QueryReport};

/// The 20-atom arithmetic fixture: 100, 120, …, 480.
pub fn step20() -> Vec<f64> {
    (0..20).map(|i| 100.0 + 20.0 * i as f64).collect()
}

/// Run a query discarding output.
pub fn run(values: &[f64], config: &QueryConfig) -> QueryReport {
    let mut sink = std::io::sink();
    run_query(values, config, &mut sink).expect("query failed")
}

/// Run a query capturing the sink.
pub fn run_capture(values: &[f64], config: &QueryConfig) -> (QueryReport, String) {
    let mut out = Vec::new();
    let report = run_query(values, config, &mut out).expect("query failed");
    (report, String::from_utf8(out).expect("output not utf-8"))
}

/// Nonzero per-cardinality counts, keyed by cardinality.
pub fn breakdown(report: &QueryReport) -> BTreeMap<usize, u64> {
    report
        .lengths()
        .iter()
        .filter(|entry| entry.count > 0)
        .map(|entry| (entry.length, entry.count))
        .collect()
}

/// Brute-force oracle: enumerate every nondecreasing multiset of `values`
/// with cardinality in [min_len, max_len] and count those whose sum equals
/// `query` at the given precision.
///
/// Exponential; only for small fixtures. `values` must be sorted
/// ascending so the overshoot prune is sound.
pub fn oracle(
    values: &[f64],
    query: f64,
    dp: u32,
    min_len: usize,
    max_len: usize,
) -> BTreeMap<usize, u64> {
    assert!(values.windows(2).all(|w| w[0] < w[1]), "oracle needs sorted input");
    let quant = Quantizer::new(dp);
    let mut counts = BTreeMap::new();
    descend(
        values, query, &quant, min_len, max_len, 0, 0.0, 0, &mut counts,
    );
    counts
}

#[allow(clippy::too_many_arguments)]
fn descend(
    values: &[f64],
    query: f64,
    quant: &Quantizer,
    min_len: usize,
    max_len: usize,
    start: usize,
    sum: f64,
    len: usize,
    counts: &mut BTreeMap<usize, u64>,
) {
    if len >= min_len && len >= 1 && quant.same_sum(sum, query) {
        *counts.entry(len).or_insert(0) += 1;
    }
    if len == max_len {
        return;
    }
    for i in start..values.len() {
        let next = sum + values[i];
        if next > query && !quant.same_sum(next, query) {
            break; // sorted input: every later atom overshoots further
        }
        descend(
            values, query, quant, min_len, max_len, i, next, len + 1, counts,
        );
    }
}
