// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Partition quality metrics.
//!
//! Everything here is derived from the final partition set and the coupling
//! graph; nothing feeds back into the partitioning itself. The numbers are
//! the primary tool for comparing the min-cut path against plain duration
//! balancing on a given suite.

use suite_model::TestDescriptor;

/// Fractional overhead added to the critical path per cross-partition
/// dependency (the 10%-per-100-deps penalty model).
const CROSS_DEP_PENALTY: f64 = 0.1 / 100.0;

/// Statistical quality measures for a finished partitioning.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct QualityReport {
    /// Population variance of the per-partition durations (ms²).
    pub duration_variance: f64,
    /// Population standard deviation of the partition sizes (test counts).
    pub size_std_dev: f64,
    /// Cross-partition dependencies as a percentage of all declared
    /// dependency/dependent references. 0 when nothing is declared.
    pub cross_dep_percentage: f64,
    /// Improvement of the observed duration variance over naive
    /// round-robin assignment, normalised to `[0, 1]` and clamped at 0.
    pub vs_naive_improvement: f64,
}

/// Population variance.
pub(crate) fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// `avg / max` over partition durations: 1.0 is perfectly balanced.
/// Defined as 1.0 when the longest partition is empty of work.
pub(crate) fn load_balance_score(durations: &[f64]) -> f64 {
    let max = durations.iter().copied().fold(0.0_f64, f64::max);
    if durations.is_empty() || max <= 0.0 {
        return 1.0;
    }
    let avg = durations.iter().sum::<f64>() / durations.len() as f64;
    avg / max
}

/// Estimated parallel speedup over serial execution.
///
/// The slowest partition is the critical path; every cross-partition
/// dependency adds coordination overhead on top of it. Never below 1.
pub(crate) fn estimated_speedup(durations: &[f64], total_cross_deps: usize) -> f64 {
    let total: f64 = durations.iter().sum();
    let max = durations.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return 1.0;
    }
    let effective_parallel = max * (1.0 + CROSS_DEP_PENALTY * total_cross_deps as f64);
    (total / effective_parallel).max(1.0)
}

/// Builds the quality report for a finished partition set.
///
/// `durations` and `sizes` are per-partition; `tests` is the original
/// input (used for the declared-reference denominator and the naive
/// round-robin baseline).
pub(crate) fn evaluate(
    tests: &[TestDescriptor],
    durations: &[f64],
    sizes: &[usize],
    total_cross_deps: usize,
) -> QualityReport {
    let duration_variance = variance(durations);
    let size_values: Vec<f64> = sizes.iter().map(|&s| s as f64).collect();
    let size_std_dev = variance(&size_values).sqrt();

    let declared_refs: usize = tests.iter().map(|t| t.num_declared_refs()).sum();
    let cross_dep_percentage = if declared_refs > 0 {
        total_cross_deps as f64 / declared_refs as f64 * 100.0
    } else {
        0.0
    };

    QualityReport {
        duration_variance,
        size_std_dev,
        cross_dep_percentage,
        vs_naive_improvement: vs_naive_improvement(tests, durations, duration_variance),
    }
}

/// Compares the observed duration variance against a naive round-robin
/// baseline (`test[i] -> bucket[i % k]`).
fn vs_naive_improvement(tests: &[TestDescriptor], durations: &[f64], observed_variance: f64) -> f64 {
    let k = durations.len();
    if k == 0 {
        return 0.0;
    }
    let mut naive = vec![0.0_f64; k];
    for (i, test) in tests.iter().enumerate() {
        naive[i % k] += test.estimated_duration_ms;
    }
    let naive_variance = variance(&naive);
    if naive_variance <= 0.0 {
        return 0.0;
    }
    ((naive_variance - observed_variance) / naive_variance).max(0.0)
}
