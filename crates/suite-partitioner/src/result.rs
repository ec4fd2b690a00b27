// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Partitioning output types.
//!
//! A [`PartitionResult`] is the complete answer for one run: the partition
//! set itself plus the metrics a CI orchestrator needs to decide whether
//! the assignment is worth using. Everything is serde-serialisable so the
//! result can be written straight into a pipeline artifact.

use crate::{PartitionError, QualityReport};

/// Which strategy produced the final partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Algorithm {
    /// Coupling-aware recursive bisection via the min-cut oracle.
    #[serde(rename = "mincut")]
    MinCut,
    /// Longest-processing-time-first duration balancing.
    #[serde(rename = "duration-balanced")]
    DurationBalanced,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::MinCut => "mincut",
            Algorithm::DurationBalanced => "duration-balanced",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One group of tests assigned to a single CI worker.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TestPartition {
    /// Stable identifier, `partition-{index}`.
    pub id: String,
    /// Test paths in this partition, in suite input order.
    pub tests: Vec<String>,
    /// Sum of the estimated durations of the tests, in milliseconds.
    pub estimated_duration_ms: f64,
    /// Number of graph edges with exactly one endpoint in this partition.
    pub cross_partition_deps: usize,
    /// Index of the worker this partition is assigned to.
    pub worker_index: usize,
}

/// The complete output of one partitioning run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PartitionResult {
    /// The partitions, ordered by worker index.
    pub partitions: Vec<TestPartition>,
    /// The strategy that produced this result.
    pub algorithm: Algorithm,
    /// Total number of graph edges crossing any partition boundary.
    /// Each edge is counted once; the per-partition counts sum to twice
    /// this value.
    pub total_cross_partition_deps: usize,
    /// Average partition duration over the maximum, in `(0, 1]`.
    pub load_balance_score: f64,
    /// Wall-clock time spent computing this result, in milliseconds.
    pub computation_time_ms: u64,
    /// Weight of the first bisection cut, when the min-cut path ran.
    pub min_cut_value: Option<f64>,
    /// Estimated speedup over serial execution, >= 1.
    pub estimated_speedup: f64,
    /// Statistical quality measures.
    pub quality: QualityReport,
}

impl PartitionResult {
    /// Checks the structural invariants of a finished result.
    ///
    /// Every input test appears in exactly one partition, no partition is
    /// empty, and the scores are in range. The engine runs this before
    /// returning; a violation is a bug in the partitioning itself.
    pub fn validate(&self, num_input_tests: usize) -> Result<(), PartitionError> {
        let assigned: usize = self.partitions.iter().map(|p| p.tests.len()).sum();
        if assigned != num_input_tests {
            return Err(PartitionError::InvariantViolation {
                detail: format!("{assigned} tests assigned, {num_input_tests} expected"),
            });
        }
        let mut seen = std::collections::HashSet::new();
        for partition in &self.partitions {
            if partition.tests.is_empty() {
                return Err(PartitionError::InvariantViolation {
                    detail: format!("partition '{}' is empty", partition.id),
                });
            }
            for test in &partition.tests {
                if !seen.insert(test.as_str()) {
                    return Err(PartitionError::InvariantViolation {
                        detail: format!("test '{test}' assigned more than once"),
                    });
                }
            }
        }
        if !(0.0..=1.0).contains(&self.load_balance_score) {
            return Err(PartitionError::InvariantViolation {
                detail: format!("load balance score {} out of range", self.load_balance_score),
            });
        }
        if self.estimated_speedup < 1.0 {
            return Err(PartitionError::InvariantViolation {
                detail: format!("estimated speedup {} below 1", self.estimated_speedup),
            });
        }
        Ok(())
    }

    /// Human-readable one-paragraph summary.
    pub fn summary(&self) -> String {
        let longest = self
            .partitions
            .iter()
            .map(|p| p.estimated_duration_ms)
            .fold(0.0_f64, f64::max);
        format!(
            "{} partitions via {} | longest {:.1} ms | balance {:.2} | \
             {} cross-deps | est. speedup {:.2}x | computed in {} ms",
            self.partitions.len(),
            self.algorithm,
            longest,
            self.load_balance_score,
            self.total_cross_partition_deps,
            self.estimated_speedup,
            self.computation_time_ms,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> PartitionResult {
        PartitionResult {
            partitions: vec![
                TestPartition {
                    id: "partition-0".into(),
                    tests: vec!["a".into(), "b".into()],
                    estimated_duration_ms: 20.0,
                    cross_partition_deps: 1,
                    worker_index: 0,
                },
                TestPartition {
                    id: "partition-1".into(),
                    tests: vec!["c".into()],
                    estimated_duration_ms: 15.0,
                    cross_partition_deps: 1,
                    worker_index: 1,
                },
            ],
            algorithm: Algorithm::MinCut,
            total_cross_partition_deps: 1,
            load_balance_score: 0.875,
            computation_time_ms: 3,
            min_cut_value: Some(1.0),
            estimated_speedup: 1.75,
            quality: QualityReport {
                duration_variance: 6.25,
                size_std_dev: 0.5,
                cross_dep_percentage: 50.0,
                vs_naive_improvement: 0.2,
            },
        }
    }

    #[test]
    fn test_algorithm_str() {
        assert_eq!(Algorithm::MinCut.as_str(), "mincut");
        assert_eq!(Algorithm::DurationBalanced.to_string(), "duration-balanced");
    }

    #[test]
    fn test_algorithm_serde_rename() {
        let json = serde_json::to_string(&Algorithm::DurationBalanced).unwrap();
        assert_eq!(json, "\"duration-balanced\"");
        let back: Algorithm = serde_json::from_str("\"mincut\"").unwrap();
        assert_eq!(back, Algorithm::MinCut);
    }

    #[test]
    fn test_validate_ok() {
        sample_result().validate(3).unwrap();
    }

    #[test]
    fn test_validate_missing_test() {
        let r = sample_result();
        assert!(matches!(
            r.validate(4),
            Err(PartitionError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_validate_duplicate_test() {
        let mut r = sample_result();
        r.partitions[1].tests = vec!["a".into()];
        assert!(r.validate(3).is_err());
    }

    #[test]
    fn test_validate_empty_partition() {
        let mut r = sample_result();
        r.partitions[1].tests.clear();
        r.partitions[0].tests.push("c".into());
        assert!(r.validate(3).is_err());
    }

    #[test]
    fn test_validate_speedup_range() {
        let mut r = sample_result();
        r.estimated_speedup = 0.9;
        assert!(r.validate(3).is_err());
    }

    #[test]
    fn test_summary_mentions_algorithm() {
        let s = sample_result().summary();
        assert!(s.contains("mincut"));
        assert!(s.contains("2 partitions"));
    }

    #[test]
    fn test_serialises_to_json() {
        let json = serde_json::to_string_pretty(&sample_result()).unwrap();
        assert!(json.contains("\"partition-0\""));
        assert!(json.contains("\"mincut\""));
    }
}
