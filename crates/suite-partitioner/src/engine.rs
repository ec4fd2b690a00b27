// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The partitioning engine.
//!
//! [`SuitePartitioner`] ties the pipeline together: build the coupling
//! graph, bisect it with the min-cut oracle (or fall back to duration
//! balancing), reconcile the partition count, then assemble and
//! self-check the result.
//!
//! # Strategy selection
//!
//! | Condition                                   | Path                |
//! |---------------------------------------------|---------------------|
//! | no tests                                    | empty result        |
//! | tests <= partition count                    | one test per group  |
//! | partition count == 1                        | single group        |
//! | `keep_related_together` off, or no edges    | duration balancing  |
//! | first min-cut fails                         | duration balancing  |
//! | otherwise                                   | recursive bisection |

use crate::oracle::{MinCutOracle, StoerWagner};
use crate::result::{Algorithm, PartitionResult, TestPartition};
use crate::{balance, bisect, quality, reconcile};
use crate::{PartitionConfig, PartitionError};
use std::sync::Arc;
use std::time::Instant;
use suite_model::{GraphBuilder, SuiteGraph, TestDescriptor};

/// Partitions a test suite into balanced, low-coupling groups.
///
/// Stateless between calls; one instance can serve many suites and be
/// shared across threads.
pub struct SuitePartitioner {
    config: PartitionConfig,
    oracle: Arc<dyn MinCutOracle>,
}

impl SuitePartitioner {
    /// Creates an engine with the default Stoer-Wagner oracle.
    pub fn new(config: PartitionConfig) -> Self {
        Self::with_oracle(config, Arc::new(StoerWagner::new()))
    }

    /// Creates an engine with a caller-supplied min-cut oracle.
    pub fn with_oracle(config: PartitionConfig, oracle: Arc<dyn MinCutOracle>) -> Self {
        Self { config, oracle }
    }

    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// Partitions `tests` into `config.partition_count` groups.
    ///
    /// Returns fewer groups only when the suite has fewer tests than the
    /// configured count. The result always passes
    /// [`PartitionResult::validate`].
    pub fn partition(&self, tests: &[TestDescriptor]) -> Result<PartitionResult, PartitionError> {
        let started = Instant::now();
        self.config.validate()?;
        let k = self.config.partition_count;

        let graph = GraphBuilder::new()
            .co_locate_flaky(self.config.prioritize_flaky_tests)
            .build(tests);

        // Trivial suites: one test per partition, nothing to optimise.
        if tests.len() <= k {
            let groups: Vec<Vec<usize>> = (0..tests.len()).map(|i| vec![i]).collect();
            let mut result = self.assemble(
                tests,
                &graph,
                groups,
                Algorithm::DurationBalanced,
                None,
                started,
            );
            // Every test runs in parallel, so the ideal speedup is exact.
            result.estimated_speedup = (tests.len() as f64).max(1.0);
            result.validate(tests.len())?;
            return Ok(result);
        }

        let use_mincut = self.config.keep_related_together && k > 1 && graph.num_edges() > 0;

        let (groups, algorithm, min_cut_value) = if use_mincut {
            match bisect::bisect(&graph, k, self.oracle.as_ref(), self.config.oracle_budget()) {
                Ok(outcome) => (
                    reconcile::enforce_count(outcome.groups, k),
                    Algorithm::MinCut,
                    outcome.min_cut_value,
                ),
                Err(e) => {
                    tracing::warn!(
                        oracle = self.oracle.name(),
                        error = %e,
                        "min-cut unavailable, falling back to duration balancing"
                    );
                    (balance::pack(tests, k), Algorithm::DurationBalanced, None)
                }
            }
        } else {
            (balance::pack(tests, k), Algorithm::DurationBalanced, None)
        };

        let result = self.assemble(tests, &graph, groups, algorithm, min_cut_value, started);
        result.validate(tests.len())?;
        tracing::info!(
            algorithm = %result.algorithm,
            partitions = result.partitions.len(),
            cross_deps = result.total_cross_partition_deps,
            load_balance = result.load_balance_score,
            "suite partitioned"
        );
        Ok(result)
    }

    /// Builds the result struct from index groups.
    fn assemble(
        &self,
        tests: &[TestDescriptor],
        graph: &SuiteGraph,
        mut groups: Vec<Vec<usize>>,
        algorithm: Algorithm,
        min_cut_value: Option<f64>,
        started: Instant,
    ) -> PartitionResult {
        // Tests keep suite input order inside each partition.
        for group in &mut groups {
            group.sort_unstable();
        }

        let mut owner = vec![usize::MAX; tests.len()];
        for (p, group) in groups.iter().enumerate() {
            for &i in group {
                owner[i] = p;
            }
        }

        let mut total_cross = 0;
        let mut per_partition_cross = vec![0usize; groups.len()];
        for (i, j, _) in graph.edge_indices() {
            if owner[i] != owner[j] {
                total_cross += 1;
                per_partition_cross[owner[i]] += 1;
                per_partition_cross[owner[j]] += 1;
            }
        }

        let durations: Vec<f64> = groups
            .iter()
            .map(|g| g.iter().map(|&i| tests[i].estimated_duration_ms).sum())
            .collect();
        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();

        let partitions: Vec<TestPartition> = groups
            .iter()
            .enumerate()
            .map(|(p, group)| TestPartition {
                id: format!("partition-{p}"),
                tests: group.iter().map(|&i| tests[i].path.clone()).collect(),
                estimated_duration_ms: durations[p],
                cross_partition_deps: per_partition_cross[p],
                worker_index: p,
            })
            .collect();

        PartitionResult {
            partitions,
            algorithm,
            total_cross_partition_deps: total_cross,
            load_balance_score: quality::load_balance_score(&durations),
            computation_time_ms: started.elapsed().as_millis() as u64,
            min_cut_value,
            estimated_speedup: quality::estimated_speedup(&durations, total_cross),
            quality: quality::evaluate(tests, &durations, &sizes, total_cross),
        }
    }
}
