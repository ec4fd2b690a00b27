// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The minimum-cut oracle seam.
//!
//! The bisector consumes min-cut as an injected, stateless capability
//! behind the [`MinCutOracle`] trait, so tests can substitute mocks and
//! deployments can swap solvers without touching the engine. The crate
//! ships [`StoerWagner`], a deterministic exact solver, as the default.
//!
//! # Contract
//!
//! An oracle call either returns a proper 2-way split (both sides
//! non-empty) with the severed edges and their total weight, or an
//! [`OracleError`]. The engine treats every error, including panics
//! mapped to errors by custom implementations, as equivalent to a
//! timeout: the affected sub-partition is finished unsplit.

use crate::OracleError;
use std::time::{Duration, Instant};
use suite_model::{GraphEdge, SuiteGraph};

/// A 2-way partition of a graph with the weight of the severed edges.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MinCut {
    /// Node paths on the first side, in graph node order.
    pub partition1: Vec<String>,
    /// Node paths on the second side, in graph node order.
    pub partition2: Vec<String>,
    /// Edges with one endpoint on each side.
    pub cut_edges: Vec<GraphEdge>,
    /// Total weight of the cut edges.
    pub cut_value: f64,
}

/// Trait for minimum-cut solvers.
///
/// Implementations are purely algorithmic, with no I/O, and must be
/// re-entrant: a single engine instance may be shared across threads.
pub trait MinCutOracle: Send + Sync {
    /// Human-readable name of this oracle.
    fn name(&self) -> &str;

    /// Computes a minimum 2-way cut of `graph`.
    ///
    /// `budget` is a hard wall-clock limit for this one call (`None` for
    /// unlimited). Implementations should check it periodically and return
    /// [`OracleError::Timeout`] rather than overrun.
    fn compute_min_cut(
        &self,
        graph: &SuiteGraph,
        budget: Option<Duration>,
    ) -> Result<MinCut, OracleError>;
}

/// Exact minimum cut via the Stoer–Wagner contraction algorithm.
///
/// Runs in O(V³) on an adjacency matrix, which is comfortable for the
/// graph sizes a test suite produces (hundreds to a few thousand nodes).
/// Fully deterministic: ties in the maximum-adjacency search are broken
/// by node order.
#[derive(Debug, Clone, Default)]
pub struct StoerWagner;

impl StoerWagner {
    pub fn new() -> Self {
        Self
    }
}

impl MinCutOracle for StoerWagner {
    fn name(&self) -> &str {
        "stoer-wagner"
    }

    fn compute_min_cut(
        &self,
        graph: &SuiteGraph,
        budget: Option<Duration>,
    ) -> Result<MinCut, OracleError> {
        let n = graph.num_nodes();
        if n < 2 {
            return Err(OracleError::GraphTooSmall);
        }

        let started = Instant::now();
        let budget_ms = budget.map(|d| d.as_millis() as u64).unwrap_or(0);

        // Dense adjacency matrix; the builder has already merged parallel
        // references into single edges.
        let mut weight = vec![vec![0.0_f64; n]; n];
        for (i, j, w) in graph.edge_indices() {
            weight[i][j] += w;
            weight[j][i] += w;
        }

        // groups[v] holds the original node indices contracted into v.
        let mut groups: Vec<Vec<usize>> = (0..n).map(|v| vec![v]).collect();
        let mut active: Vec<usize> = (0..n).collect();

        let mut best_value = f64::INFINITY;
        let mut best_side: Vec<usize> = Vec::new();

        while active.len() > 1 {
            if let Some(limit) = budget {
                if started.elapsed() >= limit {
                    return Err(OracleError::Timeout { budget_ms });
                }
            }

            // Maximum-adjacency search: grow the set A one vertex at a
            // time, always adding the most tightly connected remainder.
            let mut in_a = vec![false; n];
            let mut connectivity = vec![0.0_f64; n];
            let mut prev = usize::MAX;
            let mut last = usize::MAX;
            let mut cut_of_phase = 0.0;

            for _ in 0..active.len() {
                let mut next = usize::MAX;
                let mut next_weight = f64::NEG_INFINITY;
                for &v in &active {
                    if !in_a[v] && connectivity[v] > next_weight {
                        next = v;
                        next_weight = connectivity[v];
                    }
                }

                prev = last;
                last = next;
                cut_of_phase = connectivity[next];
                in_a[next] = true;
                for &v in &active {
                    if !in_a[v] {
                        connectivity[v] += weight[next][v];
                    }
                }
            }

            // The cut of this phase separates `last` (with everything
            // contracted into it) from the rest.
            if cut_of_phase < best_value {
                best_value = cut_of_phase;
                best_side = groups[last].clone();
            }

            // Contract `last` into `prev`.
            for &v in &active {
                if v != last && v != prev {
                    weight[prev][v] += weight[last][v];
                    weight[v][prev] = weight[prev][v];
                }
            }
            let absorbed = std::mem::take(&mut groups[last]);
            groups[prev].extend(absorbed);
            active.retain(|&v| v != last);
        }

        let mut on_best_side = vec![false; n];
        for &v in &best_side {
            on_best_side[v] = true;
        }

        let nodes = graph.nodes();
        let partition2: Vec<String> = (0..n)
            .filter(|&v| on_best_side[v])
            .map(|v| nodes[v].path.clone())
            .collect();
        let partition1: Vec<String> = (0..n)
            .filter(|&v| !on_best_side[v])
            .map(|v| nodes[v].path.clone())
            .collect();

        let cut_edges: Vec<GraphEdge> = graph
            .edges()
            .iter()
            .zip(graph.edge_indices())
            .filter(|(_, (i, j, _))| on_best_side[*i] != on_best_side[*j])
            .map(|(e, _)| e.clone())
            .collect();

        Ok(MinCut {
            partition1,
            partition2,
            cut_edges,
            cut_value: best_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suite_model::{GraphBuilder, TestDescriptor};

    /// Builds a graph from unit-weight edges over synthetic tests.
    fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> SuiteGraph {
        let mut tests: Vec<TestDescriptor> = (0..n)
            .map(|i| {
                let mut t = TestDescriptor::new(format!("t{i}"), 10.0);
                // Alternate priorities so consecutive-index edges stay at
                // the 1.0 base weight.
                t.priority = if i % 2 == 0 {
                    suite_model::Priority::Low
                } else {
                    suite_model::Priority::High
                };
                t
            })
            .collect();
        for &(a, b) in edges {
            let dep = format!("t{b}");
            tests[a].dependencies.push(dep);
        }
        GraphBuilder::new().build(&tests)
    }

    #[test]
    fn test_too_small() {
        let g = graph_from_edges(1, &[]);
        let result = StoerWagner::new().compute_min_cut(&g, None);
        assert!(matches!(result, Err(OracleError::GraphTooSmall)));
    }

    #[test]
    fn test_single_edge() {
        let g = graph_from_edges(2, &[(0, 1)]);
        let cut = StoerWagner::new().compute_min_cut(&g, None).unwrap();
        assert_eq!(cut.cut_value, 1.0);
        assert_eq!(cut.cut_edges.len(), 1);
        assert_eq!(cut.partition1.len() + cut.partition2.len(), 2);
    }

    #[test]
    fn test_path_graph() {
        // t0 - t1 - t2: cheapest cut severs one edge.
        let g = graph_from_edges(3, &[(0, 1), (1, 2)]);
        let cut = StoerWagner::new().compute_min_cut(&g, None).unwrap();
        assert_eq!(cut.cut_value, 1.0);
        assert_eq!(cut.cut_edges.len(), 1);
    }

    #[test]
    fn test_triangle() {
        // Unit-weight triangle: min cut isolates one vertex, value 2.
        let g = graph_from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let cut = StoerWagner::new().compute_min_cut(&g, None).unwrap();
        assert_eq!(cut.cut_value, 2.0);
        assert_eq!(cut.cut_edges.len(), 2);
        // One side is a single vertex.
        let smaller = cut.partition1.len().min(cut.partition2.len());
        assert_eq!(smaller, 1);
    }

    #[test]
    fn test_weighted_triangle() {
        // Triangle where the t0-t1 edge is heavier (shared tag): the min
        // cut isolates t2 and never severs the heavy edge.
        let mut tests = vec![
            TestDescriptor::new("t0", 10.0),
            TestDescriptor::new("t1", 10.0),
            TestDescriptor::new("t2", 10.0),
        ];
        tests[0].dependencies = vec!["t1".into(), "t2".into()];
        tests[1].dependencies = vec!["t2".into()];
        tests[0].tags = vec!["db".into()];
        tests[1].tags = vec!["db".into()];
        let g = GraphBuilder::new().build(&tests);
        let cut = StoerWagner::new().compute_min_cut(&g, None).unwrap();
        assert_eq!(cut.cut_edges.len(), 2);
        for edge in &cut.cut_edges {
            assert!(edge.a == "t2" || edge.b == "t2");
        }
        let singleton = if cut.partition1.len() == 1 {
            &cut.partition1
        } else {
            &cut.partition2
        };
        assert_eq!(singleton, &vec!["t2".to_string()]);
    }

    #[test]
    fn test_disconnected_graph_zero_cut() {
        // Two components: the free cut between them costs nothing.
        let g = graph_from_edges(4, &[(0, 1), (2, 3)]);
        let cut = StoerWagner::new().compute_min_cut(&g, None).unwrap();
        assert_eq!(cut.cut_value, 0.0);
        assert!(cut.cut_edges.is_empty());
        assert_eq!(cut.partition1.len(), 2);
        assert_eq!(cut.partition2.len(), 2);
    }

    #[test]
    fn test_dumbbell() {
        // Two triangles joined by a single bridge: the bridge is the cut.
        let g = graph_from_edges(
            6,
            &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)],
        );
        let cut = StoerWagner::new().compute_min_cut(&g, None).unwrap();
        assert_eq!(cut.cut_edges.len(), 1);
        assert_eq!(cut.partition1.len(), 3);
        assert_eq!(cut.partition2.len(), 3);
    }

    #[test]
    fn test_deterministic() {
        let g = graph_from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        let c1 = StoerWagner::new().compute_min_cut(&g, None).unwrap();
        let c2 = StoerWagner::new().compute_min_cut(&g, None).unwrap();
        assert_eq!(c1.partition1, c2.partition1);
        assert_eq!(c1.partition2, c2.partition2);
        assert_eq!(c1.cut_value, c2.cut_value);
    }

    #[test]
    fn test_zero_budget_times_out() {
        let g = graph_from_edges(3, &[(0, 1), (1, 2)]);
        let result = StoerWagner::new().compute_min_cut(&g, Some(Duration::ZERO));
        assert!(matches!(result, Err(OracleError::Timeout { .. })));
    }

    #[test]
    fn test_partition_sides_in_node_order() {
        let g = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let cut = StoerWagner::new().compute_min_cut(&g, None).unwrap();
        for side in [&cut.partition1, &cut.partition2] {
            let mut sorted = side.clone();
            sorted.sort_by_key(|p| g.index_of(p));
            assert_eq!(&sorted, side);
        }
    }
}
