// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The suite coupling graph.
//!
//! Tests are nodes; inferred couplings are weighted, undirected edges.
//! [`GraphBuilder`] derives the graph from declared dependency/dependent
//! references and a small set of heuristics that raise the cost of
//! separating closely related tests:
//!
//! | Heuristic | Weight |
//! |---|---|
//! | Base (any resolvable reference) | 1.0 |
//! | Per shared tag | +0.5 |
//! | Identical priority | +0.3 |
//! | Either side is `critical` | +1.0 |
//! | Both flaky (score > 0.3) | +0.5 |
//!
//! # Determinism
//!
//! Node order is input order, edge order is first-encounter order, and
//! lookups use an insertion-ordered map. Identical inputs always produce
//! identical graphs; no hash-map iteration order is ever observable.

use crate::{Priority, TestDescriptor};
use indexmap::IndexMap;
use std::collections::HashSet;

const BASE_EDGE_WEIGHT: f64 = 1.0;
const SHARED_TAG_BONUS: f64 = 0.5;
const SAME_PRIORITY_BONUS: f64 = 0.3;
const CRITICAL_BONUS: f64 = 1.0;
const FLAKY_BONUS: f64 = 0.5;
const FLAKY_THRESHOLD: f64 = 0.3;

/// A node in the coupling graph: one test file.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GraphNode {
    /// Path of the test this node represents.
    pub path: String,
    /// Duration normalised against the longest test in the set, in `[0, 1]`.
    /// Defined as 1.0 when every duration is zero.
    pub weight: f64,
}

/// An undirected, weighted edge between two coupled tests.
///
/// Endpoints are ordered by node position (`a` before `b` in input order),
/// which doubles as the deduplication key. No self-loops.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GraphEdge {
    /// Path of the earlier endpoint (input order).
    pub a: String,
    /// Path of the later endpoint (input order).
    pub b: String,
    /// Heuristic coupling strength, always >= 1.0.
    pub weight: f64,
}

/// The test suite as a weighted, undirected coupling graph.
///
/// Owned exclusively by a single partition computation; never mutated
/// after construction. Sub-graphs for recursive bisection are built by
/// copying ([`SuiteGraph::induced_subgraph`]).
#[derive(Debug, Clone, serde::Serialize)]
pub struct SuiteGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    #[serde(skip)]
    index: IndexMap<String, usize>,
}

impl SuiteGraph {
    fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.path.clone(), i))
            .collect();
        Self { nodes, edges, index }
    }

    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the nodes in input order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Returns the edges in first-encounter order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Returns the position of `path` in the node list, if present.
    pub fn index_of(&self, path: &str) -> Option<usize> {
        self.index.get(path).copied()
    }

    /// Returns `true` if the graph contains a node for `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Returns the edges as `(node index, node index, weight)` triples.
    ///
    /// Indices refer to positions in [`SuiteGraph::nodes`].
    pub fn edge_indices(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.edges.iter().filter_map(|e| {
            match (self.index_of(&e.a), self.index_of(&e.b)) {
                (Some(i), Some(j)) => Some((i, j, e.weight)),
                _ => None,
            }
        })
    }

    /// Sum of all edge weights.
    pub fn total_edge_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Builds the sub-graph induced by `keep`: the nodes named in `keep`
    /// (in this graph's node order) and the edges with both endpoints kept.
    pub fn induced_subgraph(&self, keep: &[String]) -> SuiteGraph {
        let keep_set: HashSet<&str> = keep.iter().map(String::as_str).collect();
        let nodes: Vec<GraphNode> = self
            .nodes
            .iter()
            .filter(|n| keep_set.contains(n.path.as_str()))
            .cloned()
            .collect();
        let edges: Vec<GraphEdge> = self
            .edges
            .iter()
            .filter(|e| keep_set.contains(e.a.as_str()) && keep_set.contains(e.b.as_str()))
            .cloned()
            .collect();
        SuiteGraph::new(nodes, edges)
    }

    /// Returns a concise summary string for display.
    pub fn summary(&self) -> String {
        format!(
            "SuiteGraph: {} tests, {} couplings, total edge weight {:.1}",
            self.num_nodes(),
            self.num_edges(),
            self.total_edge_weight(),
        )
    }
}

/// Deterministic builder for [`SuiteGraph`].
///
/// References to paths outside the input set are silently dropped: external
/// graph-extraction tools may legitimately reference files that are not part
/// of the current test selection.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    co_locate_flaky: bool,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            co_locate_flaky: true,
        }
    }

    /// Whether mutually flaky tests (both scores above 0.3) receive the
    /// co-location bonus. On by default; disabled when the caller does not
    /// want quarantine-friendly grouping.
    pub fn co_locate_flaky(mut self, enabled: bool) -> Self {
        self.co_locate_flaky = enabled;
        self
    }

    /// Builds the coupling graph for `tests`.
    pub fn build(&self, tests: &[TestDescriptor]) -> SuiteGraph {
        let lookup: IndexMap<&str, usize> = tests
            .iter()
            .enumerate()
            .map(|(i, t)| (t.path.as_str(), i))
            .collect();

        let max_duration = tests
            .iter()
            .map(|t| t.estimated_duration_ms)
            .fold(0.0_f64, f64::max);

        let nodes: Vec<GraphNode> = tests
            .iter()
            .map(|t| GraphNode {
                path: t.path.clone(),
                weight: if max_duration > 0.0 {
                    t.estimated_duration_ms / max_duration
                } else {
                    1.0
                },
            })
            .collect();

        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut edges = Vec::new();

        for (i, test) in tests.iter().enumerate() {
            for reference in test.declared_refs() {
                let Some(&j) = lookup.get(reference) else {
                    // Reference outside the current selection; not an error.
                    continue;
                };
                if i == j {
                    continue;
                }
                let key = (i.min(j), i.max(j));
                if !seen.insert(key) {
                    continue;
                }
                edges.push(GraphEdge {
                    a: tests[key.0].path.clone(),
                    b: tests[key.1].path.clone(),
                    weight: self.edge_weight(&tests[key.0], &tests[key.1]),
                });
            }
        }

        tracing::debug!(
            tests = tests.len(),
            edges = edges.len(),
            "built suite coupling graph"
        );
        SuiteGraph::new(nodes, edges)
    }

    /// Computes the heuristic coupling strength between two tests.
    fn edge_weight(&self, a: &TestDescriptor, b: &TestDescriptor) -> f64 {
        let mut weight = BASE_EDGE_WEIGHT;

        let shared_tags = a.tags.iter().filter(|t| b.tags.contains(t)).count();
        weight += shared_tags as f64 * SHARED_TAG_BONUS;

        if a.priority == b.priority {
            weight += SAME_PRIORITY_BONUS;
        }
        if a.priority == Priority::Critical || b.priority == Priority::Critical {
            weight += CRITICAL_BONUS;
        }
        if self.co_locate_flaky
            && a.flakiness_score > FLAKY_THRESHOLD
            && b.flakiness_score > FLAKY_THRESHOLD
        {
            weight += FLAKY_BONUS;
        }
        weight
    }
}
