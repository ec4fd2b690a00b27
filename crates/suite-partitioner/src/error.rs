// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the partitioning engine.
//!
//! Only configuration misuse ever reaches the caller. Oracle failures and
//! timeouts are local to a single bisection step and are absorbed into a
//! degraded-but-valid result (see [`crate::Algorithm::DurationBalanced`]).

/// Errors surfaced by [`crate::SuitePartitioner::partition`].
#[derive(Debug, thiserror::Error)]
pub enum PartitionError {
    /// The configured partition count is zero.
    #[error("invalid partition count: {0} (must be at least 1)")]
    InvalidPartitionCount(usize),

    /// The configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// A produced result failed its own self-check. Indicates a bug in the
    /// engine, never a property of the input.
    #[error("partition result invariant violated: {detail}")]
    InvariantViolation { detail: String },
}

/// Errors reported by a [`crate::MinCutOracle`] call.
///
/// Every variant is recoverable: the bisector finishes the affected
/// sub-partition unsplit (or falls back to duration balancing when the
/// very first cut fails) and never propagates these to the caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OracleError {
    /// The computation exceeded its wall-clock budget.
    #[error("min-cut computation exceeded the {budget_ms} ms budget")]
    Timeout { budget_ms: u64 },

    /// The graph has fewer than two nodes, so no cut exists.
    #[error("graph has fewer than two nodes")]
    GraphTooSmall,

    /// The solver failed for any other reason.
    #[error("min-cut computation failed: {0}")]
    Failed(String),
}
