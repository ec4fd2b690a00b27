// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Partitioning configuration loaded from TOML files or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! partition_count = 4
//! max_imbalance = 0.1
//! duration_weight = 0.7
//! prioritize_flaky_tests = true
//! keep_related_together = true
//! timeout_ms = 5000
//! ```

use crate::PartitionError;
use std::path::Path;
use std::time::Duration;

/// Configuration for one partitioning run.
///
/// Immutable once handed to a [`crate::SuitePartitioner`]; a single engine
/// instance may be shared between threads.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PartitionConfig {
    /// Number of partitions to produce (the CI worker count). Must be >= 1.
    pub partition_count: usize,
    /// Acceptable fractional duration imbalance between partitions.
    /// Informational: reported alongside results, not enforced.
    #[serde(default = "default_max_imbalance")]
    pub max_imbalance: f64,
    /// Relative weight of duration vs. coupling in quality reporting, in
    /// `[0, 1]`. Informational.
    #[serde(default = "default_duration_weight")]
    pub duration_weight: f64,
    /// Give mutually flaky tests a co-location bonus in the coupling graph,
    /// so quarantine and triage stay on one worker.
    #[serde(default = "default_true")]
    pub prioritize_flaky_tests: bool,
    /// Use the coupling-aware min-cut path. When `false`, the engine goes
    /// straight to duration balancing and ignores the dependency graph.
    #[serde(default = "default_true")]
    pub keep_related_together: bool,
    /// Wall-clock budget per min-cut oracle call, in milliseconds.
    /// `0` means no limit.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_max_imbalance() -> f64 {
    0.1
}

fn default_duration_weight() -> f64 {
    0.7
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            partition_count: 2,
            max_imbalance: default_max_imbalance(),
            duration_weight: default_duration_weight(),
            prioritize_flaky_tests: true,
            keep_related_together: true,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl PartitionConfig {
    /// Creates a configuration for `partition_count` workers with all other
    /// settings at their defaults.
    pub fn for_workers(partition_count: usize) -> Self {
        Self {
            partition_count,
            ..Default::default()
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, PartitionError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PartitionError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, PartitionError> {
        toml::from_str(toml_str)
            .map_err(|e| PartitionError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, PartitionError> {
        toml::to_string_pretty(self)
            .map_err(|e| PartitionError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Validates the configuration.
    ///
    /// The only fatal misuse is `partition_count == 0`; every other field
    /// is either clamped by its consumer or informational.
    pub fn validate(&self) -> Result<(), PartitionError> {
        if self.partition_count == 0 {
            return Err(PartitionError::InvalidPartitionCount(self.partition_count));
        }
        Ok(())
    }

    /// Returns the per-oracle-call wall-clock budget, or `None` when
    /// `timeout_ms` is zero (unlimited).
    pub fn oracle_budget(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}
