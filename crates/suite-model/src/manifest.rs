// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Suite manifest: the JSON document produced by test discovery tooling.
//!
//! The partitioning engine itself performs no I/O; it consumes an
//! already-materialised `&[TestDescriptor]`. This loader exists for the
//! surrounding orchestration layer, which typically reads one `suite.json`
//! per repository.

use crate::{SuiteError, TestDescriptor};
use std::collections::HashSet;
use std::path::Path;

/// A suite of tests as described by external discovery/measurement tooling.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SuiteManifest {
    /// Human-readable suite name (e.g., `"backend-unit"`).
    #[serde(default)]
    pub name: String,
    /// One entry per test file.
    pub tests: Vec<TestDescriptor>,
}

impl SuiteManifest {
    /// Loads and validates a manifest from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, SuiteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses and validates a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SuiteError> {
        let manifest: SuiteManifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serialises the manifest to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SuiteError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates every descriptor and rejects duplicate paths.
    pub fn validate(&self) -> Result<(), SuiteError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.tests.len());
        for test in &self.tests {
            test.validate()?;
            if !seen.insert(test.path.as_str()) {
                return Err(SuiteError::DuplicatePath(test.path.clone()));
            }
        }
        Ok(())
    }

    /// Total estimated duration of the whole suite in milliseconds.
    pub fn total_duration_ms(&self) -> f64 {
        self.tests.iter().map(|t| t.estimated_duration_ms).sum()
    }

    /// Returns a concise summary string for display.
    pub fn summary(&self) -> String {
        format!(
            "Suite '{}': {} tests, {:.1} s total estimated duration",
            self.name,
            self.tests.len(),
            self.total_duration_ms() / 1000.0,
        )
    }
}
