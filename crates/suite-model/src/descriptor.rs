// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Test descriptors: the immutable input to the partitioning engine.
//!
//! Each [`TestDescriptor`] describes a single test file: its estimated run
//! duration, its declared coupling to other test files, a flakiness score,
//! and scheduling hints. Descriptors are produced by an external discovery
//! and measurement process; the engine never mutates them.

use crate::SuiteError;

/// How important a test is. Ordered: `Low < Medium < High < Critical`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Nice-to-have coverage; failures rarely block a release.
    Low,
    /// Ordinary regression coverage.
    Medium,
    /// Covers a feature area that must work before merging.
    High,
    /// Gates the release; must never be casually separated from the tests
    /// it is coupled with.
    Critical,
}

impl Priority {
    /// Parses a priority from a manifest string.
    ///
    /// Accepts snake_case (`"critical"`) and common aliases (`"p0"`–`"p3"`).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" | "p3" => Some(Self::Low),
            "medium" | "normal" | "p2" => Some(Self::Medium),
            "high" | "p1" => Some(Self::High),
            "critical" | "blocker" | "p0" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Returns a human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata describing a single test file.
///
/// A `TestDescriptor` does not reference test code; it stores the file
/// path (the unique key) and measurements gathered by external tooling.
/// Dependency references may point at paths outside the current selection;
/// those are silently ignored during graph construction.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TestDescriptor {
    /// Unique path of the test file (e.g., `"tests/api/login.test.ts"`).
    pub path: String,
    /// Estimated run duration in milliseconds (from historical data).
    pub estimated_duration_ms: f64,
    /// Paths of test files this test depends on (fixtures, shared setup).
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Paths of test files that depend on this test.
    #[serde(default)]
    pub dependents: Vec<String>,
    /// Flakiness score in `[0, 1]`; 0 = rock solid, 1 = always flaky.
    #[serde(default)]
    pub flakiness_score: f64,
    /// Scheduling priority.
    #[serde(default)]
    pub priority: Priority,
    /// Free-form grouping tags (e.g., `"db"`, `"slow"`).
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TestDescriptor {
    /// Creates a descriptor with only a path and duration; everything else
    /// takes its default.
    pub fn new(path: impl Into<String>, estimated_duration_ms: f64) -> Self {
        Self {
            path: path.into(),
            estimated_duration_ms,
            dependencies: Vec::new(),
            dependents: Vec::new(),
            flakiness_score: 0.0,
            priority: Priority::default(),
            tags: Vec::new(),
        }
    }

    /// Returns all declared dependency and dependent references, in
    /// declaration order (dependencies first).
    pub fn declared_refs(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .chain(self.dependents.iter())
            .map(String::as_str)
    }

    /// Number of declared dependency + dependent references.
    pub fn num_declared_refs(&self) -> usize {
        self.dependencies.len() + self.dependents.len()
    }

    /// Validates the descriptor's measurements.
    ///
    /// # Checks
    /// - `estimated_duration_ms` is finite and non-negative.
    /// - `flakiness_score` lies in `[0, 1]`.
    pub fn validate(&self) -> Result<(), SuiteError> {
        if !self.estimated_duration_ms.is_finite() || self.estimated_duration_ms < 0.0 {
            return Err(SuiteError::InvalidDescriptor {
                path: self.path.clone(),
                detail: format!(
                    "estimated duration must be finite and >= 0, got {}",
                    self.estimated_duration_ms
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.flakiness_score) {
            return Err(SuiteError::InvalidDescriptor {
                path: self.path.clone(),
                detail: format!(
                    "flakiness score must be in [0, 1], got {}",
                    self.flakiness_score
                ),
            });
        }
        Ok(())
    }

    /// Returns a concise summary string for display.
    pub fn summary(&self) -> String {
        format!(
            "{}: {:.0} ms, {} refs, flakiness {:.2}, priority {}",
            self.path,
            self.estimated_duration_ms,
            self.num_declared_refs(),
            self.flakiness_score,
            self.priority,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_test(path: &str) -> TestDescriptor {
        TestDescriptor {
            path: path.into(),
            estimated_duration_ms: 120.0,
            dependencies: vec!["tests/helpers.rs".into()],
            dependents: vec!["tests/integration.rs".into()],
            flakiness_score: 0.1,
            priority: Priority::High,
            tags: vec!["db".into()],
        }
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Critical);
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!(Priority::from_str_loose("critical"), Some(Priority::Critical));
        assert_eq!(Priority::from_str_loose("P0"), Some(Priority::Critical));
        assert_eq!(Priority::from_str_loose("normal"), Some(Priority::Medium));
        assert_eq!(Priority::from_str_loose("p3"), Some(Priority::Low));
        assert_eq!(Priority::from_str_loose("bogus"), None);
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(format!("{}", Priority::Critical), "critical");
        assert_eq!(format!("{}", Priority::Low), "low");
    }

    #[test]
    fn test_declared_refs_order() {
        let t = sample_test("tests/a.rs");
        let refs: Vec<_> = t.declared_refs().collect();
        assert_eq!(refs, vec!["tests/helpers.rs", "tests/integration.rs"]);
        assert_eq!(t.num_declared_refs(), 2);
    }

    #[test]
    fn test_validate_ok() {
        sample_test("tests/a.rs").validate().unwrap();
    }

    #[test]
    fn test_validate_negative_duration() {
        let mut t = sample_test("tests/a.rs");
        t.estimated_duration_ms = -1.0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_validate_flakiness_out_of_range() {
        let mut t = sample_test("tests/a.rs");
        t.flakiness_score = 1.5;
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_summary() {
        let s = sample_test("tests/a.rs").summary();
        assert!(s.contains("tests/a.rs"));
        assert!(s.contains("120 ms"));
        assert!(s.contains("high"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let t = sample_test("tests/a.rs");
        let json = serde_json::to_string(&t).unwrap();
        let back: TestDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_serde_defaults() {
        // A minimal manifest entry: only path and duration.
        let json = r#"{"path": "tests/min.rs", "estimated_duration_ms": 5.0}"#;
        let t: TestDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(t.priority, Priority::Medium);
        assert_eq!(t.flakiness_score, 0.0);
        assert!(t.dependencies.is_empty());
        assert!(t.tags.is_empty());
    }
}
