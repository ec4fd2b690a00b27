// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # suite-model
//!
//! A lightweight data model for test suites and their dependency structure.
//!
//! Rather than depending on a particular test framework, this crate defines
//! the minimal representation the partitioning engine needs:
//!
//! - [`Priority`]: how important a test is (ordered, `low` → `critical`).
//! - [`TestDescriptor`]: a single test file's metadata: estimated duration,
//!   declared dependencies/dependents, flakiness, priority, tags.
//! - [`SuiteGraph`]: the suite as a weighted, undirected coupling graph,
//!   built deterministically by [`GraphBuilder`].
//! - [`SuiteManifest`]: loads descriptors from a JSON manifest produced by
//!   an external discovery/measurement tool.
//!
//! # Supported Manifest Format
//! A suite is stored as a single JSON document:
//! - `suite.json`: suite name plus one entry per test file with its
//!   measured duration, static dependency references, and flakiness score.
//!
//! # Example
//! ```no_run
//! use suite_model::SuiteManifest;
//! use std::path::Path;
//!
//! let manifest = SuiteManifest::from_file(Path::new("./suite.json")).unwrap();
//! for test in &manifest.tests {
//!     println!("  {}", test.summary());
//! }
//! ```

mod descriptor;
mod error;
pub mod graph;
mod manifest;

pub use descriptor::{Priority, TestDescriptor};
pub use error::SuiteError;
pub use graph::{GraphBuilder, GraphEdge, GraphNode, SuiteGraph};
pub use manifest::SuiteManifest;
