// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Coupling-aware test suite partitioning for parallel CI execution.
//!
//! Splits a test suite into a fixed number of balanced partitions while
//! keeping tightly coupled tests on the same worker. Coupling comes from
//! the weighted dependency graph built by [`suite_model`]; the split is
//! found by recursive bisection with a minimum-cut solver, falling back to
//! duration-balanced bin packing when the graph carries no signal or the
//! solver runs out of budget.
//!
//! # Example
//!
//! ```
//! use suite_model::TestDescriptor;
//! use suite_partitioner::{PartitionConfig, SuitePartitioner};
//!
//! let mut tests = vec![
//!     TestDescriptor::new("tests/login.rs", 120.0),
//!     TestDescriptor::new("tests/checkout.rs", 80.0),
//!     TestDescriptor::new("tests/search.rs", 200.0),
//!     TestDescriptor::new("tests/profile.rs", 150.0),
//! ];
//! tests[1].dependencies.push("tests/login.rs".into());
//!
//! let engine = SuitePartitioner::new(PartitionConfig::for_workers(2));
//! let result = engine.partition(&tests).unwrap();
//! assert_eq!(result.partitions.len(), 2);
//! println!("{}", result.summary());
//! ```
//!
//! # Modules
//!
//! | Module    | Responsibility                                  |
//! |-----------|-------------------------------------------------|
//! | `config`  | TOML-loadable run configuration                 |
//! | `engine`  | Pipeline orchestration and result assembly      |
//! | `oracle`  | Min-cut solver seam plus the Stoer-Wagner impl  |
//! | `bisect`  | Recursive bisection over the coupling graph     |
//! | `balance` | LPT duration-balanced fallback                  |
//! | `quality` | Post-hoc partition quality metrics              |

mod balance;
mod bisect;
mod config;
mod engine;
mod error;
pub mod oracle;
mod quality;
mod reconcile;
mod result;

pub use config::PartitionConfig;
pub use engine::SuitePartitioner;
pub use error::{OracleError, PartitionError};
pub use oracle::{MinCut, MinCutOracle, StoerWagner};
pub use quality::QualityReport;
pub use result::{Algorithm, PartitionResult, TestPartition};

/// Partitions `tests` across `workers` CI workers with default settings.
///
/// Convenience wrapper over [`SuitePartitioner`] for callers that do not
/// need to tune the configuration.
pub fn partition_suite(
    tests: &[suite_model::TestDescriptor],
    workers: usize,
) -> Result<PartitionResult, PartitionError> {
    SuitePartitioner::new(PartitionConfig::for_workers(workers)).partition(tests)
}
