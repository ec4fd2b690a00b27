// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: Partition a synthetic suite and compare strategies.
//!
//! Builds a suite of dependency clusters, partitions it with the
//! coupling-aware min-cut path and with plain duration balancing, and
//! prints the quality numbers side by side.
//!
//! ```bash
//! cargo run -p suite-partitioner --example partition_report
//! ```

use anyhow::Result;
use suite_model::TestDescriptor;
use suite_partitioner::{PartitionConfig, PartitionResult, SuitePartitioner};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Four clusters of integration tests sharing fixtures, plus a tail of
    // independent unit tests.
    let tests = build_suite(4, 6, 12);
    println!(
        "Suite: {} tests, {:.0} ms serial\n",
        tests.len(),
        tests.iter().map(|t| t.estimated_duration_ms).sum::<f64>()
    );

    let workers = 4;
    let mincut = SuitePartitioner::new(PartitionConfig::for_workers(workers));
    let balanced = SuitePartitioner::new(PartitionConfig {
        keep_related_together: false,
        ..PartitionConfig::for_workers(workers)
    });

    let results = [
        ("coupling-aware", mincut.partition(&tests)?),
        ("duration-only", balanced.partition(&tests)?),
    ];

    println!(
        "{:<16} {:>10} {:>12} {:>10} {:>10}",
        "Strategy", "Algorithm", "Cross-deps", "Balance", "Speedup",
    );
    println!("{}", "-".repeat(62));
    for (label, result) in &results {
        println!(
            "{:<16} {:>10} {:>12} {:>10.3} {:>9.2}x",
            label,
            result.algorithm.as_str(),
            result.total_cross_partition_deps,
            result.load_balance_score,
            result.estimated_speedup,
        );
    }

    println!("\n--- Worker assignments (coupling-aware) ---\n");
    print_assignments(&results[0].1);

    // Emit the machine-readable artifact a CI orchestrator would consume.
    println!("\n--- JSON artifact ---\n");
    println!("{}", serde_json::to_string_pretty(&results[0].1)?);

    Ok(())
}

fn print_assignments(result: &PartitionResult) {
    for partition in &result.partitions {
        println!(
            "{}: {} tests, {:.0} ms, {} crossing deps",
            partition.id,
            partition.tests.len(),
            partition.estimated_duration_ms,
            partition.cross_partition_deps,
        );
        for test in &partition.tests {
            println!("    {test}");
        }
    }
}

/// `clusters` chained clusters of `per_cluster` tests plus `loose`
/// independent tests with varied durations.
fn build_suite(clusters: usize, per_cluster: usize, loose: usize) -> Vec<TestDescriptor> {
    let mut tests = Vec::new();
    for c in 0..clusters {
        for i in 0..per_cluster {
            let mut t = TestDescriptor::new(
                format!("tests/cluster{c}/case{i}.rs"),
                40.0 + (i as f64) * 15.0,
            );
            t.tags = vec![format!("fixture-{c}")];
            if i > 0 {
                t.dependencies
                    .push(format!("tests/cluster{c}/case{}.rs", i - 1));
            }
            tests.push(t);
        }
    }
    for i in 0..loose {
        tests.push(TestDescriptor::new(
            format!("tests/unit/u{i}.rs"),
            5.0 + (i % 5) as f64 * 8.0,
        ));
    }
    tests
}
