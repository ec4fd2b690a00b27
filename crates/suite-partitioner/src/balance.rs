// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Duration-balanced fallback partitioning.
//!
//! Classic longest-processing-time-first (LPT) bin packing: sort tests by
//! estimated duration descending, then repeatedly hand the largest
//! remaining test to the least-loaded bucket. Used when the coupling graph
//! has no edges, when the caller opts out of coupling-aware placement, or
//! when the first min-cut attempt fails outright.
//!
//! LPT is within 4/3 of the optimal makespan, which is more than enough
//! for wall-clock balancing of CI shards.

use suite_model::TestDescriptor;

/// One bucket per worker with its running duration total.
struct Bucket {
    indices: Vec<usize>,
    total_ms: f64,
}

/// Packs `tests` into exactly `k` duration-balanced groups.
///
/// Returns groups of indices into `tests`, bucket order. With `tests.len()
/// >= k` every group is non-empty. Fully deterministic: duration ties keep
/// input order (stable sort), load ties prefer the emptier bucket, then
/// the lower bucket index.
pub(crate) fn pack(tests: &[TestDescriptor], k: usize) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..tests.len()).collect();
    order.sort_by(|&a, &b| {
        tests[b]
            .estimated_duration_ms
            .total_cmp(&tests[a].estimated_duration_ms)
    });

    let mut buckets: Vec<Bucket> = (0..k)
        .map(|_| Bucket {
            indices: Vec::new(),
            total_ms: 0.0,
        })
        .collect();

    for idx in order {
        // k is small (worker counts), so a linear scan beats a heap.
        let mut target = 0;
        for (b, bucket) in buckets.iter().enumerate().skip(1) {
            let best = &buckets[target];
            if bucket.total_ms < best.total_ms
                || (bucket.total_ms == best.total_ms && bucket.indices.len() < best.indices.len())
            {
                target = b;
            }
        }
        buckets[target].total_ms += tests[idx].estimated_duration_ms;
        buckets[target].indices.push(idx);
    }

    buckets.into_iter().map(|b| b.indices).collect()
}
