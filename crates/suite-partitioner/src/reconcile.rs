// Copyright (c) 2025 Suite Partitioner Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Partition-count reconciliation.
//!
//! Recursive bisection may finish with more or fewer groups than the
//! configured count (early termination, unsplittable 2-test groups,
//! degraded oracle calls). This step enforces the exact count:
//!
//! - Too few: split the largest group evenly in half by position, which is cheap
//!   and deterministic: re-running the cut solver here is not worth it.
//! - Too many: merge the two smallest groups until the count matches.
//!
//! Never drops or duplicates a test.

/// Adjusts `groups` (index lists) to contain exactly `k` entries.
///
/// If the largest group has a single test and more splits are still
/// needed, the result stays undersized; the caller logs and accepts it.
pub(crate) fn enforce_count(mut groups: Vec<Vec<usize>>, k: usize) -> Vec<Vec<usize>> {
    while groups.len() < k {
        let largest = match groups
            .iter()
            .enumerate()
            .max_by(|(ai, a), (bi, b)| a.len().cmp(&b.len()).then(bi.cmp(ai)))
        {
            Some((i, g)) if g.len() > 1 => i,
            _ => {
                tracing::warn!(
                    have = groups.len(),
                    want = k,
                    "cannot split single-test partitions further; accepting undersized result"
                );
                break;
            }
        };

        let old = std::mem::take(&mut groups[largest]);
        let mid = old.len().div_ceil(2);
        let (front, back) = old.split_at(mid);
        groups[largest] = front.to_vec();
        groups.push(back.to_vec());
    }

    while groups.len() > k {
        // Two smallest by length; ties prefer the earlier group.
        let (mut first, mut second) = (0, 1);
        if groups[second].len() < groups[first].len() {
            std::mem::swap(&mut first, &mut second);
        }
        for i in 2..groups.len() {
            if groups[i].len() < groups[first].len() {
                second = first;
                first = i;
            } else if groups[i].len() < groups[second].len() {
                second = i;
            }
        }
        // Merge the later of the two into the earlier to keep order stable.
        let (keep, remove) = (first.min(second), first.max(second));
        let absorbed = groups.remove(remove);
        groups[keep].extend(absorbed);
    }

    groups
}
