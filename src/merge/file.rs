//! Per-file merge: baseline shape plus maximum counts from every source.
//!
//! The merged record keeps the baseline's ids, locations, and branch arity.
//! Counts are running maxima seeded with the baseline's own counts, so a
//! merge can never decrease a count already present in the baseline.

use super::index::FileIndex;
use super::key::{branch_key, exact_key, function_key};
use crate::schema::FileCoverage;

/// Merge one file: deep-copy `baseline` and overlay the maximum count found
/// in any source's lookup index (exact key first, line fallback second).
///
/// `indexes` covers every source containing the file, baseline included, in
/// original source order.
pub fn merge_file(baseline: &FileCoverage, indexes: &[FileIndex]) -> FileCoverage {
    let mut merged = baseline.clone();

    for (id, loc) in &merged.statement_map {
        let key = exact_key(loc);
        let mut max = merged.s.get(id).copied().unwrap_or(0);
        for index in indexes {
            if let Some(count) = index.statement_count(key) {
                max = max.max(count);
            }
        }
        merged.s.insert(*id, max);
    }

    for (id, def) in &merged.fn_map {
        let key = function_key(def);
        let mut max = merged.f.get(id).copied().unwrap_or(0);
        for index in indexes {
            if let Some(count) = index.function_count(key) {
                max = max.max(count);
            }
        }
        merged.f.insert(*id, max);
    }

    for (id, def) in &merged.branch_map {
        let key = branch_key(def);
        // No baseline array means no declared arity to merge into.
        let Some(running) = merged.b.get_mut(id) else {
            continue;
        };
        for index in indexes {
            let Some(counts) = index.branch_counts(key) else {
                continue;
            };
            // Index-paired maximum over the baseline's arity; a shorter
            // contributing array reads as 0 at its missing trailing indices
            // and never lowers a running count.
            for (slot, running_count) in running.iter_mut().enumerate() {
                let count = counts.get(slot).copied().unwrap_or(0);
                *running_count = (*running_count).max(count);
            }
        }
    }

    merged
}
