//! Structural merge of coverage maps from multiple runtime environments.
//!
//! Input order is part of the contract: it is the "original source index"
//! used by baseline tie-breaks and by the write-once branch line fallback,
//! so sources travel as an ordered sequence end to end. Files are
//! independent of each other and merge in path order.

use crate::normalize::{self, NormalizeStats, SourceReader};
use crate::report::{self, CoverageSummary};
use crate::schema::{CoverageMap, FileCoverage};
use std::collections::BTreeSet;

mod file;
mod index;
mod key;
mod select;

pub use file::merge_file;
pub use index::FileIndex;
pub use key::{branch_key, exact_key, function_key, line_key, ExactKey, LineKey};
pub use select::select_baseline;

/// Result of the merge entry point: the merged map, its category summaries,
/// and the normalization rollup when normalization ran.
#[derive(Debug)]
pub struct MergeOutcome {
    pub merged: CoverageMap,
    pub summary: CoverageSummary,
    pub normalized: Option<NormalizeStats>,
}

/// Merge entry point: optionally normalize each input map in place, merge
/// them in order, and summarize the result.
///
/// Inputs are owned because normalization deletes statement entries; callers
/// that need the originals pass clones.
pub fn merge_reports(
    mut maps: Vec<CoverageMap>,
    normalize: bool,
    sources: &dyn SourceReader,
) -> MergeOutcome {
    let normalized = normalize.then(|| {
        let mut stats = NormalizeStats::default();
        for map in &mut maps {
            stats.absorb(normalize::normalize_map(map, sources));
        }
        stats
    });

    let merged = merge_maps(&maps);
    let summary = report::summarize(&merged);
    tracing::info!(
        inputs = maps.len(),
        files = merged.len(),
        "merged coverage maps"
    );

    MergeOutcome {
        merged,
        summary,
        normalized,
    }
}

/// Merge an ordered list of coverage maps into one.
///
/// Zero maps yield an empty map; a single map is deep-copied with no merge
/// logic. Otherwise file paths are unioned across inputs and each file is
/// merged from the ordered subset of maps that contain it - maps lacking a
/// file are excluded, never treated as contributing all-zero counts.
pub fn merge_maps(maps: &[CoverageMap]) -> CoverageMap {
    match maps {
        [] => CoverageMap::new(),
        [only] => only.clone(),
        _ => {
            let paths: BTreeSet<&str> = maps
                .iter()
                .flat_map(|map| map.keys().map(String::as_str))
                .collect();

            let mut merged = CoverageMap::new();
            for path in paths {
                let records: Vec<&FileCoverage> =
                    maps.iter().filter_map(|map| map.get(path)).collect();
                merged.insert(path.to_string(), merge_records(path, &records));
            }
            merged
        }
    }
}

fn merge_records(path: &str, records: &[&FileCoverage]) -> FileCoverage {
    match records {
        // A file present in a single source is copied verbatim; no shape
        // selection runs.
        [only] => (*only).clone(),
        _ => {
            let indexes: Vec<FileIndex> = records
                .iter()
                .map(|record| FileIndex::build(record))
                .collect();
            let baseline = records[select_baseline(records)];
            tracing::debug!(path, sources = records.len(), "merging file");
            merge_file(baseline, &indexes)
        }
    }
}
