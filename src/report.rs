//! Category summaries derived from a coverage map.
//!
//! Four categories: statements, branches, functions, and lines. Lines are
//! not stored in the artifact; they are derived from statements as the
//! per-line running maximum of statement counts.

use crate::schema::{CoverageMap, FileCoverage};
use serde::Serialize;
use std::collections::BTreeMap;

/// Covered/total/percentage for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub covered: usize,
    pub total: usize,
    pub pct: f64,
}

impl Totals {
    fn new(covered: usize, total: usize) -> Self {
        Self {
            covered,
            total,
            pct: pct(covered, total),
        }
    }

    fn absorb(&mut self, other: Totals) {
        self.covered += other.covered;
        self.total += other.total;
        self.pct = pct(self.covered, self.total);
    }
}

/// Percentage with the undefined-category convention: an empty category is
/// fully covered.
fn pct(covered: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        covered as f64 * 100.0 / total as f64
    }
}

/// The four category summaries for a file or a whole map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CoverageSummary {
    pub statements: Totals,
    pub branches: Totals,
    pub functions: Totals,
    pub lines: Totals,
}

impl CoverageSummary {
    fn absorb(&mut self, other: &CoverageSummary) {
        self.statements.absorb(other.statements);
        self.branches.absorb(other.branches);
        self.functions.absorb(other.functions);
        self.lines.absorb(other.lines);
    }
}

/// Summarize one file coverage record.
pub fn summarize_file(record: &FileCoverage) -> CoverageSummary {
    let statement_total = record.statement_map.len();
    let statement_covered = record.s.values().filter(|&&count| count > 0).count();

    // Every declared outcome slot is one branch; covered slots are nonzero.
    let mut branch_total = 0;
    let mut branch_covered = 0;
    for (id, def) in &record.branch_map {
        match record.b.get(id) {
            Some(counts) => {
                branch_total += counts.len();
                branch_covered += counts.iter().filter(|&&count| count > 0).count();
            }
            None => branch_total += def.locations.len(),
        }
    }

    let function_total = record.fn_map.len();
    let function_covered = record.f.values().filter(|&&count| count > 0).count();

    let lines = line_counts(record);
    let line_total = lines.len();
    let line_covered = lines.values().filter(|&&count| count > 0).count();

    CoverageSummary {
        statements: Totals::new(statement_covered, statement_total),
        branches: Totals::new(branch_covered, branch_total),
        functions: Totals::new(function_covered, function_total),
        lines: Totals::new(line_covered, line_total),
    }
}

/// Summarize a whole coverage map.
pub fn summarize(map: &CoverageMap) -> CoverageSummary {
    let mut summary = CoverageSummary::default();
    for record in map.values() {
        summary.absorb(&summarize_file(record));
    }
    summary
}

/// Per-line execution counts for one record: the maximum statement count
/// observed on each instrumented line.
pub fn line_counts(record: &FileCoverage) -> BTreeMap<u32, u64> {
    let mut lines = BTreeMap::new();
    for (id, loc) in &record.statement_map {
        let count = record.s.get(id).copied().unwrap_or(0);
        let entry = lines.entry(loc.start.line).or_insert(0);
        *entry = (*entry).max(count);
    }
    lines
}

/// Lines with no executed statement, in ascending order. Feeds the
/// "Uncovered Lines" report column.
pub fn uncovered_lines(record: &FileCoverage) -> Vec<u32> {
    line_counts(record)
        .into_iter()
        .filter_map(|(line, count)| (count == 0).then_some(line))
        .collect()
}
