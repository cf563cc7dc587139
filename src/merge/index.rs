//! Per-source lookup index over one file's coverage record.
//!
//! The index only holds entries with a nonzero recorded count: a source that
//! never executed a location contributes nothing and must not suppress
//! another source's nonzero count. Lookups resolve exact key first, then the
//! line fallback, so the two-tier order is auditable in one place.

use super::key::{branch_key, exact_key, function_key, line_key, ExactKey, LineKey};
use crate::schema::FileCoverage;
use std::collections::HashMap;

/// Ephemeral lookup index for one file coverage record. Rebuilt per merge
/// invocation and discarded afterwards.
#[derive(Debug, Default)]
pub struct FileIndex {
    stmt_exact: HashMap<ExactKey, u64>,
    stmt_line: HashMap<LineKey, u64>,
    fn_exact: HashMap<ExactKey, u64>,
    fn_line: HashMap<LineKey, u64>,
    branch_exact: HashMap<ExactKey, Vec<u64>>,
    branch_line: HashMap<LineKey, Vec<u64>>,
}

impl FileIndex {
    /// Index every statement, function, and branch entry of `record` that
    /// has at least one nonzero count.
    pub fn build(record: &FileCoverage) -> Self {
        let mut index = Self::default();

        for (id, loc) in &record.statement_map {
            let count = record.s.get(id).copied().unwrap_or(0);
            if count == 0 {
                continue;
            }
            index.stmt_exact.insert(exact_key(loc), count);
            let line = index.stmt_line.entry(line_key(loc)).or_insert(0);
            *line = (*line).max(count);
        }

        for (id, def) in &record.fn_map {
            let count = record.f.get(id).copied().unwrap_or(0);
            if count == 0 {
                continue;
            }
            index.fn_exact.insert(function_key(def), count);
            let line = index.fn_line.entry(line_key(&def.decl)).or_insert(0);
            *line = (*line).max(count);
        }

        for (id, def) in &record.branch_map {
            let Some(counts) = record.b.get(id) else {
                continue;
            };
            if counts.iter().all(|&count| count == 0) {
                continue;
            }
            index.branch_exact.insert(branch_key(def), counts.clone());
            // First writer wins on the line fallback: it only bridges small
            // column drift, never aggregates unrelated branches on one line.
            index
                .branch_line
                .entry(line_key(&def.loc))
                .or_insert_with(|| counts.clone());
        }

        index
    }

    /// Statement count at `key`, exact match first, line fallback second.
    pub fn statement_count(&self, key: ExactKey) -> Option<u64> {
        self.stmt_exact
            .get(&key)
            .or_else(|| self.stmt_line.get(&key.0))
            .copied()
    }

    /// Function count at `key`, exact match first, line fallback second.
    pub fn function_count(&self, key: ExactKey) -> Option<u64> {
        self.fn_exact
            .get(&key)
            .or_else(|| self.fn_line.get(&key.0))
            .copied()
    }

    /// Branch outcome counts at `key`, exact match first, line fallback
    /// second.
    pub fn branch_counts(&self, key: ExactKey) -> Option<&[u64]> {
        self.branch_exact
            .get(&key)
            .or_else(|| self.branch_line.get(&key.0))
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BranchDef, Location, Position};

    fn loc(line: u32, column: Option<u32>) -> Location {
        Location {
            start: Position { line, column },
            end: Position {
                line,
                column: column.map(|c| c + 10),
            },
        }
    }

    fn record_with_statements(entries: &[(u32, u32, Option<u32>, u64)]) -> FileCoverage {
        let mut record = FileCoverage::new("/src/lib.js");
        for &(id, line, column, count) in entries {
            record.statement_map.insert(id, loc(line, column));
            record.s.insert(id, count);
        }
        record
    }

    #[test]
    fn zero_count_statements_are_excluded() {
        let record = record_with_statements(&[(0, 1, Some(0), 0), (1, 2, Some(0), 3)]);
        let index = FileIndex::build(&record);
        assert_eq!(index.statement_count((1, Some(0))), None);
        assert_eq!(index.statement_count((2, Some(0))), Some(3));
    }

    #[test]
    fn line_fallback_keeps_max_statement_count() {
        let record =
            record_with_statements(&[(0, 5, Some(0), 2), (1, 5, Some(8), 9), (2, 5, Some(16), 4)]);
        let index = FileIndex::build(&record);
        // No exact entry at this column; the line fallback answers with the
        // line maximum.
        assert_eq!(index.statement_count((5, Some(99))), Some(9));
    }

    #[test]
    fn exact_match_wins_over_line_fallback() {
        let record = record_with_statements(&[(0, 5, Some(0), 2), (1, 5, Some(8), 9)]);
        let index = FileIndex::build(&record);
        assert_eq!(index.statement_count((5, Some(0))), Some(2));
    }

    #[test]
    fn null_column_entry_is_exact_only_under_its_own_key() {
        let record = record_with_statements(&[(0, 9, None, 7)]);
        let index = FileIndex::build(&record);
        assert_eq!(index.statement_count((9, Some(0))), Some(7)); // line fallback
        assert_eq!(index.statement_count((9, None)), Some(7)); // exact
    }

    #[test]
    fn branch_line_fallback_is_first_writer_wins() {
        let mut record = FileCoverage::new("/src/lib.js");
        for (id, column, counts) in [(0u32, 4u32, vec![1, 0]), (1u32, 20u32, vec![0, 8])] {
            record.branch_map.insert(
                id,
                BranchDef {
                    kind: "if".to_string(),
                    loc: loc(3, Some(column)),
                    locations: vec![loc(3, Some(column)), loc(3, Some(column + 2))],
                },
            );
            record.b.insert(id, counts);
        }
        let index = FileIndex::build(&record);
        // Exact lookups see their own arrays.
        assert_eq!(index.branch_counts((3, Some(4))), Some(&[1, 0][..]));
        assert_eq!(index.branch_counts((3, Some(20))), Some(&[0, 8][..]));
        // The line fallback kept the first insertion only.
        assert_eq!(index.branch_counts((3, Some(99))), Some(&[1, 0][..]));
    }

    #[test]
    fn all_zero_branch_arrays_are_excluded() {
        let mut record = FileCoverage::new("/src/lib.js");
        record.branch_map.insert(
            0,
            BranchDef {
                kind: "if".to_string(),
                loc: loc(2, Some(0)),
                locations: vec![loc(2, Some(0)), loc(2, Some(5))],
            },
        );
        record.b.insert(0, vec![0, 0]);
        let index = FileIndex::build(&record);
        assert_eq!(index.branch_counts((2, Some(0))), None);
    }

    #[test]
    fn functions_index_on_declaration_line() {
        let mut record = FileCoverage::new("/src/lib.js");
        record.fn_map.insert(
            0,
            crate::schema::FunctionDef {
                name: "go".to_string(),
                decl: loc(11, Some(9)),
                loc: loc(12, Some(0)),
            },
        );
        record.f.insert(0, 5);
        let index = FileIndex::build(&record);
        assert_eq!(index.function_count((11, Some(9))), Some(5));
        assert_eq!(index.function_count((11, Some(30))), Some(5)); // line fallback
        assert_eq!(index.function_count((12, Some(0))), None);
    }
}
