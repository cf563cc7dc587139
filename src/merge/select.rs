//! Baseline shape selection among per-source records for one file.
//!
//! Selection decides shape only (ids, locations, branch arity) - every
//! candidate's counts are folded in afterwards regardless of which record
//! was selected. Callers are expected to order more-trustworthy sources
//! last; ties among pseudo-statement-free candidates resolve to the later
//! source.

use crate::schema::FileCoverage;

/// Pick the record whose shape structures the merged output. Returns an
/// index into `candidates`, which must be non-empty and in original source
/// order.
pub fn select_baseline(candidates: &[&FileCoverage]) -> usize {
    let remaining: Vec<usize> = (0..candidates.len())
        .filter(|&i| candidates[i].declared_items() > 0)
        .collect();

    // Degenerate: every candidate declares nothing. Upstream avoids passing
    // empty records; fall back to the first.
    let [first, rest @ ..] = remaining.as_slice() else {
        return 0;
    };
    if rest.is_empty() {
        return *first;
    }

    // Sources whose first statement is an environment-injected line-1 entry
    // lose to sources without one; among the clean ones the later source
    // wins.
    if let Some(&index) = remaining
        .iter()
        .filter(|&&i| !has_leading_pseudo_statement(candidates[i]))
        .last()
    {
        return index;
    }

    // Every remaining candidate carries the pseudo-statement: take the one
    // declaring the fewest items (first such on ties).
    remaining
        .into_iter()
        .min_by_key(|&i| candidates[i].declared_items())
        .unwrap_or(0)
}

/// A statement entry starting at line 1, column 0 or column-null, is a proxy
/// for an environment-injected leading statement (e.g. a module-load line).
fn has_leading_pseudo_statement(record: &FileCoverage) -> bool {
    record
        .statement_map
        .values()
        .any(|loc| loc.start.line == 1 && matches!(loc.start.column, None | Some(0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Location, Position};

    fn loc(line: u32, column: Option<u32>) -> Location {
        Location {
            start: Position { line, column },
            end: Position { line, column },
        }
    }

    /// Record with `count` plain statements starting at line 10.
    fn plain_record(statements: u32) -> FileCoverage {
        let mut record = FileCoverage::new("/src/app.js");
        for id in 0..statements {
            record.statement_map.insert(id, loc(10 + id, Some(0)));
            record.s.insert(id, 0);
        }
        record
    }

    fn with_leading_pseudo(mut record: FileCoverage, column: Option<u32>) -> FileCoverage {
        let next_id = record.statement_map.len() as u32;
        record.statement_map.insert(next_id, loc(1, column));
        record.s.insert(next_id, 1);
        record
    }

    #[test]
    fn empty_candidates_lose_to_declared_ones() {
        let empty = plain_record(0);
        let full = plain_record(3);
        assert_eq!(select_baseline(&[&empty, &full]), 1);
        assert_eq!(select_baseline(&[&full, &empty]), 0);
    }

    #[test]
    fn all_empty_falls_back_to_first() {
        let a = plain_record(0);
        let b = plain_record(0);
        assert_eq!(select_baseline(&[&a, &b]), 0);
    }

    #[test]
    fn pseudo_statement_candidate_loses() {
        let with_pseudo = with_leading_pseudo(plain_record(3), Some(0));
        let without = plain_record(3);
        assert_eq!(select_baseline(&[&with_pseudo, &without]), 1);
        assert_eq!(select_baseline(&[&without, &with_pseudo]), 0);
    }

    #[test]
    fn null_column_counts_as_pseudo_statement() {
        let with_pseudo = with_leading_pseudo(plain_record(3), None);
        let without = plain_record(3);
        assert_eq!(select_baseline(&[&with_pseudo, &without]), 1);
    }

    #[test]
    fn line_one_nonzero_column_is_not_a_pseudo_statement() {
        let mut shifted = plain_record(2);
        shifted.statement_map.insert(9, loc(1, Some(13)));
        shifted.s.insert(9, 1);
        let other = plain_record(3);
        // Both are clean, so the later source wins.
        assert_eq!(select_baseline(&[&shifted, &other]), 1);
    }

    #[test]
    fn later_clean_source_wins_ties() {
        let a = plain_record(2);
        let b = plain_record(4);
        let c = plain_record(3);
        assert_eq!(select_baseline(&[&a, &b, &c]), 2);
    }

    #[test]
    fn all_pseudo_picks_fewest_items() {
        let small = with_leading_pseudo(plain_record(1), Some(0));
        let large = with_leading_pseudo(plain_record(5), Some(0));
        assert_eq!(select_baseline(&[&large, &small]), 1);
        assert_eq!(select_baseline(&[&small, &large]), 0);
    }

    #[test]
    fn single_survivor_wins_regardless_of_pseudo_statement() {
        let only = with_leading_pseudo(plain_record(2), Some(0));
        let empty = plain_record(0);
        assert_eq!(select_baseline(&[&only, &empty]), 0);
    }
}
