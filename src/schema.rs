//! Schema types for coverage artifacts.
//!
//! These mirror the on-disk coverage-map document: one entry per absolute
//! file path, each holding statement/function/branch location maps and their
//! execution counts. Ids are meaningful only within one record; matching
//! entries across records is always re-derived from locations, never from
//! ids.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One coverage-map document: absolute file path -> per-file record.
///
/// `BTreeMap` keeps file iteration deterministic. Ordering among *sources*
/// (whole maps) is carried separately as the order of the input list.
pub type CoverageMap = BTreeMap<String, FileCoverage>;

/// A point in a source file. `column: None` is the artifact's `null`
/// sentinel and is distinct from `Some(0)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: Option<u32>,
}

/// A source range. Only `start` participates in merge matching; `end` is
/// carried for artifact fidelity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

/// A declared function: where it is declared and the span of its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDef {
    #[serde(default)]
    pub name: String,
    pub decl: Location,
    pub loc: Location,
}

/// A declared branch: its anchor location and one location per outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchDef {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub loc: Location,
    pub locations: Vec<Location>,
}

/// Coverage for one instrumented file.
///
/// Count map domains are subsets of the corresponding location map ids. The
/// artifact stores ids as stringified integers; serde_json round-trips them
/// as `u32` keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCoverage {
    pub path: String,
    #[serde(rename = "statementMap")]
    pub statement_map: BTreeMap<u32, Location>,
    pub s: BTreeMap<u32, u64>,
    #[serde(rename = "fnMap")]
    pub fn_map: BTreeMap<u32, FunctionDef>,
    pub f: BTreeMap<u32, u64>,
    #[serde(rename = "branchMap")]
    pub branch_map: BTreeMap<u32, BranchDef>,
    pub b: BTreeMap<u32, Vec<u64>>,
}

impl FileCoverage {
    /// Empty record for a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            statement_map: BTreeMap::new(),
            s: BTreeMap::new(),
            fn_map: BTreeMap::new(),
            f: BTreeMap::new(),
            branch_map: BTreeMap::new(),
            b: BTreeMap::new(),
        }
    }

    /// Total declared items (statements + branches + functions), counted
    /// regardless of execution counts.
    pub fn declared_items(&self) -> usize {
        self.statement_map.len() + self.branch_map.len() + self.fn_map.len()
    }
}
