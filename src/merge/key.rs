//! Match keys for correlating coverage entries across sources.
//!
//! Two tiers: an exact `(line, column)` key, and a line-only fallback for
//! sources that instrument the same logical statement at different columns
//! (common across differing bundling/transform pipelines). The column keeps
//! its `Option` so a `null` column never collides with column 0.

use crate::schema::{BranchDef, FunctionDef, Location};

/// Exact match key: start line plus start column (which may be the null
/// sentinel, distinct from `Some(0)`).
pub type ExactKey = (u32, Option<u32>);

/// Fallback match key: start line only.
pub type LineKey = u32;

pub fn exact_key(loc: &Location) -> ExactKey {
    (loc.start.line, loc.start.column)
}

pub fn line_key(loc: &Location) -> LineKey {
    loc.start.line
}

/// Functions are keyed on the declaration location: the declaration is the
/// stable anchor across transform pipelines, while body spans shift.
pub fn function_key(def: &FunctionDef) -> ExactKey {
    exact_key(&def.decl)
}

/// Branches are keyed on the branch anchor location, not on any single
/// outcome location.
pub fn branch_key(def: &BranchDef) -> ExactKey {
    exact_key(&def.loc)
}
