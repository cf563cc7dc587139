//! Pseudo-statement removal using original source text.
//!
//! Runtime environments disagree on whether module-load lines count as
//! executable statements. Before merging, each input map can be normalized:
//! statement entries whose source line is an import or a recognized
//! directive literal are deleted in place. The caller owns the map and opts
//! into the mutation; source text is read best-effort and an unreadable file
//! leaves its record untouched.

use crate::schema::CoverageMap;
use serde::Serialize;
use std::path::Path;

/// Directive literals stripped during normalization: two directive strings,
/// each in two quote styles, each with or without a trailing terminator.
const DIRECTIVE_LITERALS: [&str; 8] = [
    "'use client'",
    "'use client';",
    "\"use client\"",
    "\"use client\";",
    "'use server'",
    "'use server';",
    "\"use server\"",
    "\"use server\";",
];

/// Provides source text for files named in a coverage map. `None` covers
/// every kind of unavailability - missing file, unreadable file, non-text
/// content - which normalization treats as "skip, no error".
pub trait SourceReader {
    fn read(&self, path: &str) -> Option<String>;
}

/// Reads source text straight from the filesystem.
pub struct FsSourceReader;

impl SourceReader for FsSourceReader {
    fn read(&self, path: &str) -> Option<String> {
        if !Path::new(path).exists() {
            return None;
        }
        std::fs::read_to_string(path).ok()
    }
}

/// Removal counts aggregated across one normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub imports_removed: usize,
    pub directives_removed: usize,
}

impl NormalizeStats {
    pub fn absorb(&mut self, other: NormalizeStats) {
        self.imports_removed += other.imports_removed;
        self.directives_removed += other.directives_removed;
    }
}

/// Delete import/directive statement entries from every record of `map`,
/// mutating it in place. Function and branch maps are never touched.
pub fn normalize_map(map: &mut CoverageMap, sources: &dyn SourceReader) -> NormalizeStats {
    let mut stats = NormalizeStats::default();

    for record in map.values_mut() {
        let Some(text) = sources.read(&record.path) else {
            tracing::debug!(path = %record.path, "source unavailable, skipping");
            continue;
        };
        let lines: Vec<&str> = text.lines().collect();

        let doomed: Vec<(u32, LineClass)> = record
            .statement_map
            .iter()
            .filter_map(|(id, loc)| {
                let line = lines.get((loc.start.line as usize).checked_sub(1)?)?;
                classify_line(line).map(|class| (*id, class))
            })
            .collect();

        for (id, class) in doomed {
            record.statement_map.remove(&id);
            record.s.remove(&id);
            match class {
                LineClass::Import => stats.imports_removed += 1,
                LineClass::Directive => stats.directives_removed += 1,
            }
        }
    }

    if stats != NormalizeStats::default() {
        tracing::debug!(
            imports = stats.imports_removed,
            directives = stats.directives_removed,
            "normalized coverage map"
        );
    }
    stats
}

#[derive(Debug, Clone, Copy)]
enum LineClass {
    Import,
    Directive,
}

fn classify_line(line: &str) -> Option<LineClass> {
    let trimmed = line.trim();
    if is_import_line(trimmed) {
        return Some(LineClass::Import);
    }
    if DIRECTIVE_LITERALS.contains(&trimmed) {
        return Some(LineClass::Directive);
    }
    None
}

/// The `import` keyword token, followed immediately by whitespace or an
/// opening brace (no space required before the brace).
fn is_import_line(trimmed: &str) -> bool {
    trimmed
        .strip_prefix("import")
        .is_some_and(|rest| rest.starts_with(char::is_whitespace) || rest.starts_with('{'))
}
