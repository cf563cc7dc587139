//! Coverage artifact I/O.
//!
//! The artifact is a JSON coverage-map document. Malformed content is fatal
//! for the whole merge; a missing artifact is skipped so one absent
//! environment does not sink the rest of the run.

use crate::schema::CoverageMap;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Read and parse one coverage-map document.
pub fn read_coverage_map(path: &Path) -> Result<CoverageMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read coverage artifact {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parse coverage artifact {}", path.display()))
}

/// Write one coverage-map document, pretty-printed.
pub fn write_coverage_map(path: &Path, map: &CoverageMap) -> Result<()> {
    let json = serde_json::to_string_pretty(map).context("serialize merged coverage")?;
    std::fs::write(path, json)
        .with_context(|| format!("write coverage artifact {}", path.display()))?;
    Ok(())
}

/// Load the requested artifacts in order. Missing files are skipped with a
/// warning; files that exist but fail to parse abort the run. Errors when
/// nothing could be loaded - merging zero sources would only produce a
/// vacuous summary.
pub fn load_coverage_inputs(paths: &[PathBuf]) -> Result<Vec<CoverageMap>> {
    let mut maps = Vec::with_capacity(paths.len());
    for path in paths {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "coverage artifact missing, skipping");
            continue;
        }
        maps.push(read_coverage_map(path)?);
    }
    if maps.is_empty() && !paths.is_empty() {
        return Err(anyhow!("none of the requested coverage artifacts exist"));
    }
    Ok(maps)
}
