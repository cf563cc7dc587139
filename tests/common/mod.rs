//! Shared test infrastructure for CLI integration tests.
//!
//! Tests run the real binary against artifacts written into a temp
//! workspace, so the suite exercises the same path a user does: files in,
//! files and summaries out.

// Each test binary uses a subset of these helpers.
#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Temp workspace holding input artifacts, source files, and outputs.
pub struct Workspace {
    dir: TempDir,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp workspace"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a coverage artifact and return its path.
    pub fn write_artifact(&self, name: &str, value: &Value) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, serde_json::to_string_pretty(value).expect("serialize"))
            .expect("write artifact");
        path
    }

    /// Write a source file and return its absolute path as a string, for use
    /// as a coverage-map key.
    pub fn write_source(&self, name: &str, content: &str) -> String {
        let path = self.path(name);
        std::fs::write(&path, content).expect("write source");
        path.to_str().expect("utf-8 path").to_string()
    }

    /// Run covmerge with the given arguments, cwd at the workspace root.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_covmerge"))
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("spawn covmerge")
    }
}

/// Build a coverage-map document with one file whose statements are
/// `(id, line, column, count)` tuples.
pub fn statement_artifact(path: &str, statements: &[(u32, u32, u32, u64)]) -> Value {
    let mut statement_map = serde_json::Map::new();
    let mut s = serde_json::Map::new();
    for &(id, line, column, count) in statements {
        statement_map.insert(
            id.to_string(),
            json!({
                "start": {"line": line, "column": column},
                "end": {"line": line, "column": column + 20}
            }),
        );
        s.insert(id.to_string(), json!(count));
    }
    json!({
        path: {
            "path": path,
            "statementMap": statement_map,
            "s": s,
            "fnMap": {},
            "f": {},
            "branchMap": {},
            "b": {}
        }
    })
}

pub fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "covmerge failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn read_artifact(path: &Path) -> Value {
    let content = std::fs::read_to_string(path).expect("read artifact");
    serde_json::from_str(&content).expect("parse artifact")
}
