//! Deterministic text rendering for coverage summaries.
//!
//! Two formats: a per-file table with an all-files totals row, and a
//! four-line totals block. Plain text only; stdout stays pipe-friendly.

use crate::report::{self, CoverageSummary};
use crate::schema::CoverageMap;

const TABLE_HEADERS: [&str; 6] = [
    "File",
    "% Stmts",
    "% Branch",
    "% Funcs",
    "% Lines",
    "Uncovered Lines",
];

/// Render the per-file coverage table.
pub fn text_table(map: &CoverageMap) -> String {
    let mut rows: Vec<[String; 6]> = Vec::with_capacity(map.len() + 1);
    for (path, record) in map {
        let summary = report::summarize_file(record);
        rows.push([
            path.clone(),
            format_pct(summary.statements.pct),
            format_pct(summary.branches.pct),
            format_pct(summary.functions.pct),
            format_pct(summary.lines.pct),
            format_line_list(&report::uncovered_lines(record)),
        ]);
    }
    let totals = report::summarize(map);
    rows.push([
        "All files".to_string(),
        format_pct(totals.statements.pct),
        format_pct(totals.branches.pct),
        format_pct(totals.functions.pct),
        format_pct(totals.lines.pct),
        String::new(),
    ]);

    let mut widths: [usize; 6] = TABLE_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_rule(&mut out, &widths);
    push_row(&mut out, &widths, &TABLE_HEADERS.map(String::from));
    push_rule(&mut out, &widths);
    let all_files_row = rows.len() - 1;
    for (index, row) in rows.iter().enumerate() {
        if index == all_files_row {
            push_rule(&mut out, &widths);
        }
        push_row(&mut out, &widths, row);
    }
    push_rule(&mut out, &widths);
    out
}

/// Render the four-line totals block.
pub fn totals_summary(summary: &CoverageSummary) -> String {
    let mut out = String::new();
    for (label, totals) in [
        ("Statements", summary.statements),
        ("Branches", summary.branches),
        ("Functions", summary.functions),
        ("Lines", summary.lines),
    ] {
        out.push_str(&format!(
            "{label:<10} : {} ( {}/{} )\n",
            format_pct(totals.pct),
            totals.covered,
            totals.total
        ));
    }
    out
}

fn format_pct(pct: f64) -> String {
    format!("{pct:.2}%")
}

/// Comma-joined line numbers, collapsing consecutive runs to `start-end`.
fn format_line_list(lines: &[u32]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut run: Option<(u32, u32)> = None;
    for &line in lines {
        run = match run {
            Some((start, end)) if line == end + 1 => Some((start, line)),
            Some((start, end)) => {
                parts.push(format_run(start, end));
                Some((line, line))
            }
            None => Some((line, line)),
        };
    }
    if let Some((start, end)) = run {
        parts.push(format_run(start, end));
    }
    parts.join(",")
}

fn format_run(start: u32, end: u32) -> String {
    if start == end {
        format!("{start}")
    } else {
        format!("{start}-{end}")
    }
}

fn push_row(out: &mut String, widths: &[usize; 6], cells: &[String; 6]) {
    let mut line = String::new();
    for (&width, cell) in widths.iter().zip(cells.iter()) {
        line.push_str(&format!("| {cell:<width$} "));
    }
    line.push('|');
    out.push_str(line.trim_end());
    out.push('\n');
}

fn push_rule(out: &mut String, widths: &[usize; 6]) {
    let mut line = String::new();
    for width in widths {
        line.push('|');
        line.push_str(&"-".repeat(width + 2));
    }
    line.push('|');
    out.push_str(&line);
    out.push('\n');
}
