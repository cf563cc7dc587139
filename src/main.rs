use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod artifact;
mod cli;
mod merge;
mod normalize;
mod render;
mod report;
mod schema;

use cli::{Command, MergeArgs, ReportArgs, ReportFormat, RootArgs};
use normalize::FsSourceReader;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-consumable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = RootArgs::parse();
    match args.command {
        Command::Merge(args) => cmd_merge(args),
        Command::Report(args) => cmd_report(args),
    }
}

fn cmd_merge(args: MergeArgs) -> Result<()> {
    let maps = artifact::load_coverage_inputs(&args.inputs)?;
    let outcome = merge::merge_reports(maps, args.normalize, &FsSourceReader);

    if let Some(out) = &args.out {
        artifact::write_coverage_map(out, &outcome.merged)?;
        eprintln!("Wrote merged coverage to {}", out.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&MergeReport {
            summary: outcome.summary,
            normalized: outcome.normalized,
        })?);
    } else {
        if let Some(stats) = outcome.normalized {
            println!(
                "Normalization removed {} import and {} directive statement entries.",
                stats.imports_removed, stats.directives_removed
            );
        }
        print!("{}", render::totals_summary(&outcome.summary));
    }
    Ok(())
}

fn cmd_report(args: ReportArgs) -> Result<()> {
    let map = artifact::read_coverage_map(&args.artifact)?;
    match args.format {
        ReportFormat::Text => print!("{}", render::text_table(&map)),
        ReportFormat::Summary => print!("{}", render::totals_summary(&report::summarize(&map))),
        ReportFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report::summarize(&map))?
        ),
    }
    Ok(())
}

/// JSON payload for `merge --json`.
#[derive(serde::Serialize)]
struct MergeReport {
    summary: report::CoverageSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized: Option<normalize::NormalizeStats>,
}
