//! CLI argument parsing for the coverage merge workflow.
//!
//! The CLI is intentionally thin: it wires artifacts into the merge core and
//! report renderers without embedding policy, so the same core logic can be
//! reused elsewhere.
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "covmerge",
    version,
    about = "Reconcile per-environment coverage reports into one report",
    after_help = "Commands:\n  merge <ARTIFACT>...   Merge coverage artifacts and print a summary\n  report <ARTIFACT>     Render an existing coverage artifact\n\nExamples:\n  covmerge merge coverage/node.json coverage/edge.json --out coverage/merged.json\n  covmerge merge coverage/*.json --normalize --json\n  covmerge report coverage/merged.json --format text",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Merge(MergeArgs),
    Report(ReportArgs),
}

/// Merge command inputs.
#[derive(Parser, Debug)]
#[command(about = "Merge coverage artifacts from multiple environments")]
pub struct MergeArgs {
    /// Coverage artifacts in trust order; later artifacts win shape
    /// tie-breaks for files they share with earlier ones
    #[arg(value_name = "ARTIFACT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output path for the merged coverage artifact
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Strip import and directive pseudo-statements using on-disk source
    /// text before merging
    #[arg(long)]
    pub normalize: bool,

    /// Emit the summary as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Report command inputs.
#[derive(Parser, Debug)]
#[command(about = "Render a coverage artifact as a report")]
pub struct ReportArgs {
    /// Coverage artifact to render (typically a merged one)
    #[arg(value_name = "ARTIFACT")]
    pub artifact: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

/// Output formats for the report command.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    /// Per-file table with uncovered line numbers
    Text,
    /// Four-line totals block
    Summary,
    /// Machine-readable category summary
    Json,
}
