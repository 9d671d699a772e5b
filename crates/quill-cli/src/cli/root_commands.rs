use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::ToolCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create the draft and approved store directories.
    Init,
    /// Readability report for a file or inline text.
    Score(TextSourceArgs),
    /// Append [VERIFY] after claims that need a source.
    Annotate(AnnotateArgs),
    /// Run the quality gate over draft units.
    Revise(ReviseArgs),
    /// Schema-check every stored record.
    Validate,
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
    /// Gate steps as named tool calls.
    Tool {
        #[command(subcommand)]
        action: ToolCommands,
    },
}

/// Where the text to inspect comes from.
#[derive(Clone, Debug, Args)]
pub struct TextSourceArgs {
    /// Path to a text file, or `-` for stdin.
    pub path: Option<PathBuf>,
    /// Inline text instead of a file.
    #[arg(long, conflicts_with = "path")]
    pub text: Option<String>,
}

/// Arguments for `quill annotate`.
#[derive(Clone, Debug, Args)]
pub struct AnnotateArgs {
    #[command(flatten)]
    pub source: TextSourceArgs,
    /// Rewrite the input file with the markers.
    #[arg(long, requires = "path")]
    pub write: bool,
}

/// Arguments for `quill revise`.
#[derive(Clone, Debug, Default, Args)]
pub struct ReviseArgs {
    /// Only gate these unit ids (repeatable). Defaults to every draft.
    #[arg(long = "id")]
    pub ids: Vec<String>,
    #[arg(long)]
    pub readability_target: Option<f64>,
    #[arg(long)]
    pub readability_tolerance: Option<f64>,
    #[arg(long)]
    pub brand_minimum: Option<f64>,
    #[arg(long)]
    pub accuracy_minimum: Option<f64>,
    /// Write a run report; `.md` renders Markdown, `.csv` renders CSV.
    #[arg(long)]
    pub report: Option<PathBuf>,
    /// Skip appending to the decision trail.
    #[arg(long)]
    pub no_trail: bool,
}

/// Arguments for `quill schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Registered schema name.
    #[arg(required_unless_present = "list")]
    pub name: Option<String>,
    /// List registered schema names.
    #[arg(long, conflicts_with = "name")]
    pub list: bool,
}
