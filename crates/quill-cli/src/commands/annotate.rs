use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use quill_gate::annotate::{ClaimKind, annotate, count_flags, detect};

use crate::cli::root_commands::AnnotateArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::input::read_text;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AnnotateResponse {
    annotated: String,
    flags: usize,
    claim_kinds: Vec<ClaimKind>,
    written: bool,
}

/// Handle `quill annotate`.
///
/// `--format raw` prints only the annotated text.
pub fn handle(args: &AnnotateArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = read_text(&args.source)?;
    let annotated = annotate(&text);

    let mut written = false;
    if args.write
        && let Some(path) = args.source.path.as_deref()
        && path != Path::new("-")
        && annotated != text
    {
        std::fs::write(path, &annotated)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written = true;
    }

    if flags.format == OutputFormat::Raw {
        println!("{annotated}");
        return Ok(());
    }

    output(
        &AnnotateResponse {
            flags: count_flags(&annotated),
            claim_kinds: detect(&text),
            annotated,
            written,
        },
        flags.format,
    )
}
