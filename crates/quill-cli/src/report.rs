//! Run reports written by `quill revise --report`.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use quill_core::responses::RunSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Csv,
}

impl ReportFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("md" | "markdown") => Ok(Self::Markdown),
            Some("csv") => Ok(Self::Csv),
            _ => anyhow::bail!(
                "unsupported report file '{}': use a .md or .csv extension",
                path.display()
            ),
        }
    }
}

/// Render `summary` and write it to `path`.
pub fn write_report(path: &Path, summary: &RunSummary) -> anyhow::Result<()> {
    let rendered = match ReportFormat::from_path(path)? {
        ReportFormat::Markdown => render_markdown(summary),
        ReportFormat::Csv => render_csv(summary),
    };
    std::fs::write(path, rendered)
        .with_context(|| format!("failed to write report to {}", path.display()))
}

#[must_use]
pub fn render_markdown(summary: &RunSummary) -> String {
    let mut out = String::new();
    let counts = summary.counts;
    let _ = writeln!(out, "# Revision run {}", summary.run_id);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Started {} · finished {}",
        summary.started_at.to_rfc3339(),
        summary.finished_at.to_rfc3339()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "| Outcome | Units |");
    let _ = writeln!(out, "| --- | ---: |");
    let _ = writeln!(out, "| approved | {} |", counts.approved);
    let _ = writeln!(out, "| needs_revision | {} |", counts.needs_revision);
    let _ = writeln!(out, "| failed | {} |", counts.failed);

    for unit in &summary.units {
        let _ = writeln!(out);
        let _ = writeln!(out, "## {} ({})", unit.id, unit.outcome);
        let _ = writeln!(out);
        if let Some(readability) = unit.readability {
            let _ = writeln!(out, "- Readability: {readability}");
        }
        if let Some(location) = unit.location {
            let _ = writeln!(out, "- Location: {location}");
        }
        if !unit.failed_checks.is_empty() {
            let checks = unit
                .failed_checks
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            let _ = writeln!(out, "- Failed checks: {}", checks.join(", "));
        }
        for reason in &unit.reasons {
            let _ = writeln!(out, "- {reason}");
        }
    }
    out
}

#[must_use]
pub fn render_csv(summary: &RunSummary) -> String {
    let mut out = String::from("run_id,unit_id,outcome,location,readability,failed_checks,reasons\n");
    for unit in &summary.units {
        let fields = [
            summary.run_id.clone(),
            unit.id.clone(),
            unit.outcome.to_string(),
            unit.location.map(|l| l.to_string()).unwrap_or_default(),
            unit.readability.map(|r| r.to_string()).unwrap_or_default(),
            unit.failed_checks
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(";"),
            unit.reasons.join(" | "),
        ];
        let line = fields
            .iter()
            .map(|field| csv_field(field))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Quote per RFC 4180 when the field holds a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
