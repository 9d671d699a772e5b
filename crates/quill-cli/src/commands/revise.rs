use anyhow::Context;
use quill_config::ThresholdsConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReviseArgs;
use crate::commands::shared::collaborators;
use crate::context::AppContext;
use crate::output::output;
use crate::pipeline::{BatchSettings, RevisionBatch};
use crate::progress::Progress;
use crate::report::{ReportFormat, write_report};

/// Handle `quill revise`.
///
/// Threshold flags override `[thresholds]` field by field. Missing or invalid
/// thresholds abort before any unit is touched; unit failures do not.
pub async fn handle(args: &ReviseArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let thresholds = ctx
        .config
        .thresholds
        .merged_with(overrides(args))
        .require()
        .context("cannot start revision run")?;
    if let Some(path) = &args.report {
        ReportFormat::from_path(path)?;
    }

    let (accuracy, brand) = collaborators::from_config(&ctx.config);
    let settings = BatchSettings {
        thresholds,
        guidelines: ctx.config.brand.guidelines(),
        accuracy,
        brand,
        lock: ctx.config.lock.clone(),
    };

    let trail = ctx.trail(!args.no_trail)?;
    let batch = RevisionBatch::new(&ctx.store, &ctx.schema, &trail, ctx.locks_dir(), settings);

    let total = batch.resolve_ids(&args.ids)?.len();
    let progress = Progress::bar(total as u64, "gating units");

    let summary = batch.run(&args.ids, &progress).await?;
    progress.finish_ok(&format!(
        "{} approved, {} need revision, {} failed",
        summary.counts.approved, summary.counts.needs_revision, summary.counts.failed
    ));

    if let Some(path) = &args.report {
        write_report(path, &summary)?;
        tracing::info!(path = %path.display(), "report written");
    }

    output(&summary, flags.format)
}

fn overrides(args: &ReviseArgs) -> ThresholdsConfig {
    ThresholdsConfig {
        readability_target: args.readability_target,
        readability_tolerance: args.readability_tolerance,
        brand_minimum: args.brand_minimum,
        accuracy_minimum: args.accuracy_minimum,
    }
}
