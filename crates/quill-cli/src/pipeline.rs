//! Batch revision run: lock, load, gate pass and trail, one unit at a time.
//!
//! A unit that fails (malformed record, lock timeout, partial move) is
//! reported as `failed` and the batch moves on. Only errors that make the
//! whole run meaningless, such as an unreadable draft directory, abort it.

use std::path::PathBuf;

use chrono::Utc;
use quill_config::LockConfig;
use quill_core::entities::BrandGuidelines;
use quill_core::enums::{Location, OutcomeKind};
use quill_core::ids::validate_unit_id;
use quill_core::responses::{RunSummary, UnitReport};
use quill_core::thresholds::GateThresholds;
use quill_core::trail::TrailEntry;
use quill_gate::collaborators::{GuidelineBrandChecker, MarkerAccuracyValidator};
use quill_gate::{GatePass, PassOutcome};
use quill_schema::SchemaRegistry;
use quill_store::{FsStore, Store, TrailWriter};

use crate::progress::Progress;
use crate::unit_lock;

/// Per-run inputs that stay fixed for every unit.
pub struct BatchSettings {
    pub thresholds: GateThresholds,
    pub guidelines: BrandGuidelines,
    pub accuracy: MarkerAccuracyValidator,
    pub brand: GuidelineBrandChecker,
    pub lock: LockConfig,
}

pub struct RevisionBatch<'a> {
    store: &'a FsStore,
    schema: &'a SchemaRegistry,
    trail: &'a TrailWriter,
    locks_dir: PathBuf,
    settings: BatchSettings,
}

impl<'a> RevisionBatch<'a> {
    pub fn new(
        store: &'a FsStore,
        schema: &'a SchemaRegistry,
        trail: &'a TrailWriter,
        locks_dir: PathBuf,
        settings: BatchSettings,
    ) -> Self {
        Self {
            store,
            schema,
            trail,
            locks_dir,
            settings,
        }
    }

    /// The units a run over `ids` visits: `ids` in first-seen order without
    /// repeats, or every draft when `ids` is empty.
    pub fn resolve_ids(&self, ids: &[String]) -> anyhow::Result<Vec<String>> {
        if ids.is_empty() {
            return Ok(self.store.list(Location::Draft)?);
        }
        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(id) {
                unique.push(id.clone());
            }
        }
        Ok(unique)
    }

    /// Gate `ids` in order, or every draft when `ids` is empty.
    pub async fn run(&self, ids: &[String], progress: &Progress) -> anyhow::Result<RunSummary> {
        let run_id = new_run_id()?;
        let started_at = Utc::now();

        let ids = self.resolve_ids(ids)?;
        tracing::info!(%run_id, units = ids.len(), "revision run started");

        let mut units = Vec::with_capacity(ids.len());
        for id in &ids {
            progress.set_message(id);
            let report = match self.run_unit(id).await {
                Ok(outcome) => routed_report(id, &outcome),
                Err(error) => {
                    tracing::warn!(id, error = %format!("{error:#}"), "unit failed");
                    UnitReport {
                        id: id.clone(),
                        outcome: OutcomeKind::Failed,
                        location: self.locate(id),
                        readability: None,
                        failed_checks: Vec::new(),
                        reasons: vec![format!("{error:#}")],
                    }
                }
            };
            self.record(&run_id, &report);
            units.push(report);
            progress.inc(1);
        }

        let summary = RunSummary::new(run_id, started_at, Utc::now(), units);
        tracing::info!(
            run_id = %summary.run_id,
            approved = summary.counts.approved,
            needs_revision = summary.counts.needs_revision,
            failed = summary.counts.failed,
            "revision run finished"
        );
        Ok(summary)
    }

    async fn run_unit(&self, id: &str) -> anyhow::Result<PassOutcome> {
        validate_unit_id(id)?;
        let _guard = unit_lock::acquire(&self.locks_dir, id, &self.settings.lock).await?;

        let settings = &self.settings;
        let pass = GatePass::new(
            self.store,
            &settings.thresholds,
            &settings.guidelines,
            &settings.accuracy,
            &settings.brand,
        );
        let outcome = pass.run_id(id)?;
        tracing::info!(id, destination = %outcome.destination, "unit routed");
        Ok(outcome)
    }

    fn locate(&self, id: &str) -> Option<Location> {
        [Location::Draft, Location::Approved]
            .into_iter()
            .find(|location| self.store.contains(*location, id).unwrap_or(false))
    }

    fn record(&self, run_id: &str, report: &UnitReport) {
        let entry = TrailEntry {
            v: 1,
            ts: Utc::now().to_rfc3339(),
            run_id: run_id.to_string(),
            unit_id: report.id.clone(),
            outcome: report.outcome,
            readability: report.readability,
            reasons: report.reasons.clone(),
        };
        if let Err(error) = self.trail.append_validated(&entry, self.schema) {
            tracing::warn!(id = %report.id, %error, "failed to append trail entry");
        }
    }
}

fn routed_report(id: &str, outcome: &PassOutcome) -> UnitReport {
    UnitReport {
        id: id.to_string(),
        outcome: if outcome.decision.approved {
            OutcomeKind::Approved
        } else {
            OutcomeKind::NeedsRevision
        },
        location: Some(outcome.destination),
        readability: Some(outcome.decision.readability),
        failed_checks: outcome.decision.failed_checks.clone(),
        reasons: outcome.decision.reasons.clone(),
    }
}

/// `run-<utc timestamp>-<8 hex chars>`.
pub fn new_run_id() -> anyhow::Result<String> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)
        .map_err(|error| anyhow::anyhow!("failed to generate run id: {error}"))?;
    let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("run-{}-{suffix}", Utc::now().format("%Y%m%dT%H%M%SZ")))
}
