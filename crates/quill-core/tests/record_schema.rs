//! Serde roundtrip and JsonSchema validation tests for persisted record types.

use chrono::Utc;
use pretty_assertions::assert_eq;
use quill_core::entities::{ContentMetadata, ContentUnit};
use quill_core::enums::{BrandComplianceState, FactVerificationState, GateCheck, Location, OutcomeKind};
use quill_core::responses::{RunSummary, UnitReport};
use quill_core::trail::TrailEntry;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(recovered, val, "serde roundtrip failed for {}", stringify!($ty));

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn revised_unit() -> ContentUnit {
    ContentUnit {
        id: "lesson-07".into(),
        title: "Why fees exist".into(),
        metadata: ContentMetadata {
            readability_score: Some(58.4),
            brand_compliance: BrandComplianceState::NeedsRevision,
            fact_verification_status: FactVerificationState::NeedsVerification,
            revision_notes: vec![
                "Readability: 58.4 (target: 65)".into(),
                "Brand consistency: 70%".into(),
                "Technical accuracy: 96%".into(),
            ],
            approved: false,
        },
        body: "Fees rose 40% [VERIFY] in 2021 [VERIFY].".into(),
    }
}

roundtrip_and_validate!(content_unit_roundtrip, ContentUnit, revised_unit());

roundtrip_and_validate!(
    fresh_content_unit_roundtrip,
    ContentUnit,
    ContentUnit::new("lesson-01", "What is money?", "Money is a tool.")
);

roundtrip_and_validate!(
    trail_entry_roundtrip,
    TrailEntry,
    TrailEntry {
        v: 1,
        ts: "2026-02-08T12:00:00Z".into(),
        run_id: "run-00ff".into(),
        unit_id: "lesson-07".into(),
        outcome: OutcomeKind::Approved,
        readability: Some(71.0),
        reasons: vec!["Readability: 71 (target: 65)".into()],
    }
);

roundtrip_and_validate!(
    run_summary_roundtrip,
    RunSummary,
    RunSummary::new(
        "run-00ff".into(),
        Utc::now(),
        Utc::now(),
        vec![UnitReport {
            id: "lesson-07".into(),
            outcome: OutcomeKind::NeedsRevision,
            location: Some(Location::Draft),
            readability: Some(40.0),
            failed_checks: vec![GateCheck::Readability],
            reasons: vec!["Readability: 40 (target: 65)".into()],
        }],
    )
);

#[test]
fn persisted_record_uses_wire_field_names() {
    let value = serde_json::to_value(revised_unit()).unwrap();
    let meta = &value["metadata"];
    assert_eq!(meta["readability_score"], 58.4);
    assert_eq!(meta["brand_compliance"], "needs_revision");
    assert_eq!(meta["fact_verification_status"], "needs_verification");
    assert_eq!(meta["approved"], false);
    assert_eq!(meta["revision_notes"].as_array().map(Vec::len), Some(3));
    assert!(value["body"].as_str().unwrap().contains("[VERIFY]"));
}

#[test]
fn null_readability_is_accepted() {
    let schema = serde_json::to_value(schema_for!(ContentUnit)).unwrap();
    let instance = serde_json::json!({
        "id": "lesson-01",
        "title": "t",
        "metadata": {
            "readability_score": null,
            "brand_compliance": "pending",
            "fact_verification_status": "pending",
            "revision_notes": [],
            "approved": false
        },
        "body": "text"
    });
    assert!(validate_against_schema(&schema, &instance).is_empty());
}

#[test]
fn missing_metadata_field_fails_schema() {
    let schema = serde_json::to_value(schema_for!(ContentUnit)).unwrap();
    let instance = serde_json::json!({
        "id": "lesson-01",
        "title": "t",
        "metadata": {
            "readability_score": null,
            "brand_compliance": "pending",
            "revision_notes": [],
            "approved": false
        },
        "body": "text"
    });
    let errors = validate_against_schema(&schema, &instance);
    assert!(!errors.is_empty());
    assert!(errors.iter().any(|e| e.contains("fact_verification_status")));
}

#[test]
fn unknown_state_fails_schema() {
    let schema = serde_json::to_value(schema_for!(ContentUnit)).unwrap();
    let mut instance = serde_json::to_value(revised_unit()).unwrap();
    instance["metadata"]["brand_compliance"] = serde_json::json!("maybe");
    assert!(!validate_against_schema(&schema, &instance).is_empty());
}
