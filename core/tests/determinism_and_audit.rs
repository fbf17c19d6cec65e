mod common;

use common::detailed_final_submission;
use idea_core::audit::event::ZERO_HASH_64;
use idea_core::audit::log::AuditLog;
use idea_core::audit::record::{emit_draft_accepted, emit_score_reconciled, record_validation};
use idea_core::determinism::fingerprint::submission_fingerprint;
use idea_core::submission::draft::{next_draft_stage, DraftRecord};
use idea_core::validator::reconcile::{reconcile_scores, ReconciliationStatus};
use idea_core::{DraftStage, SubmissionValidator};

const TS: &str = "2026-02-10T00:00:00Z";

#[test]
fn validation_run_is_recorded_as_a_verifiable_chain() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("audit").join("audit_log.ndjson");
    let mut log = AuditLog::open_or_create(&path).unwrap();
    assert_eq!(log.last_hash(), ZERO_HASH_64);

    let s = detailed_final_submission();
    let v = SubmissionValidator::with_defaults().unwrap();
    let report = v.validate_with_trace(&s, &[], DraftStage::Final);
    let run_id = record_validation(&mut log, &s, 0, &report, TS).unwrap();

    let reconciliation = reconcile_scores(report.result.quality_score, Some(60));
    assert_eq!(reconciliation.status, ReconciliationStatus::DIVERGENT);
    emit_score_reconciled(&mut log, &run_id, &s, &reconciliation, TS).unwrap();
    emit_draft_accepted(&mut log, &run_id, &s, DraftStage::Final, true, TS).unwrap();

    let events = log.read_all().unwrap();
    // started + 6 checks + completed + reconciled + accepted
    assert_eq!(events.len(), 10);
    assert_eq!(events[0].event_type, "VALIDATION_STARTED");
    assert_eq!(events[0].prev_event_hash, ZERO_HASH_64);
    assert_eq!(events[0].project_key, "ana/mealmate");
    assert_eq!(events[8].details["status"], "DIVERGENT");
    assert_eq!(events[9].details["is_final"], true);
    log.verify_chain().unwrap();

    let duplicate_row = events
        .iter()
        .find(|e| e.details["check"] == "duplicate")
        .unwrap();
    assert_eq!(duplicate_row.details["result"], "PASS");

    // Reopening resumes the chain.
    let last = log.last_hash().to_string();
    let mut reopened = AuditLog::open_or_create(&path).unwrap();
    assert_eq!(reopened.last_hash(), last);
    record_validation(&mut reopened, &s, 0, &report, TS).unwrap();
    reopened.verify_chain().unwrap();
}

#[test]
fn tampering_breaks_the_chain() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("audit_log.ndjson");
    let mut log = AuditLog::open_or_create(&path).unwrap();
    let s = detailed_final_submission();
    let report = SubmissionValidator::with_defaults()
        .unwrap()
        .validate_with_trace(&s, &[], DraftStage::First);
    record_validation(&mut log, &s, 0, &report, TS).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, raw.replacen("\"passed\":true", "\"passed\":false", 1)).unwrap();
    assert!(log.verify_chain().is_err());
}

#[test]
fn run_id_is_stable_for_identical_content() {
    let tmp = tempfile::tempdir().unwrap();
    let mut log = AuditLog::open_or_create(tmp.path().join("a.ndjson")).unwrap();
    let s = detailed_final_submission();
    let report = SubmissionValidator::with_defaults()
        .unwrap()
        .validate_with_trace(&s, &[], DraftStage::First);
    let a = record_validation(&mut log, &s, 0, &report, TS).unwrap();
    let b = record_validation(&mut log, &s.clone(), 0, &report, TS).unwrap();
    assert_eq!(a, b);
    assert!(a.starts_with("v_"));
    assert_eq!(&a[2..], &submission_fingerprint(&s).unwrap()[..32]);
}

#[test]
fn skipped_duplicate_check_is_recorded() {
    let tmp = tempfile::tempdir().unwrap();
    let mut log = AuditLog::open_or_create(tmp.path().join("a.ndjson")).unwrap();
    let s = detailed_final_submission();
    let report = SubmissionValidator::with_defaults()
        .unwrap()
        .validate_with_trace(&s, &[], DraftStage::Second);
    record_validation(&mut log, &s, 0, &report, TS).unwrap();
    let events = log.read_all().unwrap();
    let row = events
        .iter()
        .find(|e| e.details["check"] == "duplicate")
        .unwrap();
    assert_eq!(row.details["result"], "SKIPPED");
}

#[test]
fn draft_sequence_feeds_the_validator_stage() {
    let records = vec![DraftRecord {
        user_name: "ana".to_string(),
        project_name: "mealmate".to_string(),
        draft_number: DraftStage::First,
        placeholder: false,
    }];
    let stage = next_draft_stage(&records, "ana", "mealmate").unwrap();
    assert_eq!(stage, DraftStage::Second);
    let r = SubmissionValidator::with_defaults()
        .unwrap()
        .validate(&detailed_final_submission(), &[], stage);
    assert!(r.passed);
}
