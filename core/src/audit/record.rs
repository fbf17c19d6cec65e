use crate::audit::event::{project_key, Actor, AuditEvent};
use crate::audit::log::AuditLog;
use crate::determinism::fingerprint::{run_id_from_fingerprint, submission_fingerprint};
use crate::error::CoreResult;
use crate::submission::draft::{finalize, DraftStage};
use crate::submission::model::Submission;
use crate::validator::reconcile::ScoreReconciliation;
use crate::validator::ValidationReport;
use serde_json::json;

pub fn now_utc_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

fn event(
    event_type: &str,
    run_id: &str,
    submission: &Submission,
    actor: Actor,
    details: serde_json::Value,
    ts_utc: &str,
) -> AuditEvent {
    AuditEvent {
        ts_utc: ts_utc.to_string(),
        event_type: event_type.to_string(),
        run_id: run_id.to_string(),
        project_key: project_key(&submission.user_name, &submission.project_name),
        actor,
        details,
        prev_event_hash: String::new(),
        event_hash: String::new(),
    }
}

fn check_rows(report: &ValidationReport) -> Vec<(&'static str, &'static str, String)> {
    let t = &report.trace;
    let mut rows = Vec::new();

    let missing: Vec<&str> = t.completeness.missing_required.iter().map(|f| f.tag()).collect();
    rows.push((
        "completeness",
        if missing.is_empty() { "PASS" } else { "FAIL" },
        format!("missing=[{}]", missing.join(",")),
    ));
    rows.push((
        "spam",
        if t.spam.is_spam { "FAIL" } else { "PASS" },
        t.spam.rule_id.clone().unwrap_or_default(),
    ));
    rows.push((
        "privacy",
        if t.privacy.has_private_info { "FAIL" } else { "PASS" },
        t.privacy.rule_id.clone().unwrap_or_default(),
    ));
    match &t.duplicate {
        Some(d) if d.is_duplicate => rows.push((
            "duplicate",
            "FAIL",
            format!(
                "matched={} similarity_pct={}",
                d.matched.clone().unwrap_or_default(),
                (d.similarity.unwrap_or(0.0) * 100.0).round() as u32
            ),
        )),
        Some(_) => rows.push(("duplicate", "PASS", String::new())),
        None => rows.push(("duplicate", "SKIPPED", format!("draft {}", t.draft))),
    }
    let score = t.quality.total();
    rows.push((
        "quality",
        if score < t.min_quality { "FAIL" } else { "PASS" },
        format!("score={} min={}", score, t.min_quality),
    ));
    let blocking = t.word_counts.iter().any(|w| w.is_blocking());
    rows.push((
        "word_count",
        if blocking {
            "FAIL"
        } else if t.word_counts.is_empty() {
            "PASS"
        } else {
            "WARN"
        },
        t.word_counts
            .iter()
            .map(|w| w.describe())
            .collect::<Vec<_>>()
            .join("; "),
    ));
    rows
}

/// Writes STARTED, one CHECK_RESULT per check, and COMPLETED for one
/// validation. Returns the run id, which is derived from the submission
/// fingerprint so repeated validations of the same content share it.
pub fn record_validation(
    audit: &mut AuditLog,
    submission: &Submission,
    corpus_size: usize,
    report: &ValidationReport,
    ts_utc: &str,
) -> CoreResult<String> {
    let fingerprint = submission_fingerprint(submission)?;
    let run_id = run_id_from_fingerprint(&fingerprint)?;

    audit.append(event(
        "VALIDATION_STARTED",
        &run_id,
        submission,
        Actor::User,
        json!({
            "submission_sha256": fingerprint,
            "draft_number": report.trace.draft.number(),
            "corpus_size": corpus_size,
        }),
        ts_utc,
    ))?;

    for (check, result, detail) in check_rows(report) {
        audit.append(event(
            "VALIDATION_CHECK_RESULT",
            &run_id,
            submission,
            Actor::System,
            json!({ "check": check, "result": result, "detail": detail }),
            ts_utc,
        ))?;
    }

    let r = &report.result;
    audit.append(event(
        "VALIDATION_COMPLETED",
        &run_id,
        submission,
        Actor::System,
        json!({
            "passed": r.passed,
            "quality_score": r.quality_score,
            "completion_score": r.completion_score,
            "errors": r.errors,
            "warnings": r.warnings,
        }),
        ts_utc,
    ))?;
    Ok(run_id)
}

pub fn emit_draft_accepted(
    audit: &mut AuditLog,
    run_id: &str,
    submission: &Submission,
    draft: DraftStage,
    confirmed_final: bool,
    ts_utc: &str,
) -> CoreResult<()> {
    audit.append(event(
        "DRAFT_ACCEPTED",
        run_id,
        submission,
        Actor::User,
        json!({
            "draft_number": draft.number(),
            "submission_sha256": submission_fingerprint(submission)?,
            "is_final": finalize(draft, confirmed_final),
        }),
        ts_utc,
    ))?;
    Ok(())
}

pub fn emit_score_reconciled(
    audit: &mut AuditLog,
    run_id: &str,
    submission: &Submission,
    reconciliation: &ScoreReconciliation,
    ts_utc: &str,
) -> CoreResult<()> {
    audit.append(event(
        "SCORE_RECONCILED",
        run_id,
        submission,
        Actor::System,
        json!({
            "local_score": reconciliation.local_score,
            "external_score": reconciliation.external_score,
            "divergence": reconciliation.divergence,
            "status": reconciliation.status,
        }),
        ts_utc,
    ))?;
    Ok(())
}
