use crate::determinism::fingerprint::sha256_hex;
use crate::determinism::json_canonical;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEvent {
    pub ts_utc: String, // RFC3339 UTC string
    pub event_type: String,
    pub run_id: String,
    /// `<user>/<project>` the event concerns.
    pub project_key: String,
    pub actor: Actor,
    pub details: serde_json::Value,
    pub prev_event_hash: String, // hex 64
    pub event_hash: String,      // hex 64
}

pub const ZERO_HASH_64: &str = "0000000000000000000000000000000000000000000000000000000000000000";

pub const EVENT_TYPES: &[&str] = &[
    "VALIDATION_STARTED",
    "VALIDATION_CHECK_RESULT",
    "VALIDATION_COMPLETED",
    "DRAFT_ACCEPTED",
    "SCORE_RECONCILED",
];

pub fn project_key(user_name: &str, project_name: &str) -> String {
    format!("{}/{}", user_name, project_name)
}

// event_hash = SHA-256 of the canonical envelope with event_hash itself
// set to ZERO_HASH_64 while hashing.
pub fn compute_event_hash(event: &AuditEvent) -> CoreResult<String> {
    let mut e = event.clone();
    e.event_hash = ZERO_HASH_64.to_string();
    let bytes = json_canonical::to_canonical_bytes(&e)?;
    Ok(sha256_hex(&bytes))
}

pub fn finalize_event(mut event: AuditEvent) -> CoreResult<AuditEvent> {
    if event.prev_event_hash.len() != 64
        || !event.prev_event_hash.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(CoreError::InvalidInput(
            "prev_event_hash must be 64 hex chars".to_string(),
        ));
    }
    validate_event_taxonomy(&event)?;
    event.event_hash = compute_event_hash(&event)?;
    Ok(event)
}

/// Recomputes the hash of a stored event and compares it.
pub fn verify_event(event: &AuditEvent) -> CoreResult<bool> {
    Ok(compute_event_hash(event)? == event.event_hash)
}

fn validate_event_taxonomy(event: &AuditEvent) -> CoreResult<()> {
    if !EVENT_TYPES.contains(&event.event_type.as_str()) {
        return Err(CoreError::InvalidInput(format!(
            "unknown event_type {}",
            event.event_type
        )));
    }
    for k in required_detail_keys(&event.event_type) {
        if event.details.get(k).is_none() {
            return Err(CoreError::InvalidInput(format!(
                "event {} missing details.{}",
                event.event_type, k
            )));
        }
    }
    Ok(())
}

fn required_detail_keys(event_type: &str) -> &'static [&'static str] {
    match event_type {
        "VALIDATION_STARTED" => &["submission_sha256", "draft_number", "corpus_size"],
        "VALIDATION_CHECK_RESULT" => &["check", "result", "detail"],
        "VALIDATION_COMPLETED" => &[
            "passed",
            "quality_score",
            "completion_score",
            "errors",
            "warnings",
        ],
        "DRAFT_ACCEPTED" => &["draft_number", "submission_sha256", "is_final"],
        "SCORE_RECONCILED" => &["local_score", "external_score", "divergence", "status"],
        _ => &[],
    }
}
