use crate::determinism::json_canonical::to_canonical_bytes;
use crate::error::{CoreError, CoreResult};
use crate::submission::model::Submission;
use sha2::{Digest, Sha256};

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    hex::encode(h.finalize())
}

/// SHA-256 over the canonical JSON of a submission. Stable across field
/// order in the source document.
pub fn submission_fingerprint(submission: &Submission) -> CoreResult<String> {
    Ok(sha256_hex(&to_canonical_bytes(submission)?))
}

/// Deterministic run id derived from the first 32 hex chars of a fingerprint.
pub fn run_id_from_fingerprint(fingerprint_hex: &str) -> CoreResult<String> {
    let hex = fingerprint_hex.trim();
    if hex.len() < 32 || !hex.chars().take(32).all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::InvalidInput(
            "fingerprint must be hex with length >= 32".to_string(),
        ));
    }
    Ok(format!("v_{}", hex[..32].to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_ignores_source_key_order() {
        let a: Submission =
            serde_json::from_str(r#"{"product_idea":"x","customer_profile":"y"}"#).unwrap();
        let b: Submission =
            serde_json::from_str(r#"{"customer_profile":"y","product_idea":"x"}"#).unwrap();
        assert_eq!(
            submission_fingerprint(&a).unwrap(),
            submission_fingerprint(&b).unwrap()
        );
    }

    #[test]
    fn run_id_rule() {
        let fp = "1234567890ABCDEF1234567890abcdef9999";
        assert_eq!(
            run_id_from_fingerprint(fp).unwrap(),
            "v_1234567890abcdef1234567890abcdef"
        );
        assert!(run_id_from_fingerprint("abc").is_err());
    }
}
