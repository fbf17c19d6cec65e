use serde::{Deserialize, Serialize};

pub const DIVERGENCE_LIMIT: u8 = 15;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReconciliationStatus {
    AGREED,
    DIVERGENT,
    EXTERNAL_MISSING,
}

/// Local quality score next to an externally generated overall score.
///
/// Neither score is overwritten; a divergence above [`DIVERGENCE_LIMIT`] is
/// surfaced for a human or a later policy to resolve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreReconciliation {
    pub local_score: u8,
    pub external_score: Option<u8>,
    pub divergence: Option<u8>,
    pub status: ReconciliationStatus,
}

/// External scores outside 0..=100 are clamped before comparison.
pub fn reconcile_scores(local_score: u8, external_score: Option<i64>) -> ScoreReconciliation {
    let Some(raw) = external_score else {
        return ScoreReconciliation {
            local_score,
            external_score: None,
            divergence: None,
            status: ReconciliationStatus::EXTERNAL_MISSING,
        };
    };
    let external = raw.clamp(0, 100) as u8;
    let divergence = local_score.abs_diff(external);
    let status = if divergence > DIVERGENCE_LIMIT {
        ReconciliationStatus::DIVERGENT
    } else {
        ReconciliationStatus::AGREED
    };
    ScoreReconciliation {
        local_score,
        external_score: Some(external),
        divergence: Some(divergence),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_limit_agrees() {
        let r = reconcile_scores(70, Some(85));
        assert_eq!(r.status, ReconciliationStatus::AGREED);
        assert_eq!(r.divergence, Some(15));
    }

    #[test]
    fn beyond_limit_is_divergent_and_keeps_both_scores() {
        let r = reconcile_scores(40, Some(90));
        assert_eq!(r.status, ReconciliationStatus::DIVERGENT);
        assert_eq!(r.local_score, 40);
        assert_eq!(r.external_score, Some(90));
    }

    #[test]
    fn missing_or_out_of_range_external_score() {
        assert_eq!(
            reconcile_scores(50, None).status,
            ReconciliationStatus::EXTERNAL_MISSING
        );
        assert_eq!(reconcile_scores(100, Some(250)).external_score, Some(100));
    }
}
