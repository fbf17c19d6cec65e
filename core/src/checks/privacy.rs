use crate::error::CoreResult;
use crate::patterns::{privacy_table, CompiledTable};
use crate::submission::extract::extract_text;
use crate::submission::model::Submission;
use serde::{Deserialize, Serialize};

/// Result of scanning for personal information. A best-effort heuristic:
/// it will miss some PII and flag some innocent text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivacyCheck {
    pub has_private_info: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

pub struct PrivacyDetector {
    table: &'static CompiledTable,
}

impl PrivacyDetector {
    pub fn new() -> CoreResult<Self> {
        Ok(Self {
            table: privacy_table()?,
        })
    }

    pub fn check_submission(&self, submission: &Submission) -> PrivacyCheck {
        self.check_text(&extract_text(submission))
    }

    pub fn check_text(&self, text: &str) -> PrivacyCheck {
        match self.table.first_match(text) {
            Some(rule) => PrivacyCheck {
                has_private_info: true,
                reason: Some(rule.reason.clone()),
                rule_id: Some(rule.rule_id.clone()),
            },
            None => PrivacyCheck {
                has_private_info: false,
                reason: None,
                rule_id: None,
            },
        }
    }
}
