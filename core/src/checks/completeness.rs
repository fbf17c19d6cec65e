use crate::submission::draft::DraftStage;
use crate::submission::fields::SubmissionField;
use crate::submission::model::Submission;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletenessReport {
    pub missing_required: Vec<SubmissionField>,
    pub missing_optional: Vec<SubmissionField>,
    /// Share of required and optional fields that are present, 0..=100.
    pub completion_score: u8,
}

impl CompletenessReport {
    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}

pub fn check_completeness(submission: &Submission, stage: DraftStage) -> CompletenessReport {
    let required = stage.required_fields();
    let optional = stage.optional_fields();

    let missing_required: Vec<SubmissionField> = required
        .iter()
        .copied()
        .filter(|f| !submission.is_present(*f))
        .collect();
    let missing_optional: Vec<SubmissionField> = optional
        .iter()
        .copied()
        .filter(|f| !submission.is_present(*f))
        .collect();

    let total = required.len() + optional.len();
    let present = total - missing_required.len() - missing_optional.len();
    let completion_score = ((present * 100) as f64 / total as f64).round() as u8;

    CompletenessReport {
        missing_required,
        missing_optional,
        completion_score,
    }
}
