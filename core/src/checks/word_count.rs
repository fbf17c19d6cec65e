use crate::checks::text::word_count;
use crate::submission::draft::DraftStage;
use crate::submission::fields::SubmissionField;
use crate::submission::model::Submission;
use serde::{Deserialize, Serialize};

/// Per-field word-count bounds, with the first draft that enforces them.
pub const WORD_LIMITS: &[(SubmissionField, DraftStage, usize, usize)] = &[
    (SubmissionField::ProductIdea, DraftStage::First, 15, 300),
    (SubmissionField::CustomerProfile, DraftStage::First, 10, 200),
    (SubmissionField::PainPoints, DraftStage::First, 15, 250),
    (SubmissionField::Alternatives, DraftStage::First, 5, 200),
    (SubmissionField::MarketValidation, DraftStage::Second, 20, 300),
    (SubmissionField::CompetitorResearch, DraftStage::Second, 20, 300),
    (SubmissionField::InvestorPitch, DraftStage::Final, 20, 250),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum WordCountIssue {
    TooShort {
        field: SubmissionField,
        count: usize,
        min: usize,
    },
    TooLong {
        field: SubmissionField,
        count: usize,
        max: usize,
    },
}

impl WordCountIssue {
    pub fn is_blocking(&self) -> bool {
        matches!(self, WordCountIssue::TooShort { .. })
    }

    pub fn describe(&self) -> String {
        match self {
            WordCountIssue::TooShort { field, count, min } => {
                format!("{} has {} words (minimum {})", field, count, min)
            }
            WordCountIssue::TooLong { field, count, max } => {
                format!("{} has {} words (maximum {})", field, count, max)
            }
        }
    }
}

/// Checks the fields that apply to `stage`. Absent fields are skipped; the
/// completeness check already reports them.
pub fn check_word_counts(submission: &Submission, stage: DraftStage) -> Vec<WordCountIssue> {
    let mut issues = Vec::new();
    for &(field, from_stage, min, max) in WORD_LIMITS {
        if stage < from_stage {
            continue;
        }
        let Some(text) = submission.present_text(field) else {
            continue;
        };
        let count = word_count(text);
        if count < min {
            issues.push(WordCountIssue::TooShort { field, count, min });
        } else if count > max {
            issues.push(WordCountIssue::TooLong { field, count, max });
        }
    }
    issues
}
