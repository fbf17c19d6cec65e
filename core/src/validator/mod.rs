pub mod reconcile;

use crate::checks::completeness::{check_completeness, CompletenessReport};
use crate::checks::duplicate::{check_duplicate, DuplicateCheck};
use crate::checks::privacy::{PrivacyCheck, PrivacyDetector};
use crate::checks::quality::{score_breakdown, QualityBreakdown};
use crate::checks::spam::{SpamCheck, SpamDetector};
use crate::checks::word_count::{check_word_counts, WordCountIssue};
use crate::config::ValidatorConfig;
use crate::error::CoreResult;
use crate::submission::draft::DraftStage;
use crate::submission::fields::SubmissionField;
use crate::submission::model::{ExistingIdea, Submission};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Error and warning tag prefixes. Downstream code branches on these.
pub mod tags {
    pub const REQUIRED_FIELD_MISSING: &str = "REQUIRED_FIELD_MISSING";
    pub const SPAM: &str = "SPAM";
    pub const PRIVACY: &str = "PRIVACY";
    pub const DUPLICATE: &str = "DUPLICATE";
    pub const QUALITY_LOW: &str = "QUALITY_LOW";
    pub const WORD_COUNT_LOW: &str = "WORD_COUNT_LOW";

    pub const OPTIONAL_FIELD_EMPTY: &str = "OPTIONAL_FIELD_EMPTY";
    pub const QUALITY_BORDERLINE: &str = "QUALITY_BORDERLINE";
    pub const WORD_COUNT_HIGH: &str = "WORD_COUNT_HIGH";
    pub const CATEGORY_MISSING: &str = "CATEGORY_MISSING";
    pub const CATEGORY_EXCESS: &str = "CATEGORY_EXCESS";
}

fn tagged(tag: &str, message: impl AsRef<str>) -> String {
    format!("{}: {}", tag, message.as_ref())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub passed: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub quality_score: u8,
    pub completion_score: u8,
}

impl ValidationResult {
    pub fn has_error_tag(&self, tag: &str) -> bool {
        self.errors.iter().any(|e| tag_of(e) == Some(tag))
    }

    pub fn has_warning_tag(&self, tag: &str) -> bool {
        self.warnings.iter().any(|w| tag_of(w) == Some(tag))
    }

    /// Distinct error tags in first-seen order.
    pub fn error_tags(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for tag in self.errors.iter().filter_map(|e| tag_of(e)) {
            if !out.contains(&tag) {
                out.push(tag);
            }
        }
        out
    }
}

fn tag_of(entry: &str) -> Option<&str> {
    entry.split_once(": ").map(|(tag, _)| tag)
}

/// Every intermediate check outcome behind a [`ValidationResult`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationTrace {
    pub draft: DraftStage,
    pub completeness: CompletenessReport,
    pub spam: SpamCheck,
    pub privacy: PrivacyCheck,
    /// `None` when the draft is not terminal and the check was skipped.
    pub duplicate: Option<DuplicateCheck>,
    pub quality: QualityBreakdown,
    pub min_quality: u8,
    pub word_counts: Vec<WordCountIssue>,
    pub category_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    pub result: ValidationResult,
    pub trace: ValidationTrace,
}

/// Composes the independent checks into one verdict. Holds no mutable state;
/// a single instance can validate many submissions concurrently.
pub struct SubmissionValidator {
    config: ValidatorConfig,
    spam: SpamDetector,
    privacy: PrivacyDetector,
}

impl SubmissionValidator {
    pub fn new(config: ValidatorConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            spam: SpamDetector::new()?,
            privacy: PrivacyDetector::new()?,
        })
    }

    pub fn with_defaults() -> CoreResult<Self> {
        Self::new(ValidatorConfig::default())
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn validate(
        &self,
        submission: &Submission,
        corpus: &[ExistingIdea],
        draft: DraftStage,
    ) -> ValidationResult {
        self.validate_with_trace(submission, corpus, draft).result
    }

    pub fn validate_with_trace(
        &self,
        submission: &Submission,
        corpus: &[ExistingIdea],
        draft: DraftStage,
    ) -> ValidationReport {
        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();

        // Required and optional fields.
        let completeness = check_completeness(submission, draft);
        for field in &completeness.missing_required {
            errors.push(tagged(tags::REQUIRED_FIELD_MISSING, field.tag()));
        }
        for field in &completeness.missing_optional {
            if *field != SubmissionField::Category {
                warnings.push(tagged(tags::OPTIONAL_FIELD_EMPTY, field.tag()));
            }
        }
        debug!(
            draft = draft.number(),
            missing = completeness.missing_required.len(),
            "completeness checked"
        );

        let spam = self.spam.check_submission(submission);
        if let Some(reason) = spam.reason.as_deref().filter(|_| spam.is_spam) {
            errors.push(tagged(tags::SPAM, reason));
        }
        debug!(is_spam = spam.is_spam, rule = ?spam.rule_id, "spam checked");

        let privacy = self.privacy.check_submission(submission);
        if let Some(reason) = privacy.reason.as_deref().filter(|_| privacy.has_private_info) {
            errors.push(tagged(tags::PRIVACY, reason));
        }
        debug!(flagged = privacy.has_private_info, rule = ?privacy.rule_id, "privacy checked");

        // Earlier drafts are not public yet and may overlap existing ideas.
        let duplicate = if draft.is_terminal() {
            let d = check_duplicate(submission, corpus);
            if let Some(reason) = d.reason.as_deref().filter(|_| d.is_duplicate) {
                errors.push(tagged(tags::DUPLICATE, reason));
            }
            debug!(corpus = corpus.len(), duplicate = d.is_duplicate, "duplicate checked");
            Some(d)
        } else {
            None
        };

        let quality = score_breakdown(submission, draft);
        let score = quality.total();
        let min_quality = self.config.min_quality.for_stage(draft);
        if score < min_quality {
            errors.push(tagged(
                tags::QUALITY_LOW,
                format!(
                    "Quality score {} is below the minimum of {} for draft {}",
                    score, min_quality, draft
                ),
            ));
        } else if (score as u16) <= min_quality as u16 + self.config.borderline_margin as u16 {
            warnings.push(tagged(
                tags::QUALITY_BORDERLINE,
                format!(
                    "Quality score {} is close to the minimum of {}; consider adding more detail",
                    score, min_quality
                ),
            ));
        }
        debug!(score, min_quality, "quality scored");

        let word_counts = check_word_counts(submission, draft);
        for issue in &word_counts {
            if issue.is_blocking() {
                errors.push(tagged(tags::WORD_COUNT_LOW, issue.describe()));
            } else {
                warnings.push(tagged(tags::WORD_COUNT_HIGH, issue.describe()));
            }
        }

        let category_count = submission.category_count();
        if category_count == 0 {
            warnings.push(tagged(
                tags::CATEGORY_MISSING,
                "Select at least one category",
            ));
        } else if category_count > self.config.max_categories {
            warnings.push(tagged(
                tags::CATEGORY_EXCESS,
                format!(
                    "{} categories selected; consider focusing on at most {}",
                    category_count, self.config.max_categories
                ),
            ));
        }

        let passed = errors.is_empty();
        info!(
            user = %submission.user_name,
            project = %submission.project_name,
            draft = draft.number(),
            passed,
            quality_score = score,
            errors = errors.len(),
            warnings = warnings.len(),
            "submission validated"
        );

        ValidationReport {
            result: ValidationResult {
                passed,
                errors,
                warnings,
                quality_score: score,
                completion_score: completeness.completion_score,
            },
            trace: ValidationTrace {
                draft,
                completeness,
                spam,
                privacy,
                duplicate,
                quality,
                min_quality,
                word_counts,
                category_count,
            },
        }
    }
}
