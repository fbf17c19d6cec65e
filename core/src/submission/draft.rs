use crate::error::{CoreError, CoreResult};
use crate::submission::fields::SubmissionField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three successive drafts of a project. Draft 3 is terminal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub enum DraftStage {
    #[default]
    First,
    Second,
    Final,
}

impl DraftStage {
    pub const ALL: [DraftStage; 3] = [DraftStage::First, DraftStage::Second, DraftStage::Final];

    pub fn number(self) -> u8 {
        match self {
            DraftStage::First => 1,
            DraftStage::Second => 2,
            DraftStage::Final => 3,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == DraftStage::Final
    }

    pub fn next(self) -> Option<DraftStage> {
        match self {
            DraftStage::First => Some(DraftStage::Second),
            DraftStage::Second => Some(DraftStage::Final),
            DraftStage::Final => None,
        }
    }

    /// Fields that must be present for this stage, cumulative across stages.
    pub fn required_fields(self) -> Vec<SubmissionField> {
        let mut fields = vec![
            SubmissionField::CustomerProfile,
            SubmissionField::ProductIdea,
            SubmissionField::PainPoints,
            SubmissionField::Alternatives,
        ];
        if self >= DraftStage::Second {
            fields.push(SubmissionField::MarketValidation);
            fields.push(SubmissionField::CompetitorResearch);
        }
        if self >= DraftStage::Final {
            fields.push(SubmissionField::InvestorPitch);
        }
        fields
    }

    /// Fields tracked for completion but never blocking.
    pub fn optional_fields(self) -> Vec<SubmissionField> {
        let mut fields = vec![SubmissionField::Category, SubmissionField::HeardAbout];
        if self >= DraftStage::Final {
            fields.push(SubmissionField::MvpLink);
        }
        fields
    }
}

impl TryFrom<u8> for DraftStage {
    type Error = CoreError;

    fn try_from(n: u8) -> CoreResult<Self> {
        match n {
            1 => Ok(DraftStage::First),
            2 => Ok(DraftStage::Second),
            3 => Ok(DraftStage::Final),
            other => Err(CoreError::InvalidInput(format!(
                "draft number must be 1, 2 or 3 (got {})",
                other
            ))),
        }
    }
}

impl From<DraftStage> for u8 {
    fn from(stage: DraftStage) -> u8 {
        stage.number()
    }
}

impl fmt::Display for DraftStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A draft already stored for a (user, project) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DraftRecord {
    pub user_name: String,
    pub project_name: String,
    pub draft_number: DraftStage,
    /// Placeholder rows created by the store before a draft is submitted.
    #[serde(default)]
    pub placeholder: bool,
}

fn accepted_count(records: &[DraftRecord], user_name: &str, project_name: &str) -> usize {
    records
        .iter()
        .filter(|r| !r.placeholder && r.user_name == user_name && r.project_name == project_name)
        .count()
}

/// Next draft for a (user, project) pair: one more than the accepted drafts so far.
pub fn next_draft_stage(
    records: &[DraftRecord],
    user_name: &str,
    project_name: &str,
) -> CoreResult<DraftStage> {
    let count = accepted_count(records, user_name, project_name);
    match count {
        0 => Ok(DraftStage::First),
        1 => Ok(DraftStage::Second),
        2 => Ok(DraftStage::Final),
        _ => Err(CoreError::InvalidInput(format!(
            "project {}/{} already has a final draft",
            user_name, project_name
        ))),
    }
}

pub fn check_draft_sequence(
    records: &[DraftRecord],
    user_name: &str,
    project_name: &str,
    stage: DraftStage,
) -> CoreResult<()> {
    let expected = next_draft_stage(records, user_name, project_name)?;
    if expected != stage {
        return Err(CoreError::InvalidInput(format!(
            "project {}/{} expects draft {} but got draft {}",
            user_name, project_name, expected, stage
        )));
    }
    Ok(())
}

/// `is_final` only holds for the terminal draft after explicit confirmation.
pub fn finalize(stage: DraftStage, confirmed: bool) -> bool {
    stage.is_terminal() && confirmed
}
