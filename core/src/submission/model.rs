use serde::{Deserialize, Deserializer, Serialize};

use crate::submission::fields::SubmissionField;

/// A candidate startup-idea submission for one draft of a (user, project) pair.
///
/// Text fields are `None` when the caller did not supply them; an empty or
/// whitespace-only string is kept as-is and treated as absent by the checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submission {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub customer_profile: Option<String>,
    #[serde(default)]
    pub product_idea: Option<String>,
    #[serde(default)]
    pub pain_points: Option<String>,
    #[serde(default)]
    pub alternatives: Option<String>,
    #[serde(default)]
    pub market_validation: Option<String>,
    #[serde(default)]
    pub competitor_research: Option<String>,
    #[serde(default)]
    pub investor_pitch: Option<String>,
    #[serde(default)]
    pub mvp_link: Option<String>,
    #[serde(default, deserialize_with = "deserialize_categories")]
    pub category: Vec<String>,
    #[serde(default)]
    pub heard_about: Option<String>,
}

impl Submission {
    /// Raw value of a text field. `Category` has no single text value; use
    /// [`Submission::category`] instead.
    pub fn text(&self, field: SubmissionField) -> Option<&str> {
        let v = match field {
            SubmissionField::CustomerProfile => &self.customer_profile,
            SubmissionField::ProductIdea => &self.product_idea,
            SubmissionField::PainPoints => &self.pain_points,
            SubmissionField::Alternatives => &self.alternatives,
            SubmissionField::MarketValidation => &self.market_validation,
            SubmissionField::CompetitorResearch => &self.competitor_research,
            SubmissionField::InvestorPitch => &self.investor_pitch,
            SubmissionField::MvpLink => &self.mvp_link,
            SubmissionField::HeardAbout => &self.heard_about,
            SubmissionField::Category => return None,
        };
        v.as_deref()
    }

    /// Trimmed field text, `None` when absent or blank.
    pub fn present_text(&self, field: SubmissionField) -> Option<&str> {
        if field == SubmissionField::Category {
            return None;
        }
        self.text(field).map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn is_present(&self, field: SubmissionField) -> bool {
        match field {
            SubmissionField::Category => self.categories().next().is_some(),
            other => self.present_text(other).is_some(),
        }
    }

    /// Category tags with blank entries skipped.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.category
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }

    pub fn category_count(&self) -> usize {
        self.categories().count()
    }
}

/// A previously accepted, published idea used as the duplicate-detection corpus.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExistingIdea {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub customer_profile: Option<String>,
    #[serde(default)]
    pub product_idea: Option<String>,
    #[serde(default)]
    pub pain_points: Option<String>,
    #[serde(default)]
    pub alternatives: Option<String>,
    #[serde(default, deserialize_with = "deserialize_categories")]
    pub category: Vec<String>,
}

impl ExistingIdea {
    /// Human-readable handle used in duplicate reasons.
    pub fn label(&self, index: usize) -> String {
        if let Some(id) = self.id.as_deref().filter(|s| !s.trim().is_empty()) {
            return id.trim().to_string();
        }
        if !self.project_name.trim().is_empty() {
            return self.project_name.trim().to_string();
        }
        format!("#{}", index + 1)
    }
}

impl From<&Submission> for ExistingIdea {
    fn from(s: &Submission) -> Self {
        ExistingIdea {
            id: None,
            user_name: s.user_name.clone(),
            project_name: s.project_name.clone(),
            customer_profile: s.customer_profile.clone(),
            product_idea: s.product_idea.clone(),
            pain_points: s.pain_points.clone(),
            alternatives: s.alternatives.clone(),
            category: s.category.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryInput {
    One(String),
    Many(Vec<Option<String>>),
}

/// Accepts `"tag"`, `["a", "b"]` or `null` and always yields a list.
fn deserialize_categories<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<CategoryInput> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(CategoryInput::One(s)) => vec![s],
        Some(CategoryInput::Many(v)) => v.into_iter().flatten().collect(),
    })
}
