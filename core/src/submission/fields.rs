use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionField {
    CustomerProfile,
    ProductIdea,
    PainPoints,
    Alternatives,
    MarketValidation,
    CompetitorResearch,
    InvestorPitch,
    MvpLink,
    Category,
    HeardAbout,
}

impl SubmissionField {
    /// Text-bearing fields in extraction order. `mvp_link` is excluded so the
    /// link itself never reaches the URL spam rule.
    pub const EXTRACTION_ORDER: [SubmissionField; 9] = [
        SubmissionField::CustomerProfile,
        SubmissionField::ProductIdea,
        SubmissionField::PainPoints,
        SubmissionField::Alternatives,
        SubmissionField::MarketValidation,
        SubmissionField::CompetitorResearch,
        SubmissionField::InvestorPitch,
        SubmissionField::Category,
        SubmissionField::HeardAbout,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            SubmissionField::CustomerProfile => "customer_profile",
            SubmissionField::ProductIdea => "product_idea",
            SubmissionField::PainPoints => "pain_points",
            SubmissionField::Alternatives => "alternatives",
            SubmissionField::MarketValidation => "market_validation",
            SubmissionField::CompetitorResearch => "competitor_research",
            SubmissionField::InvestorPitch => "investor_pitch",
            SubmissionField::MvpLink => "mvp_link",
            SubmissionField::Category => "category",
            SubmissionField::HeardAbout => "heard_about",
        }
    }
}

impl fmt::Display for SubmissionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
