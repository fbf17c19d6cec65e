use crate::checks::text::{char_len, keyword_hits, word_count};
use crate::submission::draft::DraftStage;
use crate::submission::extract::extract_text;
use crate::submission::fields::SubmissionField;
use crate::submission::model::Submission;
use serde::{Deserialize, Serialize};

const PROBLEM_KEYWORDS: &[&str] = &[
    "problem", "frustrat", "bottleneck", "struggle", "difficult", "pain", "challenge",
    "inefficien", "waste", "costly", "time-consuming", "lack", "annoy", "stress",
];

const AUDIENCE_KEYWORDS: &[&str] = &[
    "aged", "age ", "years old", "parent", "student", "professional", "small business",
    "owner", "income", "urban", "rural", "millennial", "gen z", "senior", "retiree",
    "families", "teacher", "freelancer", "manager", "employee", "household",
];

const SOLUTION_KEYWORDS: &[&str] = &[
    "app", "platform", "tool", "service", "automat", "software", "marketplace",
    "subscription", "dashboard", "integrat", "mobile", "device", "machine learning",
    "artificial intelligence", "algorithm", "sensor",
];

const DIFFERENTIATION_KEYWORDS: &[&str] = &[
    "competitor", "alternative", "unlike", "instead", "currently", "existing", "expensive",
    "cheaper", "faster", "better", "differen", "compared", "manual", "spreadsheet",
];

const RESEARCH_KEYWORDS: &[&str] = &[
    "research", "survey", "interview", "data", "validat", "tested", "pilot", "study",
    "feedback", "metric", "percent", "%", "waitlist", "pre-order", "revenue",
];

const VAGUE_MARKERS: &[&str] = &[
    "maybe", "probably", "i think", "i guess", "kind of", "sort of", "hopefully",
    "somehow", "perhaps", "something like", "and so on",
];

/// One text sub-score: base points once the text is long enough, keyword
/// points up to a cap, and cumulative length bonuses.
struct SectionRule {
    min_chars: usize,
    base: i32,
    keywords: &'static [&'static str],
    points_per_keyword: i32,
    keyword_cap: i32,
    length_bonuses: &'static [(usize, i32)],
}

const PROBLEM_RULE: SectionRule = SectionRule {
    min_chars: 30,
    base: 8,
    keywords: PROBLEM_KEYWORDS,
    points_per_keyword: 2,
    keyword_cap: 8,
    length_bonuses: &[(100, 4), (180, 5)],
};

const AUDIENCE_RULE: SectionRule = SectionRule {
    min_chars: 25,
    base: 6,
    keywords: AUDIENCE_KEYWORDS,
    points_per_keyword: 2,
    keyword_cap: 8,
    length_bonuses: &[(80, 3), (150, 3)],
};

const SOLUTION_RULE: SectionRule = SectionRule {
    min_chars: 30,
    base: 8,
    keywords: SOLUTION_KEYWORDS,
    points_per_keyword: 2,
    keyword_cap: 8,
    length_bonuses: &[(120, 4), (200, 5)],
};

const DIFFERENTIATION_RULE: SectionRule = SectionRule {
    min_chars: 15,
    base: 5,
    keywords: DIFFERENTIATION_KEYWORDS,
    points_per_keyword: 2,
    keyword_cap: 7,
    length_bonuses: &[(60, 3)],
};

const CATEGORY_POINTS: i32 = 2;
const CATEGORY_CAP: i32 = 8;
const CATEGORY_FOCUS_LIMIT: usize = 3;
const CATEGORY_UNFOCUSED_PENALTY: i32 = 2;

const RESEARCH_CAP: i32 = 5;
const VAGUE_PENALTY: i32 = 2;
const VAGUE_CAP: i32 = 10;

const SUBSTANTIAL_STAGE_TEXT_CHARS: usize = 100;
const MARKET_VALIDATION_BONUS: i32 = 5;
const COMPETITOR_RESEARCH_BONUS: i32 = 5;
const INVESTOR_PITCH_MIN_WORDS: usize = 20;
const INVESTOR_PITCH_BONUS: i32 = 10;
const MVP_LINK_BONUS: i32 = 5;

impl SectionRule {
    fn score(&self, text: Option<&str>) -> i32 {
        let Some(text) = text else { return 0 };
        let len = char_len(text);
        if len <= self.min_chars {
            return 0;
        }
        let lower = text.to_lowercase();
        let hits = keyword_hits(&lower, self.keywords) as i32;
        let mut points = self.base + (hits * self.points_per_keyword).min(self.keyword_cap);
        for (threshold, bonus) in self.length_bonuses {
            if len >= *threshold {
                points += bonus;
            }
        }
        points
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualityBreakdown {
    pub problem: i32,
    pub audience: i32,
    pub solution: i32,
    pub differentiation: i32,
    pub categories: i32,
    pub indicators: i32,
    pub stage_bonus: i32,
}

impl QualityBreakdown {
    /// Sum of all sub-scores clamped to 0..=100.
    pub fn total(&self) -> u8 {
        let raw = self.problem
            + self.audience
            + self.solution
            + self.differentiation
            + self.categories
            + self.indicators
            + self.stage_bonus;
        raw.clamp(0, 100) as u8
    }
}

fn category_points(count: usize) -> i32 {
    let mut points = (count as i32 * CATEGORY_POINTS).min(CATEGORY_CAP);
    if count > CATEGORY_FOCUS_LIMIT {
        points -= CATEGORY_UNFOCUSED_PENALTY;
    }
    points
}

fn indicator_points(whole_text_lower: &str) -> i32 {
    let research = (keyword_hits(whole_text_lower, RESEARCH_KEYWORDS) as i32).min(RESEARCH_CAP);
    let vague = (keyword_hits(whole_text_lower, VAGUE_MARKERS) as i32 * VAGUE_PENALTY).min(VAGUE_CAP);
    research - vague
}

/// A link counts when it parses as an absolute http(s) URL with a host.
pub fn is_valid_mvp_link(link: &str) -> bool {
    match url::Url::parse(link.trim()) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host_str().is_some(),
        Err(_) => false,
    }
}

fn stage_bonus(submission: &Submission, stage: DraftStage) -> i32 {
    let mut bonus = 0;
    let substantial = |field: SubmissionField| {
        submission
            .present_text(field)
            .map(|t| char_len(t) >= SUBSTANTIAL_STAGE_TEXT_CHARS)
            .unwrap_or(false)
    };
    if stage >= DraftStage::Second {
        if substantial(SubmissionField::MarketValidation) {
            bonus += MARKET_VALIDATION_BONUS;
        }
        if substantial(SubmissionField::CompetitorResearch) {
            bonus += COMPETITOR_RESEARCH_BONUS;
        }
    }
    if stage >= DraftStage::Final {
        let pitch_words = submission
            .present_text(SubmissionField::InvestorPitch)
            .map(word_count)
            .unwrap_or(0);
        if pitch_words >= INVESTOR_PITCH_MIN_WORDS {
            bonus += INVESTOR_PITCH_BONUS;
        }
        if submission
            .present_text(SubmissionField::MvpLink)
            .map(is_valid_mvp_link)
            .unwrap_or(false)
        {
            bonus += MVP_LINK_BONUS;
        }
    }
    bonus
}

pub fn score_breakdown(submission: &Submission, stage: DraftStage) -> QualityBreakdown {
    let whole = extract_text(submission).to_lowercase();
    QualityBreakdown {
        problem: PROBLEM_RULE.score(submission.present_text(SubmissionField::PainPoints)),
        audience: AUDIENCE_RULE.score(submission.present_text(SubmissionField::CustomerProfile)),
        solution: SOLUTION_RULE.score(submission.present_text(SubmissionField::ProductIdea)),
        differentiation: DIFFERENTIATION_RULE
            .score(submission.present_text(SubmissionField::Alternatives)),
        categories: category_points(submission.category_count()),
        indicators: indicator_points(&whole),
        stage_bonus: stage_bonus(submission, stage),
    }
}

pub fn quality_score(submission: &Submission, stage: DraftStage) -> u8 {
    score_breakdown(submission, stage).total()
}
