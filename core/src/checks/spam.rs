use crate::checks::text::content_words;
use crate::error::CoreResult;
use crate::patterns::{spam_table, CompiledTable};
use crate::submission::extract::extract_text;
use crate::submission::model::Submission;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const MIN_UNIQUE_RATIO: f64 = 0.25;
const DENSITY_MIN_WORDS: usize = 20;
const MAX_WORD_SHARE: f64 = 0.15;
const REPETITION_MIN_WORDS: usize = 30;

pub const REASON_LOW_QUALITY: &str = "Low content quality detected";
pub const REASON_REPETITION: &str = "Excessive word repetition detected";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpamCheck {
    pub is_spam: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Pattern rule id, or `DENSITY`/`REPETITION` for the lexical rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

impl SpamCheck {
    fn clean() -> Self {
        SpamCheck {
            is_spam: false,
            reason: None,
            rule_id: None,
        }
    }

    fn flagged(reason: &str, rule_id: &str) -> Self {
        SpamCheck {
            is_spam: true,
            reason: Some(reason.to_string()),
            rule_id: Some(rule_id.to_string()),
        }
    }
}

pub struct SpamDetector {
    table: &'static CompiledTable,
}

impl SpamDetector {
    pub fn new() -> CoreResult<Self> {
        Ok(Self {
            table: spam_table()?,
        })
    }

    pub fn check_submission(&self, submission: &Submission) -> SpamCheck {
        self.check_text(&extract_text(submission))
    }

    /// Promotional patterns, then lexical density, then repetition; first hit wins.
    pub fn check_text(&self, text: &str) -> SpamCheck {
        if let Some(rule) = self.table.first_match(text) {
            return SpamCheck::flagged(&rule.reason, &rule.rule_id);
        }

        let words = content_words(text);
        let total = words.len();
        if total == 0 {
            return SpamCheck::clean();
        }

        let mut freq: HashMap<&str, usize> = HashMap::new();
        for w in &words {
            *freq.entry(w.as_str()).or_insert(0) += 1;
        }

        let unique_ratio = freq.len() as f64 / total as f64;
        if unique_ratio < MIN_UNIQUE_RATIO && total > DENSITY_MIN_WORDS {
            return SpamCheck::flagged(REASON_LOW_QUALITY, "DENSITY");
        }

        let max_freq = freq.values().copied().max().unwrap_or(0);
        if max_freq as f64 > total as f64 * MAX_WORD_SHARE && total > REPETITION_MIN_WORDS {
            return SpamCheck::flagged(REASON_REPETITION, "REPETITION");
        }

        SpamCheck::clean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> SpamDetector {
        SpamDetector::new().unwrap()
    }

    #[test]
    fn promotional_phrase_is_spam() {
        let r = detector().check_text("BUY NOW!!! LIMITED TIME DISCOUNT www.example.com");
        assert!(r.is_spam);
        assert_eq!(
            r.reason.as_deref(),
            Some("Contains promotional/marketing content")
        );
    }

    #[test]
    fn shouting_is_case_sensitive() {
        assert!(detector().check_text("we are ABSOLUTELYSURE of it").is_spam);
        assert!(!detector().check_text("we are absolutelysure of it").is_spam);
    }

    #[test]
    fn gibberish_filler_hits_density_rule() {
        let text = "foo bar baz ".repeat(10);
        let r = detector().check_text(&text);
        assert!(r.is_spam);
        assert_eq!(r.reason.as_deref(), Some(REASON_LOW_QUALITY));
    }

    #[test]
    fn density_rule_needs_more_than_twenty_words() {
        let text = "foo bar ".repeat(10);
        assert!(!detector().check_text(&text).is_spam);
    }

    #[test]
    fn single_dominant_word_hits_repetition_rule() {
        let mut text = String::new();
        for i in 0..30 {
            text.push_str(&format!("word{} ", i));
        }
        text.push_str(&"again ".repeat(8));
        let r = detector().check_text(&text);
        assert!(r.is_spam);
        assert_eq!(r.reason.as_deref(), Some(REASON_REPETITION));
    }

    #[test]
    fn ordinary_prose_is_clean() {
        let text = "Freelance designers lose hours every week chasing unpaid invoices \
                    and reconciling payments across several banking apps.";
        assert_eq!(detector().check_text(text), SpamCheck::clean());
    }
}
