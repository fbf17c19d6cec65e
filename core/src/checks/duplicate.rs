use crate::checks::text::normalize;
use crate::submission::model::{ExistingIdea, Submission};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DUPLICATE_THRESHOLD: f64 = 0.70;
const WORD_WEIGHT: f64 = 0.7;
const BIGRAM_WEIGHT: f64 = 0.3;
const MIN_WORD_CHARS: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DuplicateCheck {
    pub is_duplicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    /// Label of the corpus entry that crossed the threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
}

impl DuplicateCheck {
    fn unique() -> Self {
        DuplicateCheck {
            is_duplicate: false,
            reason: None,
            similarity: None,
            matched: None,
        }
    }
}

fn comparison_text(
    customer_profile: Option<&str>,
    product_idea: Option<&str>,
    pain_points: Option<&str>,
) -> String {
    let joined = [customer_profile, product_idea, pain_points]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    normalize(&joined)
}

pub fn submission_comparison_text(s: &Submission) -> String {
    comparison_text(
        s.customer_profile.as_deref(),
        s.product_idea.as_deref(),
        s.pain_points.as_deref(),
    )
}

pub fn idea_comparison_text(i: &ExistingIdea) -> String {
    comparison_text(
        i.customer_profile.as_deref(),
        i.product_idea.as_deref(),
        i.pain_points.as_deref(),
    )
}

fn jaccard<T: Eq + std::hash::Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

fn word_set(normalized: &str) -> HashSet<&str> {
    normalized
        .split(' ')
        .filter(|w| w.chars().count() >= MIN_WORD_CHARS)
        .collect()
}

fn bigram_set(normalized: &str) -> HashSet<(char, char)> {
    let chars: Vec<char> = normalized.chars().collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Weighted blend of word-set and character-bigram Jaccard similarity over
/// two already-normalized strings. When neither side has a long enough word
/// the bigram score stands alone. Two empty strings score 0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let (words_a, words_b) = (word_set(a), word_set(b));
    let bigrams = jaccard(&bigram_set(a), &bigram_set(b));
    if words_a.is_empty() && words_b.is_empty() {
        return bigrams;
    }
    WORD_WEIGHT * jaccard(&words_a, &words_b) + BIGRAM_WEIGHT * bigrams
}

/// Compares the candidate against each corpus entry in order and stops at the
/// first one above [`DUPLICATE_THRESHOLD`].
pub fn check_duplicate(submission: &Submission, corpus: &[ExistingIdea]) -> DuplicateCheck {
    if corpus.is_empty() {
        return DuplicateCheck::unique();
    }
    let candidate = submission_comparison_text(submission);
    if candidate.is_empty() {
        return DuplicateCheck::unique();
    }

    for (index, idea) in corpus.iter().enumerate() {
        let score = similarity(&candidate, &idea_comparison_text(idea));
        if score > DUPLICATE_THRESHOLD {
            let label = idea.label(index);
            let percent = (score * 100.0).round() as u32;
            return DuplicateCheck {
                is_duplicate: true,
                reason: Some(format!(
                    "Very similar to existing idea {} ({}% similarity)",
                    label, percent
                )),
                similarity: Some(score),
                matched: Some(label),
            };
        }
    }
    DuplicateCheck::unique()
}
