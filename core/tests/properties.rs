mod common;

use common::{as_existing, detailed_final_submission};
use idea_core::checks::duplicate::{check_duplicate, similarity, submission_comparison_text};
use idea_core::checks::quality::quality_score;
use idea_core::checks::spam::SpamDetector;
use idea_core::{DraftStage, Submission, SubmissionValidator};
use proptest::prelude::*;

/// Draft-1 required fields, in required order.
fn scored_field_at(s: &mut Submission, index: usize) -> &mut Option<String> {
    match index {
        0 => &mut s.customer_profile,
        1 => &mut s.product_idea,
        2 => &mut s.pain_points,
        _ => &mut s.alternatives,
    }
}

fn words(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{2,10}", 0..max).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn any_bare_url_is_spam(
        before in words(12),
        after in words(12),
        secure in any::<bool>(),
        host in "[a-z]{3,12}\\.(com|org|io)",
    ) {
        let scheme = if secure { "https" } else { "http" };
        let text = format!("{} {}://{} {}", before, scheme, host, after);
        prop_assert!(SpamDetector::new().unwrap().check_text(&text).is_spam);
    }

    #[test]
    fn density_rule_needs_more_than_twenty_words(
        picks in prop::collection::vec(0usize..3, 0..=20),
    ) {
        let vocab = ["tomato", "basil", "garlic"];
        let text = picks.iter().map(|i| vocab[*i]).collect::<Vec<_>>().join(" ");
        let r = SpamDetector::new().unwrap().check_text(&text);
        prop_assert_ne!(r.rule_id.as_deref(), Some("DENSITY"));
    }

    #[test]
    fn quality_never_drops_as_a_scored_field_grows(
        field in 0usize..4,
        a in 0usize..=400,
        b in 0usize..=400,
    ) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        let base = detailed_final_submission();
        let full = scored_field_at(&mut base.clone(), field).clone().unwrap_or_default();
        let with_len = |n: usize| {
            let mut s = base.clone();
            *scored_field_at(&mut s, field) = Some(full[..n.min(full.len())].to_string());
            s
        };
        prop_assert!(
            quality_score(&with_len(short), DraftStage::First)
                <= quality_score(&with_len(long), DraftStage::First)
        );
    }

    #[test]
    fn each_missing_draft_one_field_is_one_error(mask in 0u8..16, blank in any::<bool>()) {
        let mut s = detailed_final_submission();
        let required = DraftStage::First.required_fields();
        let mut expected = Vec::new();
        for (i, field) in required.iter().enumerate() {
            if mask & (1 << i) != 0 {
                *scored_field_at(&mut s, i) = if blank { Some("   ".to_string()) } else { None };
                expected.push(format!("REQUIRED_FIELD_MISSING: {}", field.tag()));
            }
        }
        let r = SubmissionValidator::with_defaults()
            .unwrap()
            .validate(&s, &[], DraftStage::First);
        let missing: Vec<String> = r
            .errors
            .iter()
            .filter(|e| e.starts_with("REQUIRED_FIELD_MISSING: "))
            .cloned()
            .collect();
        prop_assert_eq!(missing, expected);
        prop_assert_eq!(r.passed, mask == 0);
    }

    #[test]
    fn identical_normalized_text_is_a_full_duplicate(
        profile in "[a-z]{2,10}( [a-z]{2,10}){1,8}",
        idea in "[a-z]{2,10}( [a-z]{2,10}){1,8}",
    ) {
        let candidate = Submission {
            customer_profile: Some(profile.to_uppercase()),
            product_idea: Some(format!("{}!", idea)),
            ..Default::default()
        };
        let existing = Submission {
            customer_profile: Some(profile.clone()),
            product_idea: Some(format!("  {}  ", idea)),
            ..Default::default()
        };
        let a = submission_comparison_text(&candidate);
        let b = submission_comparison_text(&existing);
        prop_assert_eq!(&a, &b);
        prop_assert!((similarity(&a, &b) - 1.0).abs() < 1e-9);
        prop_assert!(check_duplicate(&candidate, &[as_existing(&existing, "x")]).is_duplicate);
    }

    #[test]
    fn validation_is_idempotent(idea in "\\PC{0,200}", draft in 1u8..=3) {
        let v = SubmissionValidator::with_defaults().unwrap();
        let draft = DraftStage::try_from(draft).unwrap();
        let s = Submission {
            product_idea: Some(idea),
            ..detailed_final_submission()
        };
        let corpus = vec![as_existing(&detailed_final_submission(), "seed")];
        let first = v.validate(&s, &corpus, draft);
        let second = v.validate(&s, &corpus, draft);
        prop_assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
        prop_assert_eq!(first, second);
    }
}
