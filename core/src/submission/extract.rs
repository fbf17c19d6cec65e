use crate::submission::fields::SubmissionField;
use crate::submission::model::Submission;

/// Flattens every populated text-bearing field into one space-separated
/// string, in [`SubmissionField::EXTRACTION_ORDER`]. Blank fields are skipped.
/// Category tags are lowercased.
pub fn extract_text(submission: &Submission) -> String {
    let mut parts: Vec<String> = Vec::new();
    for field in SubmissionField::EXTRACTION_ORDER {
        if field == SubmissionField::Category {
            let tags: Vec<String> = submission.categories().map(str::to_lowercase).collect();
            if !tags.is_empty() {
                parts.push(tags.join(" "));
            }
            continue;
        }
        if let Some(text) = submission.present_text(field) {
            parts.push(text.to_string());
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_fields_in_fixed_order_and_skips_blanks() {
        let s = Submission {
            heard_about: Some("friend".to_string()),
            product_idea: Some("idea".to_string()),
            customer_profile: Some("profile".to_string()),
            pain_points: Some("  ".to_string()),
            category: vec!["fintech".to_string(), "saas".to_string()],
            mvp_link: Some("https://example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(extract_text(&s), "profile idea fintech saas friend");
    }

    #[test]
    fn category_tags_are_lowercased() {
        let s = Submission {
            product_idea: Some("Clinic Booking".to_string()),
            category: vec!["HEALTHCARE".to_string(), "B2B".to_string()],
            ..Default::default()
        };
        assert_eq!(extract_text(&s), "Clinic Booking healthcare b2b");
    }

    #[test]
    fn empty_submission_yields_empty_text() {
        assert_eq!(extract_text(&Submission::default()), "");
    }
}
