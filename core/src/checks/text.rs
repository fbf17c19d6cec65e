/// Lowercase word tokens longer than two characters, split on anything that
/// is not alphanumeric.
pub fn content_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Whitespace-delimited token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lowercase, drop everything that is neither a word character nor
/// whitespace, collapse whitespace runs, trim.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of distinct keywords that occur in `haystack` (already lowercased).
pub fn keyword_hits(haystack: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| haystack.contains(*k)).count()
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_words_drop_short_tokens_and_punctuation() {
        assert_eq!(
            content_words("An APP, for busy-parents!"),
            vec!["app", "for", "busy", "parents"]
        );
    }

    #[test]
    fn normalize_strips_symbols_and_collapses_space() {
        assert_eq!(normalize("  Hello,   World!\n\tIt's  me "), "hello world its me");
    }

    #[test]
    fn word_count_ignores_extra_whitespace() {
        assert_eq!(word_count("  one  two\nthree  "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn keyword_hits_count_distinct_keywords() {
        assert_eq!(keyword_hits("problem problem bottleneck", &["problem", "bottleneck", "pain"]), 2);
    }
}
