//! Fuzzy grading of typed translations

use strsim::{jaro_winkler, levenshtein, normalized_levenshtein};

/// Similarity needed to accept a typed answer when none is configured
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Outcome of comparing a typed answer with the expected translation
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub is_correct: bool,
    pub similarity_score: f64,
    pub feedback: String,
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Compare a typed answer against `expected`, tolerating small typos
pub fn check_answer(user_input: &str, expected: &str, threshold: f64) -> MatchResult {
    let input = normalize(user_input);
    let target = normalize(expected);

    if input == target {
        return MatchResult {
            is_correct: true,
            similarity_score: 1.0,
            feedback: "Correct!".to_string(),
        };
    }

    if input.is_empty() {
        return MatchResult {
            is_correct: false,
            similarity_score: 0.0,
            feedback: format!("No answer given. Expected: '{}'", expected),
        };
    }

    // Jaro-Winkler weighs typos near the end of a word more kindly
    let similarity =
        normalized_levenshtein(&input, &target) * 0.4 + jaro_winkler(&input, &target) * 0.6;

    let (is_correct, feedback) = if similarity >= threshold {
        (
            true,
            format!("Close enough! ({}% match, expected '{}')", (similarity * 100.0) as i32, expected),
        )
    } else if similarity >= 0.5 {
        let distance = levenshtein(&input, &target);
        (false, format!("Almost! {} characters off. Expected: '{}'", distance, expected))
    } else {
        (false, format!("Incorrect. Expected: '{}'", expected))
    };

    MatchResult {
        is_correct,
        similarity_score: similarity,
        feedback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_ignores_case_and_spacing() {
        let result = check_answer("  to   RUN ", "To run", DEFAULT_THRESHOLD);
        assert!(result.is_correct);
        assert_eq!(result.similarity_score, 1.0);
    }

    #[test]
    fn small_typo_is_accepted() {
        let result = check_answer("Elefant", "Elephant", DEFAULT_THRESHOLD);
        assert!(result.is_correct, "{result:?}");
        assert!(result.similarity_score < 1.0);
    }

    #[test]
    fn unrelated_word_is_rejected() {
        let result = check_answer("Cheese", "Tiger", DEFAULT_THRESHOLD);
        assert!(!result.is_correct);
        assert!(result.feedback.contains("Tiger"));
    }

    #[test]
    fn empty_input_is_rejected() {
        let result = check_answer("   ", "Milk", DEFAULT_THRESHOLD);
        assert!(!result.is_correct);
        assert_eq!(result.similarity_score, 0.0);
    }

    #[test]
    fn strict_threshold_rejects_typo() {
        let result = check_answer("Elefant", "Elephant", 0.99);
        assert!(!result.is_correct);
    }
}
