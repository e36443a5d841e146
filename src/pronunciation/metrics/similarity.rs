use serde::{Deserialize, Serialize};

use crate::pronunciation::alignment::dictionary::normalize_token;
use crate::pronunciation::alignment::matcher::SequenceMatcher;

/// Unit over which the lexical similarity ratio is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityGranularity {
    /// Whitespace-separated words, compared after stripping punctuation.
    #[default]
    Words,
    /// Individual characters, spaces included.
    Characters,
}

/// Word-level similarity ratio in `[0, 1]`.
///
/// The ratio is directional: swapping `a` and `b` can change tie-breaking and,
/// for some inputs, the result.
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_with(a, b, SimilarityGranularity::Words)
}

pub fn similarity_with(a: &str, b: &str, granularity: SimilarityGranularity) -> f64 {
    match granularity {
        SimilarityGranularity::Words => {
            let a = words(a);
            let b = words(b);
            SequenceMatcher::new(&a, &b).ratio()
        }
        SimilarityGranularity::Characters => {
            let a: Vec<char> = a.chars().collect();
            let b: Vec<char> = b.chars().collect();
            SequenceMatcher::new(&a, &b).ratio()
        }
    }
}

/// Tokens normalized the same way dictionary lookups are, so `"Hello,"`
/// and `"hello"` compare equal. Tokens with no letters are dropped.
fn words(text: &str) -> Vec<String> {
    text.split_whitespace().filter_map(normalize_token).collect()
}

#[cfg(test)]
mod tests {
    use super::{similarity, similarity_with, SimilarityGranularity};

    #[test]
    fn identical_text_scores_one() {
        assert_eq!(similarity("hello world", "hello world"), 1.0);
        assert_eq!(
            similarity_with("hello world", "hello world", SimilarityGranularity::Characters),
            1.0
        );
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn half_the_words_shared() {
        assert!((similarity("good evening", "good morning") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn characters_give_partial_credit_inside_words() {
        let score =
            similarity_with("good evening", "good morning", SimilarityGranularity::Characters);
        assert!((score - 0.75).abs() < 1e-12);
    }

    #[test]
    fn disjoint_text_scores_zero() {
        assert_eq!(similarity("yes", "no"), 0.0);
        assert_eq!(similarity("", "hello"), 0.0);
    }

    #[test]
    fn punctuation_and_case_do_not_split_words() {
        assert_eq!(similarity("Hello, world.", "hello world"), 1.0);
        assert_eq!(similarity("don't stop!", "DON'T stop"), 1.0);
        assert_eq!(similarity("hello - world", "hello world"), 1.0);
    }

    #[test]
    fn repeated_calls_agree() {
        let first = similarity("see you tomorrow", "see you today");
        let second = similarity("see you tomorrow", "see you today");
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
