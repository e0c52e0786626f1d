// Sentence matches: the fine-grained evidence behind a similarity score.

use serde::{Deserialize, Serialize};

use crate::output::truncate_chars;

/// A sentence of the submitted document that closely matches a sentence in
/// a prior document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceMatch {
    /// The submitted sentence, truncated for display
    pub sentence: String,
    /// Sentence similarity (0-100), computed on the untruncated sentence
    pub similarity: u8,
    /// Name of the prior document containing the matching sentence
    pub source_file: String,
}

impl SentenceMatch {
    pub fn new(sentence: &str, similarity: u8, source_file: &str, max_display_chars: usize) -> Self {
        Self {
            sentence: truncate_chars(sentence, max_display_chars),
            similarity,
            source_file: source_file.to_string(),
        }
    }
}

/// Sort candidates by similarity, highest first, and keep the top `limit`.
///
/// The sort is stable: equal scores keep their encounter order.
pub fn rank(mut candidates: Vec<SentenceMatch>, limit: usize) -> Vec<SentenceMatch> {
    candidates.sort_by(|a, b| b.similarity.cmp(&a.similarity));
    candidates.truncate(limit);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(sentence: &str, similarity: u8) -> SentenceMatch {
        SentenceMatch::new(sentence, similarity, "doc", 200)
    }

    #[test]
    fn test_rank_orders_descending_and_limits() {
        let ranked = rank(
            vec![m("a", 80), m("b", 100), m("c", 75), m("d", 90), m("e", 85), m("f", 95)],
            5,
        );
        let scores: Vec<u8> = ranked.iter().map(|r| r.similarity).collect();
        assert_eq!(scores, vec![100, 95, 90, 85, 80]);
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let ranked = rank(vec![m("first", 80), m("second", 90), m("third", 80)], 5);
        let order: Vec<&str> = ranked.iter().map(|r| r.sentence.as_str()).collect();
        assert_eq!(order, vec!["second", "first", "third"]);
    }

    #[test]
    fn test_long_sentence_truncated_for_display() {
        let long = "x".repeat(250);
        let matched = SentenceMatch::new(&long, 90, "doc", 200);
        assert_eq!(matched.sentence, format!("{}...", "x".repeat(200)));
        assert_eq!(matched.similarity, 90);
    }
}
