// Tokenizer / segmenter.
//
// Turns raw document text into the two views the similarity engine works on:
// a sequence of significant words (whole-document and sentence comparison)
// and an ordered sequence of candidate sentences (fine-grained matching).

use std::sync::{Arc, LazyLock};

use regex_lite::Regex;

use super::stop_words::StopWordSet;

/// Minimum length of a significant word, in characters.
pub const MIN_WORD_LENGTH: usize = 3;

/// Minimum trimmed length of a retained sentence, in characters.
pub const MIN_SENTENCE_LENGTH: usize = 15;

/// One or more consecutive sentence delimiters form a single boundary.
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence boundary pattern is valid"));

/// Immutable tokenizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerConfig {
    pub min_word_length: usize,
    pub min_sentence_length: usize,
    /// Strip leading/trailing ASCII punctuation from a token before the
    /// alphabetic check, so "runs." counts as "runs". Interior punctuation
    /// and digits still disqualify the whole token.
    pub trim_edge_punctuation: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            min_word_length: MIN_WORD_LENGTH,
            min_sentence_length: MIN_SENTENCE_LENGTH,
            trim_edge_punctuation: true,
        }
    }
}

/// Splits text into significant words and sentences.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: TokenizerConfig,
    stop_words: Arc<StopWordSet>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default(), StopWordSet::shared())
    }
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig, stop_words: Arc<StopWordSet>) -> Self {
        Self { config, stop_words }
    }

    pub fn config(&self) -> TokenizerConfig {
        self.config
    }

    /// Lower-cased, alphabetic-only, non-stop-word tokens of at least
    /// `min_word_length` characters, in order of appearance. Duplicates are kept.
    pub fn significant_words(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        lower
            .split_whitespace()
            .map(|token| {
                if self.config.trim_edge_punctuation {
                    token.trim_matches(|c: char| c.is_ascii_punctuation())
                } else {
                    token
                }
            })
            .filter(|token| self.is_significant(token))
            .map(str::to_string)
            .collect()
    }

    fn is_significant(&self, token: &str) -> bool {
        // All-ASCII-lowercase, so byte length equals char length here.
        !token.is_empty()
            && token.bytes().all(|b| b.is_ascii_lowercase())
            && token.len() >= self.config.min_word_length
            && !self.stop_words.contains(token)
    }

    /// Trimmed fragments between runs of `.`, `!` or `?`, keeping only those
    /// of at least `min_sentence_length` characters, in original order.
    pub fn extract_sentences(&self, text: &str) -> Vec<String> {
        SENTENCE_BOUNDARY
            .split(text)
            .map(str::trim)
            .filter(|fragment| fragment.chars().count() >= self.config.min_sentence_length)
            .map(str::to_string)
            .collect()
    }
}

/// Count of whitespace-delimited tokens. No filtering, no case folding.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
