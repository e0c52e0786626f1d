// The similarity engine.
//
// Pure and synchronous: every method is a function of its inputs and the
// immutable configuration captured at construction. Safe to share across
// threads (wrap in Arc) and to call concurrently.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::matches::{rank, SentenceMatch};
use super::overlap::{containment_percentage, jaccard_percentage};
use super::MatchConfig;
use crate::corpus::Document;
use crate::text::tokenize::{self, Tokenizer};

/// Combined result of checking one document against a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityReport {
    /// Highest document-level similarity over the corpus (0 if empty)
    pub similarity: u8,
    /// The first corpus document reaching `similarity`, if it is above 0
    pub closest_source: Option<String>,
    /// Top sentence matches, highest similarity first
    pub matches: Vec<SentenceMatch>,
    /// Raw whitespace-delimited word count of the submitted text
    pub word_count: usize,
}

/// Document and sentence similarity over a tokenizer's view of the text.
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    tokenizer: Tokenizer,
    config: MatchConfig,
}

impl SimilarityEngine {
    pub fn new(tokenizer: Tokenizer, config: MatchConfig) -> Self {
        Self { tokenizer, config }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    /// Jaccard similarity (0-100) of the two texts' significant-word sets.
    pub fn document_similarity(&self, text_a: &str, text_b: &str) -> u8 {
        let words_a = self.tokenizer.significant_words(text_a);
        let words_b = self.tokenizer.significant_words(text_b);
        jaccard_percentage(&words_a, &words_b)
    }

    /// Containment similarity (0-100) of sentence A's significant words in sentence B.
    pub fn sentence_similarity(&self, sentence_a: &str, sentence_b: &str) -> u8 {
        let words_a = self.tokenizer.significant_words(sentence_a);
        let words_b = self.tokenizer.significant_words(sentence_b);
        containment_percentage(&words_a, &words_b)
    }

    /// Compare every sentence of `new_text` with every sentence of every
    /// corpus document and return the best matches at or above the threshold.
    ///
    /// This is a full cross product; cost grows with
    /// `sentences(new_text) * sentences(corpus)`.
    pub fn find_detailed_matches(&self, new_text: &str, corpus: &[Document]) -> Vec<SentenceMatch> {
        if corpus.is_empty() {
            return Vec::new();
        }
        let new_sentences: Vec<(String, Vec<String>)> = self.sentences_with_words(new_text);
        if new_sentences.is_empty() {
            return Vec::new();
        }

        // Tokenize each prior sentence once rather than once per new sentence.
        let prior: Vec<(&str, Vec<(String, Vec<String>)>)> = corpus
            .iter()
            .map(|doc| (doc.name(), self.sentences_with_words(doc.text())))
            .collect();

        let mut candidates = Vec::new();
        let mut pairs = 0usize;
        for (sentence, words) in &new_sentences {
            for (source, sentences) in &prior {
                for (_, prior_words) in sentences {
                    pairs += 1;
                    let similarity = containment_percentage(words, prior_words);
                    if similarity >= self.config.similarity_threshold {
                        candidates.push(SentenceMatch::new(
                            sentence,
                            similarity,
                            source,
                            self.config.max_display_chars,
                        ));
                    }
                }
            }
        }

        debug!(
            new_sentences = new_sentences.len(),
            pairs,
            candidates = candidates.len(),
            "Compared sentence pairs"
        );

        rank(candidates, self.config.max_matches)
    }

    /// Raw word count, for display.
    pub fn word_count(&self, text: &str) -> usize {
        tokenize::word_count(text)
    }

    /// Full check of `new_text` against `corpus`.
    pub fn analyze(&self, new_text: &str, corpus: &[Document]) -> SimilarityReport {
        if corpus.is_empty() {
            return SimilarityReport {
                similarity: 0,
                closest_source: None,
                matches: Vec::new(),
                word_count: self.word_count(new_text),
            };
        }

        let new_words = self.tokenizer.significant_words(new_text);

        let mut similarity = 0u8;
        let mut closest_source = None;
        for doc in corpus {
            let words = self.tokenizer.significant_words(doc.text());
            let score = jaccard_percentage(&new_words, &words);
            if score > similarity {
                similarity = score;
                closest_source = Some(doc.name().to_string());
            }
        }

        let matches = self.find_detailed_matches(new_text, corpus);

        debug!(
            corpus = corpus.len(),
            similarity,
            matches = matches.len(),
            "Analysis complete"
        );

        SimilarityReport {
            similarity,
            closest_source,
            matches,
            word_count: self.word_count(new_text),
        }
    }

    fn sentences_with_words(&self, text: &str) -> Vec<(String, Vec<String>)> {
        self.tokenizer
            .extract_sentences(text)
            .into_iter()
            .map(|sentence| {
                let words = self.tokenizer.significant_words(&sentence);
                (sentence, words)
            })
            .collect()
    }
}
