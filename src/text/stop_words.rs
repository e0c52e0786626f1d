// Stop words: common function words excluded from similarity comparisons.
//
// The built-in list is a small closed set of English articles, auxiliaries,
// prepositions, conjunctions and pronouns. It is built once per process and
// shared read-only. The much larger ISO list from the `stop-words` crate can
// be selected instead via COPYSCAN_STOP_WORDS=iso.

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use stop_words::{get, LANGUAGE};

const BUILTIN: &[&str] = &[
    // articles & determiners
    "the", "a", "an", "this", "that", "these", "those",
    // conjunctions
    "and", "or", "but",
    // prepositions
    "in", "on", "at", "to", "for", "of", "with", "by", "from",
    // be-verbs
    "is", "are", "was", "were", "be", "been", "being",
    // auxiliaries
    "have", "has", "had", "do", "does", "did",
    // modals
    "will", "would", "could", "should", "may", "might", "must", "can",
    // pronouns
    "i", "you", "he", "she", "it", "we", "they",
    // interrogatives
    "what", "which", "who", "when", "where", "why", "how",
];

/// Which list a [`StopWordSet`] is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopWordSource {
    /// The small closed list above (default)
    Builtin,
    /// The ISO English list shipped with the `stop-words` crate
    Iso,
}

/// A fixed, read-only set of lower-cased stop words.
#[derive(Debug, Clone)]
pub struct StopWordSet {
    words: HashSet<String>,
}

impl StopWordSet {
    /// The process-wide built-in set. Initialised on first use, never mutated.
    pub fn shared() -> Arc<StopWordSet> {
        static SHARED: OnceLock<Arc<StopWordSet>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(Self::from_words(BUILTIN.iter().copied())))
            .clone()
    }

    /// Build the set for a configured source.
    pub fn for_source(source: StopWordSource) -> Arc<StopWordSet> {
        match source {
            StopWordSource::Builtin => Self::shared(),
            StopWordSource::Iso => {
                let words: Vec<String> = get(LANGUAGE::English);
                Arc::new(Self::from_words(words.iter().map(String::as_str)))
            }
        }
    }

    /// Build a set from arbitrary words; entries are lower-cased.
    pub fn from_words<'a, I>(words: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            words: words.into_iter().map(str::to_lowercase).collect(),
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        word.chars().any(char::is_uppercase) && self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWordSet {
    fn default() -> Self {
        Self::from_words(BUILTIN.iter().copied())
    }
}
