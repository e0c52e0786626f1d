// Similarity engine: document-level Jaccard scoring, sentence-level
// containment scoring, and ranked cross-document sentence matches.

pub mod engine;
pub mod matches;
pub mod overlap;

/// Sentence pairs scoring at or above this percentage are reported.
pub const SIMILARITY_THRESHOLD: u8 = 75;

/// Maximum number of sentence matches returned per analysis.
pub const MAX_MATCHES: usize = 5;

/// Matched sentences longer than this are truncated for display.
pub const MAX_DISPLAY_CHARS: usize = 200;

/// Immutable matching thresholds, injected at engine construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub similarity_threshold: u8,
    pub max_matches: usize,
    pub max_display_chars: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: SIMILARITY_THRESHOLD,
            max_matches: MAX_MATCHES,
            max_display_chars: MAX_DISPLAY_CHARS,
        }
    }
}

/// Round `100 * numerator / denominator` to the nearest integer percentage,
/// halves rounding up. A zero denominator yields 0.
///
/// Integer arithmetic only: a float quotient can land just below an exact
/// half (23/40 is 57.5 but `0.575 * 100.0` is 57.49999...).
pub(crate) fn percentage(numerator: usize, denominator: usize) -> u8 {
    if denominator == 0 {
        return 0;
    }
    let n = numerator.min(denominator) as u128;
    let d = denominator as u128;
    ((200 * n + d) / (2 * d)) as u8
}
