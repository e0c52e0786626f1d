// Text segmentation: significant words, candidate sentences, raw word counts.
//
// This is the leaf of the crate: everything here is a pure function of the
// input text plus an immutable stop-word set.

pub mod stop_words;
pub mod tokenize;
