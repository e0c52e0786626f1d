// Word-overlap measures.
//
// Two formulas, deliberately different:
//
//   document level:  |A ∩ B| / |A ∪ B|            over distinct words (Jaccard)
//   sentence level:  #{w in A : w in B} / max(|A|, |B|)   with A's duplicates
//
// The document score is symmetric and ignores frequency and order. The
// sentence score counts A's words with multiplicity and normalises by the
// longer sentence, so a sentence that drops half of another's words falls
// well below the match threshold.

use std::collections::HashSet;

use super::percentage;

/// Jaccard index over the distinct words of each side, as a 0-100 percentage.
///
/// Returns 0 if either side is empty.
pub fn jaccard_percentage<S: AsRef<str>>(words_a: &[S], words_b: &[S]) -> u8 {
    let set_a: HashSet<&str> = words_a.iter().map(AsRef::as_ref).collect();
    let set_b: HashSet<&str> = words_b.iter().map(AsRef::as_ref).collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.len() + set_b.len() - intersection;

    percentage(intersection, union)
}

/// Containment of `words_a` in `words_b`, counted with multiplicity from A
/// and normalised by the longer of the two word lists, as a 0-100 percentage.
///
/// Returns 0 if either side is empty.
pub fn containment_percentage<S: AsRef<str>>(words_a: &[S], words_b: &[S]) -> u8 {
    if words_a.is_empty() || words_b.is_empty() {
        return 0;
    }

    let lookup: HashSet<&str> = words_b.iter().map(AsRef::as_ref).collect();
    let shared = words_a
        .iter()
        .map(AsRef::as_ref)
        .filter(|w: &&str| lookup.contains(*w))
        .count();

    percentage(shared, words_a.len().max(words_b.len()))
}
