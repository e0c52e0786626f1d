// Text normalisation applied to every extracted document.
//
// Readers hand over whatever bytes decoded to; the engine expects a single
// line of printable text with single spaces between tokens.

use std::sync::LazyLock;

use regex_lite::Regex;

/// A word split across a line break by a hyphen, e.g. "exam-\nple".
static LINE_HYPHENATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z])-[ \t]*\r?\n[ \t]*([a-z])").expect("hyphenation pattern is valid")
});

/// Normalise extracted text: re-join hyphenated line breaks, drop control
/// and non-printable characters, collapse whitespace runs, trim.
pub fn normalize_text(raw: &str) -> String {
    let joined = LINE_HYPHENATION.replace_all(raw, "$1$2");

    let printable: String = joined
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|&c| !is_artifact(c))
        .collect();

    printable.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Characters that carry no text: controls, replacement characters from
/// lossy decoding, zero-width marks, byte-order marks, private-use glyphs.
fn is_artifact(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{FFFD}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{00AD}'
        )
        || ('\u{E000}'..='\u{F8FF}').contains(&c)
}

/// Number of characters in cleaned text.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            normalize_text("  Hello,\n\n\tworld.   Again  "),
            "Hello, world. Again"
        );
    }

    #[test]
    fn test_strips_control_and_invisible_characters() {
        assert_eq!(
            normalize_text("clean\u{0007}ed\u{200B} te\u{FFFD}xt\u{FEFF}"),
            "cleaned text"
        );
    }

    #[test]
    fn test_rejoins_hyphenated_line_breaks() {
        assert_eq!(
            normalize_text("an exam-\nple of hyphen-\r\n  ation"),
            "an example of hyphenation"
        );
    }

    #[test]
    fn test_keeps_real_hyphens() {
        assert_eq!(normalize_text("well-known fact"), "well-known fact");
    }

    #[test]
    fn test_form_feed_becomes_space() {
        assert_eq!(normalize_text("page one\u{000C}page two"), "page one page two");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("\u{0000}\u{0001}"), "");
    }
}
