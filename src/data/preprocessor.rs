// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Cleans raw review text before vectorisation.
//
// IMDB reviews were scraped from HTML, so paragraphs are glued
// together with literal line-break markers:
//
//   "Great cast.<br /><br />The plot, however..."
//
// Left alone, the vocabulary would learn "br" as one of its
// most frequent words. A single regex substitution replaces
// every marker (<br />, <br/>, <br>, any case) with a space.
//
// Standardisation steps (applied in order):
//   1. Replace HTML line-break markers with a space
//   2. Lowercase
//   3. Drop ASCII punctuation ("don't" → "dont")
//   4. Collapse runs of whitespace into one space, trim
//
// Reference: regex crate documentation
//            Rust Book §8 (Strings in Rust)

use regex::Regex;

pub struct Preprocessor {
    line_break: Regex,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            line_break: Regex::new(r"(?i)<br\s*/?>").expect("line-break pattern is valid"),
        }
    }

    /// Replace HTML line-break markers with a single space.
    pub fn strip_line_breaks(&self, text: &str) -> String {
        self.line_break.replace_all(text, " ").into_owned()
    }

    /// Full standardisation used by the vectorizer and the
    /// vocabulary builder. Both must see identical text.
    pub fn standardize(&self, text: &str) -> String {
        let no_breaks = self.strip_line_breaks(text);

        let stripped: String = no_breaks
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .flat_map(char::to_lowercase)
            .collect();

        stripped.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
