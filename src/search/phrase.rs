// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Phrase - a single keyword fragment, escaped and classified.
//!
//! ```
//! use sphinx_search::search::Phrase;
//!
//! let phrase = Phrase::new("\"some awesome-keywords\"");
//! assert!(phrase.is_phrase());
//! assert_eq!(phrase.phrase(), "\"some awesome\\-keywords\"");
//! assert_eq!(phrase.word_count(), 2);
//! ```

use std::fmt;

use crate::utils::escape_query_string;

/// A keyword or group of keywords to be placed in a [`Criteria`](super::Criteria).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    original: String,
    phrase: String,
    words: usize,
    is_phrase: bool,
}

impl Phrase {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let original = value.into();
        let trimmed = original.trim();

        let quote = quote_char(trimmed);
        let phrase = match quote {
            Some(q) => {
                let inner = &trimmed[q.len_utf8()..trimmed.len() - q.len_utf8()];
                format!("\"{}\"", escape_query_string(inner))
            }
            None => escape_query_string(trimmed),
        };
        let words = count_words(trimmed);

        Self {
            is_phrase: quote.is_some(),
            original,
            phrase,
            words,
        }
    }

    /// Converts each value to a [`Phrase`].
    pub fn convert_to_phrases<I, S>(values: I) -> Vec<Phrase>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(Phrase::new).collect()
    }

    /// The input exactly as supplied.
    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The escaped form used in query strings.
    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    #[must_use]
    pub fn is_single_word(&self) -> bool {
        self.words == 1
    }

    #[must_use]
    pub fn is_word_group(&self) -> bool {
        self.words > 1
    }

    /// True when the whole input was wrapped in one pair of `"` or `'`.
    #[must_use]
    pub fn is_phrase(&self) -> bool {
        self.is_phrase
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrase)
    }
}

impl From<&str> for Phrase {
    fn from(value: &str) -> Self {
        Phrase::new(value)
    }
}

fn quote_char(value: &str) -> Option<char> {
    let first = value.chars().next()?;
    let last = value.chars().next_back()?;
    let wrapped = (first == '"' || first == '\'') && first == last && value.chars().count() >= 2;
    wrapped.then_some(first)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '@'
}

/// Counts runs of word characters. `'` and `-` may continue a word but not
/// start one. Non-blank input always counts at least one word.
fn count_words(value: &str) -> usize {
    if value.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut in_word = false;
    for c in value.chars() {
        if is_word_char(c) {
            if !in_word {
                count += 1;
                in_word = true;
            }
        } else if !(in_word && (c == '\'' || c == '-')) {
            in_word = false;
        }
    }

    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_group() {
        let phrase = Phrase::new("some keywords");
        assert_eq!(phrase.phrase(), "some keywords");
        assert_eq!(phrase.original(), "some keywords");
        assert!(!phrase.is_phrase());
        assert!(!phrase.is_single_word());
        assert!(!phrase.is_empty());
        assert!(phrase.is_word_group());
        assert_eq!(phrase.word_count(), 2);
    }

    #[test]
    fn test_single_word() {
        let phrase = Phrase::new("keyword");
        assert!(phrase.is_single_word());
        assert!(!phrase.is_word_group());
        assert_eq!(phrase.word_count(), 1);
    }

    #[test]
    fn test_quoted_phrase() {
        let phrase = Phrase::new("\"some keywords\"");
        assert_eq!(phrase.phrase(), "\"some keywords\"");
        assert!(phrase.is_phrase());
        assert!(phrase.is_word_group());
        assert_eq!(phrase.word_count(), 2);
    }

    #[test]
    fn test_quoted_phrase_escapes_interior() {
        let phrase = Phrase::new("\"some awesome-keywords me@me.com\"");
        assert_eq!(phrase.phrase(), "\"some awesome\\-keywords me\\@me.com\"");
        assert_eq!(phrase.original(), "\"some awesome-keywords me@me.com\"");
        assert!(phrase.is_phrase());
        assert_eq!(phrase.word_count(), 4);
    }

    #[test]
    fn test_embedded_quotes_are_escaped() {
        let phrase = Phrase::new("some \"awesome-keywords\" me@me.com");
        assert_eq!(phrase.phrase(), "some \\\"awesome\\-keywords\\\" me\\@me.com");
        assert!(!phrase.is_phrase());
        assert_eq!(phrase.word_count(), 4);
    }

    #[test]
    fn test_single_quotes_rewrapped_in_double() {
        let phrase = Phrase::new("  'jim alex'  ");
        assert!(phrase.is_phrase());
        assert_eq!(phrase.phrase(), "\"jim alex\"");
    }

    #[test]
    fn test_mismatched_quotes_are_not_a_phrase() {
        let phrase = Phrase::new("\"jim alex'");
        assert!(!phrase.is_phrase());
        assert_eq!(phrase.phrase(), "\\\"jim alex'");
        assert!(!Phrase::new("\"").is_phrase());
    }

    #[test]
    fn test_empty_phrase() {
        let phrase = Phrase::new("");
        assert!(phrase.is_empty());
        assert_eq!(phrase.word_count(), 0);
        assert!(!phrase.is_single_word());
        assert!(!phrase.is_word_group());

        assert!(Phrase::new("   ").is_empty());
    }

    #[test]
    fn test_punctuation_only_counts_as_one_word() {
        let phrase = Phrase::new("!!");
        assert!(!phrase.is_empty());
        assert!(phrase.is_single_word());
        assert_eq!(phrase.phrase(), "\\!\\!");
    }

    #[test]
    fn test_convert_to_phrases() {
        let phrases = Phrase::convert_to_phrases(["one", "two three"]);
        assert_eq!(phrases.len(), 2);
        assert!(phrases[1].is_word_group());
    }
}
