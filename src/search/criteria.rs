// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Criteria - keyword matching expressions for the extended query syntax.
//!
//! Every operator turns its arguments into [`Phrase`]s and appends a single
//! fragment. Word groups are wrapped according to the operator so that the
//! intended grouping survives in the final query string.
//!
//! ```text
//! contains('jim alex', 'bob')              → jim alex bob
//! contains_any_of('jim alex', 'bob')       → (jim alex) bob
//! contains_all_of('jim alex', 'bob')       → "jim alex" bob
//! contains_one_of('jim alex', 'bob')       → ("jim alex"|bob)
//! contains_strict_order_of('bob', 'a b')   → bob << "a b"
//! does_not_contain_keywords('jim alex')    → -jim -alex
//! does_not_contain_phrases('a', 'b c')     → -(a) -(b c)
//! has_phrase_not_containing_phrase(a,b,c)  → -(a -(b -(c)))
//! contains_keywords_in_quorum('a b c', 2)  → "a b c"/2
//! contains_keywords_in_proximity('a b', 3) → "a b"~3
//! starts_with('a') / ends_with('a')        → ^a / a$
//! ```

use std::fmt;

use super::phrase::Phrase;

/// How word groups are wrapped inside an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wrap {
    None,
    /// `(jim alex)` - any of the words
    Any,
    /// `"jim alex"` - the exact phrase
    All,
}

/// An ordered list of query fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    phrases: Vec<String>,
}

impl Criteria {
    #[must_use]
    pub fn new() -> Self {
        Self { phrases: Vec::new() }
    }

    /// Number of fragments (not words).
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    #[must_use]
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.phrases.iter()
    }

    /// Removes every fragment.
    pub fn clear(&mut self) -> &mut Self {
        self.phrases.clear();
        self
    }

    /// Matches documents containing the phrases anywhere: `jim alex bob`.
    pub fn contains<I, S>(&mut self, phrases: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.implode("", "", " ", phrases, Wrap::None)
    }

    /// Any word of each word group: `(jim alex) bob`.
    pub fn contains_any_of<I, S>(&mut self, phrases: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.implode("", "", " ", phrases, Wrap::Any)
    }

    /// Word groups as exact phrases: `"jim alex" bob`.
    pub fn contains_all_of<I, S>(&mut self, phrases: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.implode("", "", " ", phrases, Wrap::All)
    }

    /// At least one of the phrases: `("jim alex"|bob)`.
    pub fn contains_one_of<I, S>(&mut self, phrases: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.implode("(", ")", "|", phrases, Wrap::All)
    }

    /// Phrases in exactly this order: `bob << "alex smith"`.
    pub fn contains_strict_order_of<I, S>(&mut self, phrases: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.implode("", "", " << ", phrases, Wrap::All)
    }

    /// Excludes every individual keyword: `-jim -alex -bob`.
    ///
    /// Phrases are broken into words; quotes are dropped and `, : ; |` act
    /// as separators. Repeated words are emitted once.
    pub fn does_not_contain_keywords<I, S>(&mut self, keywords: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = Vec::new();

        for keyword in keywords {
            let cleaned: String = keyword
                .as_ref()
                .chars()
                .filter(|c| *c != '"' && *c != '\'')
                .map(|c| if matches!(c, ',' | ':' | ';' | '|') { ' ' } else { c })
                .collect();

            for word in cleaned.split_whitespace() {
                if !words.iter().any(|w| w == word) {
                    words.push(word.to_string());
                }
            }
        }

        self.implode("-", "", " -", words, Wrap::Any)
    }

    /// Excludes each phrase as a whole: `-(jim) -(alex bob)`.
    pub fn does_not_contain_phrases<I, S>(&mut self, phrases: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.implode("-(", ")", ") -(", phrases, Wrap::None)
    }

    /// Nests exclusions right to left: `-(aaa -(bbb -(ccc ddd)))`.
    pub fn has_phrase_not_containing_phrase<I, S>(&mut self, phrases: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let escaped = escape_phrases(phrases, Wrap::None);
        if escaped.is_empty() {
            return self;
        }

        let nested = escaped.iter().rev().fold(String::new(), |inner, phrase| {
            if inner.is_empty() {
                format!("-({phrase})")
            } else {
                format!("-({phrase} {inner})")
            }
        });
        self.phrases.push(nested);
        self
    }

    /// At least `threshold` of the keywords: `"jim alex bob"/2`.
    pub fn contains_keywords_in_quorum(&mut self, keywords: &str, threshold: u32) -> &mut Self {
        self.phrases.push(format!("\"{}\"/{}", strip_quotes(keywords), threshold));
        self
    }

    /// All keywords within a span of `proximity` words: `"jim alex"~3`.
    pub fn contains_keywords_in_proximity(&mut self, keywords: &str, proximity: u32) -> &mut Self {
        self.phrases.push(format!("\"{}\"~{}", strip_quotes(keywords), proximity));
        self
    }

    /// Field starts with `phrase`. The text is used verbatim.
    pub fn starts_with(&mut self, phrase: &str) -> &mut Self {
        self.phrases.push(format!("^{phrase}"));
        self
    }

    /// Field ends with `phrase`. The text is used verbatim.
    pub fn ends_with(&mut self, phrase: &str) -> &mut Self {
        self.phrases.push(format!("{phrase}$"));
        self
    }

    fn implode<I, S>(&mut self, prefix: &str, suffix: &str, separator: &str, phrases: I, wrap: Wrap) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let escaped = escape_phrases(phrases, wrap);
        if !escaped.is_empty() {
            self.phrases.push(format!("{prefix}{}{suffix}", escaped.join(separator)));
        }
        self
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrases.join(" "))
    }
}

impl<'a> IntoIterator for &'a Criteria {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.phrases.iter()
    }
}

/// Escapes each phrase, wrapping unquoted word groups per `wrap`. Empty
/// phrases are skipped.
fn escape_phrases<I, S>(phrases: I, wrap: Wrap) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    phrases
        .into_iter()
        .map(|p| Phrase::new(p.as_ref()))
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.is_word_group() && !p.is_phrase() {
                match wrap {
                    Wrap::None => p.phrase().to_string(),
                    Wrap::Any => format!("({})", p.phrase()),
                    Wrap::All => format!("\"{}\"", p.phrase()),
                }
            } else {
                p.phrase().to_string()
            }
        })
        .collect()
}

fn strip_quotes(keywords: &str) -> String {
    keywords.replace('"', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(build: impl FnOnce(&mut Criteria) -> &mut Criteria) -> String {
        let mut criteria = Criteria::new();
        build(&mut criteria).to_string()
    }

    #[test]
    fn test_count_and_clear() {
        let mut criteria = Criteria::new();
        assert_eq!(criteria.len(), 0);
        criteria.contains(["bob", "alex"]);
        criteria.contains(["bob alex"]);
        assert_eq!(criteria.len(), 2);
        assert!(criteria.iter().all(|p| p == "bob alex"));
        criteria.clear();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_contains() {
        assert_eq!(render(|c| c.contains(["jim", "alex", "bob"])), "jim alex bob");
        assert_eq!(render(|c| c.contains(["bob alex"])), "bob alex");
        assert_eq!(render(|c| c.contains(["\"bob alex\""])), "\"bob alex\"");
        assert_eq!(
            render(|c| c.contains(["\"bob alex\"", "john", "wendy"])),
            "\"bob alex\" john wendy"
        );
    }

    #[test]
    fn test_contains_any_of() {
        assert_eq!(render(|c| c.contains_any_of(["bob", "alex"])), "bob alex");
        assert_eq!(render(|c| c.contains_any_of(["jim alex bob"])), "(jim alex bob)");
        assert_eq!(render(|c| c.contains_any_of(["\"bob alex\""])), "\"bob alex\"");
        assert_eq!(
            render(|c| c.contains_any_of(["\"bob alex\"", "john wendy"])),
            "\"bob alex\" (john wendy)"
        );
    }

    #[test]
    fn test_contains_all_of() {
        assert_eq!(render(|c| c.contains_all_of(["bob", "alex"])), "bob alex");
        assert_eq!(render(|c| c.contains_all_of(["bob alex"])), "\"bob alex\"");
        assert_eq!(
            render(|c| c.contains_all_of(["\"bob alex\"", "john wendy"])),
            "\"bob alex\" \"john wendy\""
        );
    }

    #[test]
    fn test_contains_one_of() {
        assert_eq!(render(|c| c.contains_one_of(["jim", "alex", "bob"])), "(jim|alex|bob)");
        assert_eq!(render(|c| c.contains_one_of(["bob alex"])), "(\"bob alex\")");
        assert_eq!(render(|c| c.contains_one_of(["\"bob alex\""])), "(\"bob alex\")");
        assert_eq!(
            render(|c| c.contains_one_of(["\"bob alex\"", "john wendy"])),
            "(\"bob alex\"|\"john wendy\")"
        );
    }

    #[test]
    fn test_contains_strict_order_of() {
        assert_eq!(render(|c| c.contains_strict_order_of(["bob", "alex"])), "bob << alex");
        assert_eq!(
            render(|c| c.contains_strict_order_of(["bob", "alex smith"])),
            "bob << \"alex smith\""
        );
        assert_eq!(render(|c| c.contains_strict_order_of(["bob alex"])), "\"bob alex\"");
    }

    #[test]
    fn test_does_not_contain_keywords() {
        assert_eq!(render(|c| c.does_not_contain_keywords(["jim alex bob"])), "-jim -alex -bob");
        assert_eq!(render(|c| c.does_not_contain_keywords(["bob", "alex"])), "-bob -alex");
        assert_eq!(render(|c| c.does_not_contain_keywords(["\"bob alex\""])), "-bob -alex");
        assert_eq!(
            render(|c| c.does_not_contain_keywords(["\"bob alex\"", "john wendy"])),
            "-bob -alex -john -wendy"
        );
        assert_eq!(
            render(|c| c.does_not_contain_keywords(["bob,alex;bob|jim:alex"])),
            "-bob -alex -jim"
        );
    }

    #[test]
    fn test_does_not_contain_phrases() {
        assert_eq!(render(|c| c.does_not_contain_phrases(["bob", "alex"])), "-(bob) -(alex)");
        assert_eq!(render(|c| c.does_not_contain_phrases(["bob alex"])), "-(bob alex)");
        assert_eq!(
            render(|c| c.does_not_contain_phrases(["\"bob alex\"", "john wendy"])),
            "-(\"bob alex\") -(john wendy)"
        );
    }

    #[test]
    fn test_has_phrase_not_containing_phrase() {
        assert_eq!(render(|c| c.has_phrase_not_containing_phrase(["bob", "alex"])), "-(bob -(alex))");
        assert_eq!(render(|c| c.has_phrase_not_containing_phrase(["bob alex"])), "-(bob alex)");
        assert_eq!(
            render(|c| c.has_phrase_not_containing_phrase(["aaa", "bbb", "ccc ddd"])),
            "-(aaa -(bbb -(ccc ddd)))"
        );
        assert_eq!(
            render(|c| c.has_phrase_not_containing_phrase(["\"bob alex\"", "john wendy"])),
            "-(\"bob alex\" -(john wendy))"
        );
    }

    #[test]
    fn test_quorum_and_proximity() {
        assert_eq!(render(|c| c.contains_keywords_in_quorum("bob alex", 3)), "\"bob alex\"/3");
        assert_eq!(render(|c| c.contains_keywords_in_quorum("\"bob alex\"", 3)), "\"bob alex\"/3");
        assert_eq!(render(|c| c.contains_keywords_in_proximity(" bob alex ", 3)), "\"bob alex\"~3");
        assert_eq!(render(|c| c.contains_keywords_in_proximity("\"bob alex\"", 3)), "\"bob alex\"~3");
    }

    #[test]
    fn test_anchors_are_verbatim() {
        assert_eq!(render(|c| c.starts_with("bob")), "^bob");
        assert_eq!(render(|c| c.ends_with("bob")), "bob$");
        assert_eq!(render(|c| c.starts_with("a-b")), "^a-b");
    }

    #[test]
    fn test_special_characters_are_escaped() {
        assert_eq!(render(|c| c.contains(["me@me.com"])), "me\\@me.com");
        assert_eq!(render(|c| c.contains_one_of(["a-b", "c!"])), "(a\\-b|c\\!)");
    }

    #[test]
    fn test_empty_phrases_are_skipped() {
        assert_eq!(render(|c| c.contains(["", "bob", "  "])), "bob");

        let mut criteria = Criteria::new();
        criteria.contains_one_of(["", " "]);
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_chained_operators() {
        let rendered = render(|c| {
            c.contains_one_of(["jim alex", "bob"])
                .contains_strict_order_of(["bob", "alex smith"])
                .does_not_contain_keywords(["fred alan jeffrey"])
                .contains_keywords_in_proximity("bob smith", 2)
        });

        assert_eq!(
            rendered,
            "(\"jim alex\"|bob) bob << \"alex smith\" -fred -alan -jeffrey \"bob smith\"~2"
        );
    }
}
