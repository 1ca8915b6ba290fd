//! Keyword frequency extraction.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// A letter followed by letters, digits or apostrophes.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}[\p{L}\p{N}']*").expect("valid token regex"));

/// Tokens shorter than this (in characters) are ignored.
const MIN_TOKEN_CHARS: usize = 2;

/// Token counts that remember the order tokens were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequency {
    positions: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl WordFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of an already normalized token.
    pub fn add(&mut self, token: &str) {
        match self.positions.get(token) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(token.to_string(), self.entries.len());
                self.entries.push((token.to_string(), 1));
            }
        }
    }

    pub fn count(&self, token: &str) -> usize {
        self.positions
            .get(token)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tokens with counts, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(token, count)| (token.as_str(), *count))
    }

    /// All tokens by descending count; ties keep first-seen order.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<_> = self.iter().collect();
        // Stable sort keeps insertion order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Tokenize and count words across the whole corpus.
pub fn extract<I, S>(texts: I) -> WordFrequency
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut freq = WordFrequency::new();
    for text in texts {
        let lowered = text.as_ref().to_lowercase();
        for token in TOKEN_RE.find_iter(&lowered) {
            let token = token.as_str();
            if token.chars().count() >= MIN_TOKEN_CHARS {
                freq.add(token);
            }
        }
    }
    freq
}

/// The `n` most frequent tokens.
pub fn top_n(freq: &WordFrequency, n: usize) -> Vec<String> {
    freq.ranked()
        .into_iter()
        .take(n)
        .map(|(token, _)| token.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_example_sentence() {
        let freq = extract(["Great great video! A+ content."]);

        assert_eq!(freq.count("great"), 2);
        assert_eq!(freq.count("video"), 1);
        assert_eq!(freq.count("content"), 1);
        assert_eq!(freq.count("a"), 0);
        assert_eq!(freq.len(), 3);
        assert_eq!(top_n(&freq, 2), vec!["great", "video"]);
    }

    #[test]
    fn test_counts_accumulate_across_texts() {
        let freq = extract(vec!["love this song".to_string(), "Love it".to_string()]);
        assert_eq!(freq.count("love"), 2);
        assert_eq!(freq.count("it"), 1);
    }

    #[test]
    fn test_unicode_and_apostrophes() {
        let freq = extract(["정말 좋은 노래 don't stop 2024 ok1"]);

        assert_eq!(freq.count("정말"), 1);
        assert_eq!(freq.count("좋은"), 1);
        assert_eq!(freq.count("노래"), 1);
        assert_eq!(freq.count("don't"), 1);
        assert_eq!(freq.count("ok1"), 1);
        assert_eq!(freq.count("2024"), 0);
    }

    #[test]
    fn test_single_char_tokens_dropped() {
        let freq = extract(["I a b 좋"]);
        assert!(freq.is_empty());
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let freq = extract(["zeta alpha beta alpha beta gamma"]);
        assert_eq!(top_n(&freq, 5), vec!["alpha", "beta", "zeta", "gamma"]);
    }

    #[test]
    fn test_top_n_bounds() {
        let freq = extract(["one two three"]);
        assert_eq!(top_n(&freq, 5).len(), 3);
        assert!(top_n(&freq, 0).is_empty());
        assert!(top_n(&WordFrequency::new(), 5).is_empty());
    }
}
