//! # Word Frequency
//!
//! Ranks the words of a story by how often they occur. Words are whitespace
//! tokens with every non-word, non-space character removed, lowercased;
//! tokens that are pure punctuation disappear.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::{Result, SoftNerError};

/// Counts words in raw story text.
#[derive(Debug, Clone)]
pub struct WordCounter {
    punctuation: Regex,
}

impl WordCounter {
    /// Create a counter, compiling its punctuation pattern.
    pub fn new() -> Result<Self> {
        Ok(Self {
            punctuation: Regex::new(r"[^\w\s]")?,
        })
    }

    /// Count the words of `text`.
    pub fn count(&self, text: &str) -> WordFrequency {
        let mut counts: HashMap<String, usize> = HashMap::new();

        for raw in text.split_whitespace() {
            let word = self.punctuation.replace_all(raw, "").to_lowercase();
            if word.is_empty() {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
        }

        WordFrequency::from_counts(counts)
    }

    /// Read a story file and count its words.
    pub fn count_file(&self, path: impl AsRef<Path>) -> Result<WordFrequency> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SoftNerError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path).map_err(|e| SoftNerError::io(path, e))?;
        Ok(self.count(&text))
    }
}

/// Word counts ranked by descending frequency, ties broken alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequency {
    ranked: Vec<(String, usize)>,
    total: usize,
}

impl WordFrequency {
    fn from_counts(counts: HashMap<String, usize>) -> Self {
        let total = counts.values().sum();
        let mut ranked: Vec<_> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Self { ranked, total }
    }

    /// Every distinct word with its count, most frequent first.
    pub fn ranked(&self) -> &[(String, usize)] {
        &self.ranked
    }

    /// The `n` most frequent words.
    pub fn top(&self, n: usize) -> &[(String, usize)] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    /// The `n` least frequent words, still in descending order.
    pub fn bottom(&self, n: usize) -> &[(String, usize)] {
        let len = self.ranked.len();
        &self.ranked[len - n.min(len)..]
    }

    /// Occurrences of one (lowercase) word.
    pub fn count_of(&self, word: &str) -> usize {
        self.ranked
            .iter()
            .find(|(w, _)| w == word)
            .map_or(0, |(_, count)| *count)
    }

    /// Total number of words counted.
    pub fn total_words(&self) -> usize {
        self.total
    }

    pub fn distinct_words(&self) -> usize {
        self.ranked.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "The station was quiet. The station, at night, was THE place -- quiet!";

    #[test]
    fn test_counts_are_case_and_punctuation_insensitive() {
        let freq = WordCounter::new().unwrap().count(TEXT);
        assert_eq!(freq.count_of("the"), 3);
        assert_eq!(freq.count_of("station"), 2);
        assert_eq!(freq.count_of("quiet"), 2);
        assert_eq!(freq.count_of("--"), 0);
        assert_eq!(freq.total_words(), 12);
    }

    #[test]
    fn test_ranking() {
        let freq = WordCounter::new().unwrap().count(TEXT);
        let top: Vec<_> = freq.top(4).iter().map(|(w, c)| (w.as_str(), *c)).collect();
        assert_eq!(
            top,
            [("the", 3), ("quiet", 2), ("station", 2), ("was", 2)]
        );

        let bottom: Vec<_> = freq.bottom(2).iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(bottom, ["night", "place"]);
    }

    #[test]
    fn test_views_clamp_to_available_words() {
        let freq = WordCounter::new().unwrap().count("one two");
        assert_eq!(freq.top(10).len(), 2);
        assert_eq!(freq.bottom(10).len(), 2);
        assert_eq!(freq.distinct_words(), 2);
    }

    #[test]
    fn test_empty_text() {
        let freq = WordCounter::new().unwrap().count("  ... !! ");
        assert!(freq.ranked().is_empty());
        assert!(freq.top(10).is_empty());
        assert!(freq.bottom(10).is_empty());
        assert_eq!(freq.total_words(), 0);
    }

    #[test]
    fn test_keeps_non_ascii_letters() {
        let freq = WordCounter::new()
            .unwrap()
            .count("Caf\u{e9} caf\u{e9}, CAF\u{c9}");
        assert_eq!(freq.count_of("caf\u{e9}"), 3);
    }

    #[test]
    fn test_count_file_missing() {
        let err = WordCounter::new()
            .unwrap()
            .count_file("no/such/story.txt")
            .unwrap_err();
        assert!(matches!(err, SoftNerError::InputNotFound { .. }));
    }
}
