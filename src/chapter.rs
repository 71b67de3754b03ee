//! Per-chapter analysis results.

use serde::{Deserialize, Serialize};

use crate::analysis::frequency::{WordFrequencies, total_tokens};

/// The word counts of one content document of the book.
///
/// Titles are not unique: two chapters may carry the same title and are
/// still kept as separate records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    /// Human-readable chapter title.
    pub title: String,
    /// Word to occurrence count.
    pub frequencies: WordFrequencies,
}

impl ChapterRecord {
    /// Create a new chapter record.
    pub fn new<S: Into<String>>(title: S, frequencies: WordFrequencies) -> Self {
        ChapterRecord {
            title: title.into(),
            frequencies,
        }
    }

    /// Total number of words (tokens) in the chapter.
    pub fn total_words(&self) -> usize {
        total_tokens(&self.frequencies)
    }

    /// Number of distinct words in the chapter.
    pub fn unique_words(&self) -> usize {
        self.frequencies.len()
    }

    /// Occurrences of `word`, zero when absent.
    pub fn count(&self, word: &str) -> usize {
        self.frequencies.get(word).copied().unwrap_or(0)
    }

    /// Iterate over the words occurring at least `min_frequency` times.
    pub fn filtered(&self, min_frequency: usize) -> impl Iterator<Item = (&str, usize)> {
        self.frequencies
            .iter()
            .filter(move |&(_, &count)| count >= min_frequency)
            .map(|(word, &count)| (word.as_str(), count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ChapterRecord {
        let mut frequencies = WordFrequencies::new();
        frequencies.insert("isso".to_string(), 3);
        frequencies.insert("o_que".to_string(), 2);
        frequencies.insert("casa".to_string(), 1);
        ChapterRecord::new("Capítulo 1", frequencies)
    }

    #[test]
    fn test_statistics() {
        let chapter = record();
        assert_eq!(chapter.total_words(), 6);
        assert_eq!(chapter.unique_words(), 3);
        assert_eq!(chapter.count("isso"), 3);
        assert_eq!(chapter.count("nada"), 0);
    }

    #[test]
    fn test_filtered_is_inclusive() {
        let chapter = record();
        let mut words: Vec<&str> = chapter.filtered(2).map(|(w, _)| w).collect();
        words.sort();
        assert_eq!(words, vec!["isso", "o_que"]);
        assert_eq!(chapter.filtered(1).count(), 3);
        assert_eq!(chapter.filtered(4).count(), 0);
    }
}
