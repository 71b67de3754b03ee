//! Filtered and sorted frequency tables.
//!
//! # Ordering
//!
//! Words compare by their accent-folded form first (`é` orders like `e`)
//! and by their exact text second, so the order is total and reproducible.
//! Under [`SortPolicy::Frequency`] the count, descending, comes before both.
//!
//! ```
//! use chapterfreq::report::table::{SortPolicy, FrequencyTable};
//! use std::collections::HashMap;
//!
//! let freqs: HashMap<String, usize> =
//!     [("o_que", 2), ("é", 2), ("isso", 2), ("casa", 1)]
//!         .into_iter()
//!         .map(|(w, c)| (w.to_string(), c))
//!         .collect();
//!
//! let table = FrequencyTable::from_frequencies(&freqs, 1, SortPolicy::Frequency);
//! let words: Vec<&str> = table.iter().map(|(w, _)| w).collect();
//! assert_eq!(words, vec!["é", "isso", "o_que", "casa"]);
//! ```

use std::cmp::{Ordering, Reverse};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::analysis::frequency::WordFrequencies;
use crate::chapter::ChapterRecord;
use crate::error::ChapterFreqError;

/// Row ordering of exported tables.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortPolicy {
    /// Count descending, then word ascending.
    #[default]
    Frequency,
    /// Word ascending.
    Alphabetical,
}

impl fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortPolicy::Frequency => write!(f, "frequency"),
            SortPolicy::Alphabetical => write!(f, "alphabetical"),
        }
    }
}

impl FromStr for SortPolicy {
    type Err = ChapterFreqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "frequency" => Ok(SortPolicy::Frequency),
            "alphabetical" => Ok(SortPolicy::Alphabetical),
            other => Err(ChapterFreqError::invalid_argument(format!(
                "unknown sort policy '{other}' (expected 'frequency' or 'alphabetical')"
            ))),
        }
    }
}

/// The word with combining marks removed, used as primary sort key.
pub fn fold_accents(word: &str) -> String {
    word.nfd().filter(|&c| !is_combining_mark(c)).collect()
}

/// Sort key of a word in report order: accent-folded form, then the word.
fn word_sort_key(word: &str) -> (String, String) {
    (fold_accents(word), word.to_string())
}

/// Compare two words in report order.
pub fn compare_words(a: &str, b: &str) -> Ordering {
    word_sort_key(a).cmp(&word_sort_key(b))
}

fn sort_rows<T>(rows: &mut [T], policy: SortPolicy, key: impl Fn(&T) -> (&str, usize)) {
    match policy {
        SortPolicy::Frequency => rows.sort_by_cached_key(|row| {
            let (word, count) = key(row);
            (Reverse(count), word_sort_key(word))
        }),
        SortPolicy::Alphabetical => rows.sort_by_cached_key(|row| word_sort_key(key(row).0)),
    }
}

/// One chapter's words that pass the frequency threshold, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    rows: Vec<(String, usize)>,
}

impl FrequencyTable {
    /// Build the table of `chapter`.
    pub fn from_chapter(chapter: &ChapterRecord, min_frequency: usize, policy: SortPolicy) -> Self {
        Self::from_frequencies(&chapter.frequencies, min_frequency, policy)
    }

    /// Keep the words with at least `min_frequency` occurrences and sort
    /// them by `policy`.
    pub fn from_frequencies(
        frequencies: &WordFrequencies,
        min_frequency: usize,
        policy: SortPolicy,
    ) -> Self {
        let mut rows: Vec<(String, usize)> = frequencies
            .iter()
            .filter(|&(_, &count)| count >= min_frequency)
            .map(|(word, &count)| (word.clone(), count))
            .collect();
        sort_rows(&mut rows, policy, |(word, count)| (word.as_str(), *count));
        FrequencyTable { rows }
    }

    /// Iterate over `(word, count)` rows.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.rows.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One word of the combined table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedRow {
    pub word: String,
    /// Filtered count per chapter, in chapter order. Zero when the word is
    /// absent from a chapter or below the threshold there.
    pub counts: Vec<usize>,
    pub total: usize,
}

/// Words of all chapters side by side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CombinedTable {
    titles: Vec<String>,
    rows: Vec<CombinedRow>,
}

impl CombinedTable {
    /// Build the combined table.
    ///
    /// The vocabulary is the union of every chapter's filtered words. Under
    /// the frequency policy rows are ordered by their summed count.
    pub fn build(chapters: &[ChapterRecord], min_frequency: usize, policy: SortPolicy) -> Self {
        let filtered: Vec<HashMap<&str, usize>> = chapters
            .iter()
            .map(|chapter| chapter.filtered(min_frequency).collect())
            .collect();

        let vocabulary: HashSet<&str> = filtered
            .iter()
            .flat_map(|counts| counts.keys().copied())
            .collect();

        let mut rows: Vec<CombinedRow> = vocabulary
            .into_iter()
            .map(|word| {
                let counts: Vec<usize> = filtered
                    .iter()
                    .map(|chapter| chapter.get(word).copied().unwrap_or(0))
                    .collect();
                CombinedRow {
                    word: word.to_string(),
                    total: counts.iter().sum(),
                    counts,
                }
            })
            .collect();
        sort_rows(&mut rows, policy, |row| (row.word.as_str(), row.total));

        CombinedTable {
            titles: chapters.iter().map(|c| c.title.clone()).collect(),
            rows,
        }
    }

    /// Chapter titles, in chapter order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Rows in report order.
    pub fn rows(&self) -> &[CombinedRow] {
        &self.rows
    }

    /// Header row: `Word`, one column per chapter, `Total`.
    pub fn header(&self) -> Vec<&str> {
        std::iter::once("Word")
            .chain(self.titles.iter().map(String::as_str))
            .chain(std::iter::once("Total"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(title: &str, words: &[(&str, usize)]) -> ChapterRecord {
        ChapterRecord::new(
            title,
            words.iter().map(|&(w, c)| (w.to_string(), c)).collect(),
        )
    }

    fn words(table: &FrequencyTable) -> Vec<&str> {
        table.iter().map(|(w, _)| w).collect()
    }

    #[test]
    fn test_frequency_policy_tie_break() {
        let ch = chapter("Ch1", &[("o_que", 2), ("é", 2), ("isso", 2)]);
        let table = FrequencyTable::from_chapter(&ch, 1, SortPolicy::Frequency);
        assert_eq!(words(&table), vec!["é", "isso", "o_que"]);
    }

    #[test]
    fn test_frequency_policy_count_first() {
        let ch = chapter("Ch1", &[("a", 1), ("b", 3), ("c", 2), ("d", 3)]);
        let table = FrequencyTable::from_chapter(&ch, 1, SortPolicy::Frequency);
        assert_eq!(words(&table), vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_alphabetical_policy() {
        let ch = chapter("Ch1", &[("zebra", 9), ("ação", 1), ("acordo", 5), ("abc", 2)]);
        let table = FrequencyTable::from_chapter(&ch, 1, SortPolicy::Alphabetical);
        assert_eq!(words(&table), vec!["abc", "ação", "acordo", "zebra"]);
    }

    #[test]
    fn test_accent_variants_are_ordered_deterministically() {
        assert_eq!(compare_words("e", "é"), Ordering::Less);
        assert_eq!(compare_words("é", "ea"), Ordering::Less);
        assert_eq!(compare_words("é", "é"), Ordering::Equal);
    }

    #[test]
    fn test_table_order_matches_compare_words() {
        let mut expected = vec!["Ébano", "ébano", "ebano", "é", "e", "ça", "ca", "cá"];
        let ch = chapter(
            "Ch1",
            &expected.iter().map(|&w| (w, 1usize)).collect::<Vec<_>>(),
        );
        expected.sort_by(|a, b| compare_words(a, b));

        let alphabetical = FrequencyTable::from_chapter(&ch, 1, SortPolicy::Alphabetical);
        assert_eq!(words(&alphabetical), expected);
        let frequency = FrequencyTable::from_chapter(&ch, 1, SortPolicy::Frequency);
        assert_eq!(words(&frequency), expected);
    }

    #[test]
    fn test_min_frequency_is_inclusive() {
        let ch = chapter("Ch1", &[("um", 1), ("dois", 2), ("tres", 3)]);
        let table = FrequencyTable::from_chapter(&ch, 2, SortPolicy::Frequency);
        assert_eq!(words(&table), vec!["tres", "dois"]);
    }

    #[test]
    fn test_combined_table_totals() {
        let chapters = vec![
            chapter("Ch1", &[("casa", 2), ("isso", 1)]),
            chapter("Ch2", &[("casa", 1), ("mar", 4)]),
        ];
        let table = CombinedTable::build(&chapters, 1, SortPolicy::Frequency);

        assert_eq!(table.header(), vec!["Word", "Ch1", "Ch2", "Total"]);
        let rows = table.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].word, "mar");
        assert_eq!(rows[0].counts, vec![0, 4]);
        assert_eq!(rows[1].word, "casa");
        assert_eq!(rows[1].counts, vec![2, 1]);
        assert_eq!(rows[1].total, 3);
        assert_eq!(rows[2].word, "isso");
        for row in rows {
            assert_eq!(row.total, row.counts.iter().sum::<usize>());
        }
    }

    #[test]
    fn test_combined_uses_summed_count() {
        // "b" never beats "a" in a single chapter but wins on the sum.
        let chapters = vec![
            chapter("Ch1", &[("a", 3), ("b", 2)]),
            chapter("Ch2", &[("a", 0), ("b", 2)]),
        ];
        let table = CombinedTable::build(&chapters, 1, SortPolicy::Frequency);
        let order: Vec<&str> = table.rows().iter().map(|r| r.word.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn test_combined_filters_per_chapter() {
        let chapters = vec![
            chapter("Ch1", &[("raro", 1), ("comum", 2)]),
            chapter("Ch2", &[("comum", 1)]),
        ];
        let table = CombinedTable::build(&chapters, 2, SortPolicy::Alphabetical);

        assert_eq!(table.rows().len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.word, "comum");
        // Below the threshold in Ch2, so it counts as absent there.
        assert_eq!(row.counts, vec![2, 0]);
        assert_eq!(row.total, 2);
    }

    #[test]
    fn test_duplicate_titles_stay_separate() {
        let chapters = vec![
            chapter("Intro", &[("olá", 1)]),
            chapter("Intro", &[("olá", 2)]),
        ];
        let table = CombinedTable::build(&chapters, 1, SortPolicy::Frequency);
        assert_eq!(table.header(), vec!["Word", "Intro", "Intro", "Total"]);
        assert_eq!(table.rows()[0].counts, vec![1, 2]);
        assert_eq!(table.rows()[0].total, 3);
    }

    #[test]
    fn test_sort_policy_parsing() {
        assert_eq!("frequency".parse::<SortPolicy>().unwrap(), SortPolicy::Frequency);
        assert_eq!(
            "Alphabetical".parse::<SortPolicy>().unwrap(),
            SortPolicy::Alphabetical
        );
        assert!("random".parse::<SortPolicy>().is_err());
        assert_eq!(SortPolicy::default().to_string(), "frequency");
    }
}
