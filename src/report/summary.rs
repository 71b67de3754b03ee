//! Data behind the console summary.

use std::collections::HashMap;

use serde::Serialize;

use crate::analysis::compound::CompoundTable;
use crate::chapter::ChapterRecord;
use crate::report::table::{FrequencyTable, SortPolicy};

/// Occurrences of one compound expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompoundCount {
    /// The original phrase, e.g. `o que`.
    pub phrase: String,
    /// The folded token, e.g. `o_que`.
    pub placeholder: String,
    pub count: usize,
}

/// Compound expressions found in one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterCompounds {
    pub title: String,
    pub compounds: Vec<CompoundCount>,
}

/// Compound expression statistics per chapter and across the whole book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompoundSummary {
    /// Chapters containing at least one compound, in chapter order.
    pub chapters: Vec<ChapterCompounds>,
    /// Book-wide totals.
    pub totals: Vec<CompoundCount>,
}

fn sorted_counts(counts: HashMap<&str, usize>, table: &CompoundTable) -> Vec<CompoundCount> {
    let mut counts: Vec<CompoundCount> = counts
        .into_iter()
        .filter_map(|(placeholder, count)| {
            table.phrase_for(placeholder).map(|phrase| CompoundCount {
                phrase: phrase.to_string(),
                placeholder: placeholder.to_string(),
                count,
            })
        })
        .collect();
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.phrase.cmp(&b.phrase))
    });
    counts
}

impl CompoundSummary {
    /// Count the placeholders of `table` in every chapter.
    pub fn collect(chapters: &[ChapterRecord], table: &CompoundTable) -> Self {
        let mut totals: HashMap<&str, usize> = HashMap::new();
        let mut per_chapter = Vec::new();

        for chapter in chapters {
            let found: HashMap<&str, usize> = chapter
                .frequencies
                .iter()
                .filter(|(word, _)| table.is_placeholder(word))
                .map(|(word, &count)| (word.as_str(), count))
                .collect();
            if found.is_empty() {
                continue;
            }
            for (&placeholder, &count) in &found {
                *totals.entry(placeholder).or_insert(0) += count;
            }
            per_chapter.push(ChapterCompounds {
                title: chapter.title.clone(),
                compounds: sorted_counts(found, table),
            });
        }

        CompoundSummary {
            chapters: per_chapter,
            totals: sorted_counts(totals, table),
        }
    }

    /// Whether no compound was found anywhere.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Everything printed for one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterReport {
    pub title: String,
    /// Filtered and sorted words.
    pub words: FrequencyTable,
    /// Token count before filtering.
    pub total_words: usize,
    /// Distinct words before filtering.
    pub unique_words: usize,
}

impl ChapterReport {
    pub fn new(chapter: &ChapterRecord, min_frequency: usize, policy: SortPolicy) -> Self {
        ChapterReport {
            title: chapter.title.clone(),
            words: FrequencyTable::from_chapter(chapter, min_frequency, policy),
            total_words: chapter.total_words(),
            unique_words: chapter.unique_words(),
        }
    }
}
