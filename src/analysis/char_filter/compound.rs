//! Compound expression folding.
//!
//! Replaces each known multi-word phrase with its placeholder token. Phrases
//! are applied one at a time, longest first, each as a single non-overlapping
//! left-to-right substring replacement over the whole text. Once a longer
//! phrase has been folded its words are joined by the separator, so a shorter
//! phrase contained in it can no longer match there. Two phrases of equal
//! length that only overlap can both fold: `"nem mesmo que"` becomes
//! `"nem_mesmo_que"`.
//!
//! Matching is literal and does not respect word boundaries: the input is
//! expected to be lowercased already, and a phrase embedded inside longer
//! words (`"tio que"` contains `"o que"`) is folded too.

use super::CharFilter;
use crate::analysis::compound::CompoundTable;

/// A char filter that folds compound expressions into placeholder tokens.
#[derive(Debug, Clone, Copy)]
pub struct CompoundCharFilter {
    table: &'static CompoundTable,
}

impl Default for CompoundCharFilter {
    fn default() -> Self {
        Self::new(CompoundTable::portuguese())
    }
}

impl CompoundCharFilter {
    /// Create a filter over the given table.
    pub fn new(table: &'static CompoundTable) -> Self {
        CompoundCharFilter { table }
    }
}

impl CharFilter for CompoundCharFilter {
    fn filter(&self, input: &str) -> String {
        let mut output = input.to_string();
        for entry in self.table.entries() {
            if output.contains(entry.phrase.as_str()) {
                output = output.replace(entry.phrase.as_str(), &entry.placeholder);
            }
        }
        output
    }

    fn name(&self) -> &'static str {
        "compound"
    }
}
