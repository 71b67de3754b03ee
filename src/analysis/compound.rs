//! Fixed table of Brazilian Portuguese compound expressions.
//!
//! Each multi-word phrase is folded into a single placeholder token before
//! counting, so frequency analysis treats it as one semantic unit. The
//! placeholder is the phrase with every internal space replaced by
//! [`PLACEHOLDER_SEPARATOR`].
//!
//! # Examples
//!
//! ```
//! use chapterfreq::analysis::compound::CompoundTable;
//!
//! let table = CompoundTable::portuguese();
//! assert_eq!(table.placeholder_for("o que"), Some("o_que"));
//! assert_eq!(table.phrase_for("de_vez_em_quando"), Some("de vez em quando"));
//!
//! // Longest phrases come first.
//! let first = table.entries().next().unwrap();
//! assert_eq!(first.phrase, "de vez em quando");
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

/// Character joining the words of a folded compound expression.
pub const PLACEHOLDER_SEPARATOR: char = '_';

/// Phrases in declaration order. Declaration order breaks ties between
/// phrases of equal length.
const PORTUGUESE_PHRASES: &[&str] = &[
    // Question words
    "o que",
    "por que",
    "para que",
    // Preposition compounds
    "de acordo com",
    "ao lado de",
    "em frente",
    "em frente a",
    "dentro de",
    "fora de",
    "em cima de",
    "em baixo de",
    "a partir de",
    // Common expressions
    "até logo",
    "com certeza",
    "mais ou menos",
    "todo mundo",
    "todo dia",
    "boa noite",
    "bom dia",
    "boa tarde",
    // Time expressions
    "de vez em quando",
    "de repente",
    "às vezes",
    // Conjunctions and connectors
    "por isso",
    "ou seja",
    "pelo menos",
    "assim que",
    "mesmo que",
    "antes de",
    "depois de",
    // Verb phrases
    "tem que",
    "pode ser",
    "quer dizer",
    // Negations
    "ainda não",
    "já não",
    "nem mesmo",
];

static PORTUGUESE: LazyLock<CompoundTable> =
    LazyLock::new(|| CompoundTable::from_phrases(PORTUGUESE_PHRASES));

/// A single compound expression and its folded form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompoundEntry {
    /// The phrase as it appears in lowercased text.
    pub phrase: String,
    /// The single-token stand-in.
    pub placeholder: String,
}

impl CompoundEntry {
    /// Create an entry whose placeholder is derived from the phrase.
    pub fn new<S: Into<String>>(phrase: S) -> Self {
        let phrase = phrase.into();
        let placeholder = phrase.replace(' ', &PLACEHOLDER_SEPARATOR.to_string());
        CompoundEntry {
            phrase,
            placeholder,
        }
    }

    /// Phrase length in characters, the ordering key of the table.
    pub fn char_len(&self) -> usize {
        self.phrase.chars().count()
    }
}

/// An immutable table of compound expressions.
#[derive(Debug)]
pub struct CompoundTable {
    /// Entries sorted by phrase length, longest first.
    entries: Vec<CompoundEntry>,
    by_placeholder: HashMap<String, usize>,
    by_phrase: HashMap<String, usize>,
}

impl CompoundTable {
    /// The process-wide Portuguese table.
    pub fn portuguese() -> &'static CompoundTable {
        &PORTUGUESE
    }

    fn from_phrases(phrases: &[&str]) -> Self {
        let mut entries: Vec<CompoundEntry> =
            phrases.iter().map(|p| CompoundEntry::new(*p)).collect();
        // Stable: equal lengths keep declaration order.
        entries.sort_by_key(|e| std::cmp::Reverse(e.char_len()));

        let by_placeholder = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.placeholder.clone(), i))
            .collect();
        let by_phrase = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.phrase.clone(), i))
            .collect();

        CompoundTable {
            entries,
            by_placeholder,
            by_phrase,
        }
    }

    /// Iterate over the entries, longest phrase first.
    pub fn entries(&self) -> impl Iterator<Item = &CompoundEntry> {
        self.entries.iter()
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reverse lookup: the original phrase for a placeholder token.
    pub fn phrase_for(&self, placeholder: &str) -> Option<&str> {
        self.by_placeholder
            .get(placeholder)
            .map(|&i| self.entries[i].phrase.as_str())
    }

    /// Forward lookup: the placeholder for a phrase.
    pub fn placeholder_for(&self, phrase: &str) -> Option<&str> {
        self.by_phrase
            .get(phrase)
            .map(|&i| self.entries[i].placeholder.as_str())
    }

    /// Whether the token is one of the table's placeholders.
    pub fn is_placeholder(&self, token: &str) -> bool {
        self.by_placeholder.contains_key(token)
    }
}
