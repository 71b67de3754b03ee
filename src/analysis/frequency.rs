//! Word frequency aggregation.
//!
//! Counts tokens by exact string equality. A folded compound such as
//! `o_que` is its own entry and never contributes to `o` or `que`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::analysis::normalizer::TextNormalizer;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Mapping from word to number of occurrences.
pub type WordFrequencies = HashMap<String, usize>;

/// Normalizes text, tokenizes it and counts the tokens.
#[derive(Clone)]
pub struct FrequencyAnalyzer {
    normalizer: TextNormalizer,
    tokenizer: Arc<dyn Tokenizer>,
}

impl Default for FrequencyAnalyzer {
    fn default() -> Self {
        Self::new(TextNormalizer::portuguese())
    }
}

impl FrequencyAnalyzer {
    /// Create an analyzer with the given normalizer and a whitespace tokenizer.
    pub fn new(normalizer: TextNormalizer) -> Self {
        FrequencyAnalyzer {
            normalizer,
            tokenizer: Arc::new(WhitespaceTokenizer::new()),
        }
    }

    /// Get the normalizer used by this analyzer.
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Count the tokens of already-normalized text.
    pub fn aggregate(&self, text: &str) -> Result<WordFrequencies> {
        let mut frequencies = WordFrequencies::new();
        for token in self.tokenizer.tokenize(text)? {
            *frequencies.entry(token.text).or_insert(0) += 1;
        }
        Ok(frequencies)
    }

    /// Normalize raw text and count its tokens.
    pub fn analyze(&self, raw_text: &str) -> Result<WordFrequencies> {
        let normalized = self.normalizer.normalize(raw_text);
        self.aggregate(&normalized)
    }
}

impl std::fmt::Debug for FrequencyAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrequencyAnalyzer")
            .field("normalizer", &self.normalizer)
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

/// Total number of tokens counted in `frequencies`.
pub fn total_tokens(frequencies: &WordFrequencies) -> usize {
    frequencies.values().sum()
}
