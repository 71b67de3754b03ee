//! Text normalizer built from a chain of char filters.
//!
//! The normalizer turns extracted chapter text into a single-spaced string of
//! lowercase words ready for whitespace tokenization. The standard
//! Portuguese chain applies, in order:
//!
//! 1. HTML entity decoding
//! 2. NFC composition
//! 3. Lowercasing
//! 4. Compound expression folding
//! 5. Stripping of characters outside the allow-list
//! 6. Whitespace collapsing and trimming
//!
//! # Examples
//!
//! ```
//! use chapterfreq::analysis::normalizer::TextNormalizer;
//!
//! let normalizer = TextNormalizer::portuguese();
//! assert_eq!(
//!     normalizer.normalize("o que é isso? O QUE é isso!"),
//!     "o_que é isso o_que é isso"
//! );
//! ```

use std::sync::Arc;

use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::compound::CompoundCharFilter;
use crate::analysis::char_filter::html_entity::HtmlEntityCharFilter;
use crate::analysis::char_filter::lowercase::LowercaseCharFilter;
use crate::analysis::char_filter::pattern_replace::{
    PatternReplaceCharFilter, WhitespaceCollapseCharFilter,
};
use crate::analysis::char_filter::unicode_normalize::UnicodeNormalizationCharFilter;

/// A configurable chain of char filters.
#[derive(Clone, Default)]
pub struct TextNormalizer {
    char_filters: Vec<Arc<dyn CharFilter>>,
    name: String,
}

impl TextNormalizer {
    /// Create an empty normalizer that returns its input unchanged.
    pub fn new() -> Self {
        TextNormalizer {
            char_filters: Vec::new(),
            name: "identity".to_string(),
        }
    }

    /// The standard chain for Brazilian Portuguese text.
    pub fn portuguese() -> Self {
        TextNormalizer::new()
            .add_char_filter(Arc::new(HtmlEntityCharFilter::new()))
            .add_char_filter(Arc::new(UnicodeNormalizationCharFilter::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(CompoundCharFilter::default()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::strip_disallowed()))
            .add_char_filter(Arc::new(WhitespaceCollapseCharFilter::new()))
            .with_name("portuguese")
    }

    /// The standard chain without compound folding: phrases stay as
    /// separate words.
    pub fn portuguese_without_compounds() -> Self {
        TextNormalizer::new()
            .add_char_filter(Arc::new(HtmlEntityCharFilter::new()))
            .add_char_filter(Arc::new(UnicodeNormalizationCharFilter::new()))
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::strip_disallowed()))
            .add_char_filter(Arc::new(WhitespaceCollapseCharFilter::new()))
            .with_name("portuguese_without_compounds")
    }

    /// Add a char filter to the end of the chain.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Set a custom name for this normalizer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the name of this normalizer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the char filters used by this normalizer.
    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    /// Run every char filter over `text`, in order.
    pub fn normalize(&self, text: &str) -> String {
        let mut filtered = text.to_string();
        for char_filter in &self.char_filters {
            filtered = char_filter.filter(&filtered);
        }
        filtered
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("name", &self.name)
            .field(
                "char_filters",
                &self
                    .char_filters
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compound::CompoundTable;

    fn normalize(text: &str) -> String {
        TextNormalizer::portuguese().normalize(text)
    }

    #[test]
    fn test_filter_order() {
        let names: Vec<&str> = TextNormalizer::portuguese()
            .char_filters()
            .iter()
            .map(|f| f.name())
            .collect();
        assert_eq!(
            names,
            vec![
                "html_entity",
                "unicode_normalization",
                "lowercase",
                "compound",
                "pattern_replace",
                "whitespace_collapse",
            ]
        );
    }

    #[test]
    fn test_scenario_sentence() {
        assert_eq!(
            normalize("o que é isso? O QUE é isso!"),
            "o_que é isso o_que é isso"
        );
    }

    #[test]
    fn test_entities_decoded_before_lowercasing() {
        // &Eacute; must become "é", not be stripped.
        assert_eq!(normalize("&Eacute; ISSO"), "é isso");
        assert_eq!(normalize("caf&eacute;&nbsp;bom"), "café bom");
    }

    #[test]
    fn test_entity_built_phrase_is_folded() {
        assert_eq!(normalize("&Agrave;s vezes"), "às_vezes");
    }

    #[test]
    fn test_decomposed_accents_survive() {
        assert_eq!(normalize("Ate\u{0301} logo"), "até_logo");
    }

    #[test]
    fn test_punctuation_does_not_fuse_tokens() {
        assert_eq!(normalize("isso,aquilo;outro"), "isso aquilo outro");
        assert_eq!(normalize("— Bom dia! —"), "bom_dia");
    }

    #[test]
    fn test_digits_and_symbols_removed() {
        assert_eq!(normalize("Capítulo 12: A Casa"), "capítulo a casa");
        assert_eq!(normalize("123 !!! ..."), "");
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \n\t "), "");
    }

    #[test]
    fn test_punctuation_inside_phrase_blocks_folding() {
        // Folding happens before punctuation is stripped.
        assert_eq!(normalize("o, que"), "o que");
    }

    #[test]
    fn test_every_phrase_folds_to_one_token() {
        let normalizer = TextNormalizer::portuguese();
        for entry in CompoundTable::portuguese().entries() {
            let text = format!("Xyz {} zyx.", entry.phrase);
            let normalized = normalizer.normalize(&text);
            let tokens: Vec<&str> = normalized.split(' ').collect();
            assert!(
                tokens.contains(&entry.placeholder.as_str()),
                "{} -> {}",
                entry.phrase,
                normalized
            );
            for word in entry.phrase.split(' ') {
                assert!(!tokens.contains(&word), "{} -> {}", entry.phrase, normalized);
            }
        }
    }

    #[test]
    fn test_steps_two_to_five_are_idempotent() {
        let samples = [
            "o que é isso? O QUE é isso!",
            "Em frente a casa, de vez em quando, às vezes...",
            "<p>HTML &amp; entidades</p> 42",
            "",
        ];
        // Lowercasing, folding, stripping and collapsing, without decoding.
        let rest = TextNormalizer::new()
            .add_char_filter(Arc::new(LowercaseCharFilter::new()))
            .add_char_filter(Arc::new(CompoundCharFilter::default()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::strip_disallowed()))
            .add_char_filter(Arc::new(WhitespaceCollapseCharFilter::new()));
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(rest.normalize(&once), once);
        }
    }

    #[test]
    fn test_without_compounds_still_decodes() {
        let normalizer = TextNormalizer::portuguese_without_compounds();
        assert_eq!(normalizer.normalize("Caf&eacute; o que"), "café o que");
        assert_eq!(normalizer.normalize("Ate\u{0301} LOGO!"), "até logo");
        assert_eq!(
            TextNormalizer::portuguese().normalize("Caf&eacute; o que"),
            "café o_que"
        );
    }

    #[test]
    fn test_empty_normalizer_is_identity() {
        let normalizer = TextNormalizer::new();
        assert_eq!(normalizer.normalize("Olá, Mundo!"), "Olá, Mundo!");
        assert_eq!(normalizer.name(), "identity");
    }
}
