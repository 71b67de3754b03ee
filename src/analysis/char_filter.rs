//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the raw text string before it is tokenized. The
//! [`TextNormalizer`](crate::analysis::normalizer::TextNormalizer) runs them
//! in sequence, and the order matters: entities must be decoded before case
//! folding, and case folding must happen before compound phrases are matched.
//!
//! # Available Filters
//!
//! - [`html_entity::HtmlEntityCharFilter`] - Decodes HTML/XML character references
//! - [`unicode_normalize::UnicodeNormalizationCharFilter`] - Unicode normalization (NFC, NFD, etc.)
//! - [`lowercase::LowercaseCharFilter`] - Unicode-aware lowercasing
//! - [`compound::CompoundCharFilter`] - Folds compound expressions into placeholder tokens
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//! - [`pattern_replace::WhitespaceCollapseCharFilter`] - Collapses and trims whitespace
//!
//! # Examples
//!
//! ```
//! use chapterfreq::analysis::char_filter::CharFilter;
//! use chapterfreq::analysis::char_filter::lowercase::LowercaseCharFilter;
//!
//! let filter = LowercaseCharFilter::new();
//! assert_eq!(filter.filter("Ação"), "ação");
//! ```

/// Trait for character filters that transform text before tokenization.
///
/// Implementations must be total: every input string produces an output
/// string, never an error.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod compound;
pub mod html_entity;
pub mod lowercase;
pub mod pattern_replace;
pub mod unicode_normalize;
