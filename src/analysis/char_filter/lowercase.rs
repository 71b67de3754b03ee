//! Lowercase char filter.
//!
//! Operates on the whole text rather than on tokens, because compound
//! phrases are matched against lowercased text before tokenization.

use super::CharFilter;

/// A char filter that converts text to lowercase.
///
/// Uses Unicode-aware case mapping, so accented capitals (`Á`, `Ç`, `Ã`) map
/// to their lowercase forms.
#[derive(Clone, Debug, Default)]
pub struct LowercaseCharFilter;

impl LowercaseCharFilter {
    /// Create a new lowercase char filter.
    pub fn new() -> Self {
        LowercaseCharFilter
    }
}

impl CharFilter for LowercaseCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            input.to_ascii_lowercase()
        } else {
            input.to_lowercase()
        }
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_ascii() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("O QUE É"), "o que é");
        assert_eq!(filter.filter("Hello WORLD"), "hello world");
    }

    #[test]
    fn test_lowercase_accented() {
        let filter = LowercaseCharFilter::new();
        assert_eq!(filter.filter("ÀS VEZES"), "às vezes");
        assert_eq!(filter.filter("AÇÃO JÁ NÃO"), "ação já não");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LowercaseCharFilter::new().name(), "lowercase");
    }
}
