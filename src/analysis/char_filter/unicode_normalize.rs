//! Unicode normalization char filter.
//!
//! EPUB text may spell `ã` as one code point or as `a` followed by a
//! combining tilde. Composing to NFC before lowercasing keeps both spellings
//! as one word and keeps the accented letter inside the allow-list.

use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfc_quick};

use super::CharFilter;

/// A char filter that composes text to Unicode NFC.
#[derive(Debug, Clone, Default)]
pub struct UnicodeNormalizationCharFilter;

impl UnicodeNormalizationCharFilter {
    pub fn new() -> Self {
        UnicodeNormalizationCharFilter
    }
}

impl CharFilter for UnicodeNormalizationCharFilter {
    fn filter(&self, input: &str) -> String {
        // Most book text is already composed.
        match is_nfc_quick(input.chars()) {
            IsNormalized::Yes => input.to_string(),
            _ => input.nfc().collect(),
        }
    }

    fn name(&self) -> &'static str {
        "unicode_normalization"
    }
}
