//! Regex-based char filters.

use std::sync::LazyLock;

use regex::Regex;

use super::CharFilter;

/// Accented letters that survive character stripping.
pub const PORTUGUESE_ACCENTED_LETTERS: &str = "áéíóúâêîôûãõàèìòùäëïöüçñ";

static DISALLOWED_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"[^a-z{PORTUGUESE_ACCENTED_LETTERS}\s_]"))
        .expect("allow-list pattern should be valid")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern should be valid"));

/// A char filter that replaces text matching a regex pattern.
#[derive(Debug, Clone)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Replace every character that is not a lowercase ASCII letter, a
    /// Portuguese accented letter, the placeholder separator or whitespace
    /// with a single space.
    ///
    /// Stripped characters become spaces rather than being deleted so that
    /// `"isso,aquilo"` yields two tokens.
    pub fn strip_disallowed() -> Self {
        Self {
            pattern: DISALLOWED_CHARS.clone(),
            replacement: " ".to_string(),
        }
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, regex::NoExpand(&self.replacement))
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}

/// Collapses every whitespace run to one space and trims both ends.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceCollapseCharFilter;

impl WhitespaceCollapseCharFilter {
    pub fn new() -> Self {
        WhitespaceCollapseCharFilter
    }
}

impl CharFilter for WhitespaceCollapseCharFilter {
    fn filter(&self, input: &str) -> String {
        WHITESPACE_RUN.replace_all(input, " ").trim().to_string()
    }

    fn name(&self) -> &'static str {
        "whitespace_collapse"
    }
}
