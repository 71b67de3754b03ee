//! Tokenizer implementations for text analysis.
//!
//! Tokenizers split normalized text into tokens. Normalized text contains
//! single spaces between words and folded compounds contain no spaces, so
//! whitespace splitting is all the frequency analysis needs.
//!
//! # Examples
//!
//! ```
//! use chapterfreq::analysis::tokenizer::Tokenizer;
//! use chapterfreq::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("o_que é isso").unwrap().collect();
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "o_que");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod whitespace;
