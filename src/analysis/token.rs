//! Token types for text analysis.
//!
//! A [`Token`] is a single word of normalized text. Folded compounds such as
//! `o_que` are single tokens.
//!
//! # Examples
//!
//! ```
//! use chapterfreq::analysis::token::Token;
//!
//! let token = Token::new("o_que");
//! assert_eq!(token.text, "o_que");
//! ```

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The text content of the token
    pub text: String,
}

impl Token {
    /// Create a new token with the given text.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Token { text: text.into() }
    }
}

/// A stream of tokens, as produced by a tokenizer.
pub type TokenStream = Box<dyn Iterator<Item = Token> + Send>;
