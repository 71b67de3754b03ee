//! Text analysis module for chapterfreq.
//!
//! This module turns extracted chapter text into word counts: char filters
//! normalize the text, a tokenizer splits it, and the frequency analyzer
//! counts the tokens. Portuguese compound expressions are folded into single
//! tokens along the way.

pub mod char_filter;
pub mod compound;
pub mod frequency;
pub mod normalizer;
pub mod token;
pub mod tokenizer;
