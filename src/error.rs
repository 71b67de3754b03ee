//! Error types for the chapterfreq library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`ChapterFreqError`] enum.
//!
//! # Examples
//!
//! ```
//! use chapterfreq::error::{ChapterFreqError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ChapterFreqError::invalid_argument("min_frequency must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for chapterfreq operations.
#[derive(Error, Debug)]
pub enum ChapterFreqError {
    /// I/O errors (missing input file, unwritable output directory, ...)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The e-book container is not a valid archive or package.
    #[error("Container error: {0}")]
    Container(String),

    /// A content part is not valid UTF-8 text.
    #[error("Decode error in '{part}': {message}")]
    Decode { part: String, message: String },

    /// A content part's markup could not be parsed.
    #[error("Markup error in '{part}': {message}")]
    Markup { part: String, message: String },

    /// CSV writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument or configuration value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with ChapterFreqError.
pub type Result<T> = std::result::Result<T, ChapterFreqError>;

impl ChapterFreqError {
    /// Create a new container error.
    pub fn container<S: Into<String>>(msg: S) -> Self {
        ChapterFreqError::Container(msg.into())
    }

    /// Create a new decode error for the named content part.
    pub fn decode<P: Into<String>, S: Into<String>>(part: P, msg: S) -> Self {
        ChapterFreqError::Decode {
            part: part.into(),
            message: msg.into(),
        }
    }

    /// Create a new markup error for the named content part.
    pub fn markup<P: Into<String>, S: Into<String>>(part: P, msg: S) -> Self {
        ChapterFreqError::Markup {
            part: part.into(),
            message: msg.into(),
        }
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ChapterFreqError::InvalidArgument(msg.into())
    }

    /// Whether this error concerns a single content part rather than the
    /// whole container.
    pub fn is_part_level(&self) -> bool {
        matches!(
            self,
            ChapterFreqError::Decode { .. } | ChapterFreqError::Markup { .. }
        )
    }
}

impl From<zip::result::ZipError> for ChapterFreqError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => ChapterFreqError::Io(e),
            other => ChapterFreqError::Container(other.to_string()),
        }
    }
}
