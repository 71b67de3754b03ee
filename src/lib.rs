//! # chapterfreq
//!
//! Per-chapter word frequencies of Brazilian Portuguese EPUB books.
//!
//! ## Features
//!
//! - Chapter extraction from EPUB containers, one chapter per content document
//! - Text normalization with folding of multi-word expressions (`o que` → `o_que`)
//! - Frequency tables sorted by count or alphabetically
//! - CSV export per chapter plus a combined table
//!
//! ```no_run
//! use chapterfreq::analysis::frequency::FrequencyAnalyzer;
//! use chapterfreq::config::AnalysisConfig;
//! use chapterfreq::epub::analyze_book;
//! use chapterfreq::report::CsvExporter;
//!
//! let chapters = analyze_book("book.epub", &FrequencyAnalyzer::default());
//! let exported = CsvExporter::new(&AnalysisConfig::default()).export(&chapters)?;
//! # Ok::<(), chapterfreq::error::ChapterFreqError>(())
//! ```

pub mod analysis;
pub mod chapter;
pub mod cli;
pub mod config;
pub mod epub;
pub mod error;
pub mod report;

pub mod prelude {
    pub use crate::analysis::frequency::{FrequencyAnalyzer, WordFrequencies};
    pub use crate::analysis::normalizer::TextNormalizer;
    pub use crate::chapter::ChapterRecord;
    pub use crate::config::AnalysisConfig;
    pub use crate::epub::{EpubExtractor, analyze_book};
    pub use crate::error::{ChapterFreqError, Result};
    pub use crate::report::{CsvExporter, SortPolicy};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
