//! Chapter extraction from EPUB files.
//!
//! Two failure scopes are handled differently:
//!
//! - A container that cannot be opened or whose manifest cannot be read fails
//!   [`EpubExtractor::extract`] as a whole. [`analyze_book`] turns that into
//!   an empty result and logs the cause.
//! - A single content part that cannot be read or is not UTF-8 is logged and
//!   skipped; the remaining parts are still analyzed. Broken markup does not
//!   skip a part, see [`parse_html`].

use std::io::{Read, Seek};
use std::path::Path;

use log::{debug, error, info, warn};

use crate::analysis::frequency::FrequencyAnalyzer;
use crate::chapter::ChapterRecord;
use crate::epub::container::{EpubContainer, ManifestItem};
use crate::epub::html::parse_html;
use crate::error::{ChapterFreqError, Result};

/// Extracts one [`ChapterRecord`] per content document of an EPUB.
#[derive(Debug, Clone, Default)]
pub struct EpubExtractor {
    analyzer: FrequencyAnalyzer,
}

impl EpubExtractor {
    /// Create an extractor that counts words with `analyzer`.
    pub fn new(analyzer: FrequencyAnalyzer) -> Self {
        EpubExtractor { analyzer }
    }

    /// Extract the chapters of the EPUB at `path`, in manifest order.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<Vec<ChapterRecord>> {
        let path = path.as_ref();
        info!("Opening EPUB {}", path.display());
        let mut container = EpubContainer::open(path)?;
        Ok(self.extract_from(&mut container))
    }

    /// Extract the chapters of an already opened container.
    pub fn extract_from<R: Read + Seek>(
        &self,
        container: &mut EpubContainer<R>,
    ) -> Vec<ChapterRecord> {
        let documents: Vec<ManifestItem> = container.documents().cloned().collect();
        let mut chapters = Vec::with_capacity(documents.len());

        for item in &documents {
            match self.extract_part(container, item) {
                Ok(chapter) => chapters.push(chapter),
                Err(e) if e.is_part_level() => {
                    warn!("Skipping content part '{}': {e}", item.href)
                }
                Err(e) => warn!("Skipping unreadable content part '{}': {e}", item.href),
            }
        }

        info!(
            "Extracted {} of {} content documents",
            chapters.len(),
            documents.len()
        );
        chapters
    }

    fn extract_part<R: Read + Seek>(
        &self,
        container: &mut EpubContainer<R>,
        item: &ManifestItem,
    ) -> Result<ChapterRecord> {
        let bytes = container.read_part(item)?;
        let content = String::from_utf8(bytes)
            .map_err(|e| ChapterFreqError::decode(&item.href, e.to_string()))?;

        let document = parse_html(&item.href, &content);
        let title = document.chapter_title(&item.href);
        let frequencies = self.analyzer.analyze(&document.text)?;

        debug!(
            "Chapter '{}' ({}): {} distinct words",
            title,
            item.href,
            frequencies.len()
        );
        Ok(ChapterRecord::new(title, frequencies))
    }
}

/// Analyze the EPUB at `path`, degrading to an empty result when the
/// container itself cannot be processed.
pub fn analyze_book<P: AsRef<Path>>(path: P, analyzer: &FrequencyAnalyzer) -> Vec<ChapterRecord> {
    let path = path.as_ref();
    match EpubExtractor::new(analyzer.clone()).extract(path) {
        Ok(chapters) => chapters,
        Err(e) => {
            error!("Error processing EPUB {}: {e}", path.display());
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EpubExtractor::default()
            .extract("/nonexistent/book.epub")
            .unwrap_err();
        assert!(matches!(err, ChapterFreqError::Io(_)));
    }

    #[test]
    fn test_analyze_book_degrades_to_empty() {
        let chapters = analyze_book("/nonexistent/book.epub", &FrequencyAnalyzer::default());
        assert!(chapters.is_empty());
    }
}
