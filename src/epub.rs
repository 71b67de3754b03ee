//! EPUB reading: container access, markup stripping and chapter extraction.

pub mod container;
pub mod extractor;
pub mod html;

pub use container::{EpubContainer, ManifestItem};
pub use extractor::{EpubExtractor, analyze_book};
pub use html::{HtmlDocument, parse_html};
