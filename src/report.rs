//! Frequency tables, console summaries and CSV export.

pub mod csv_export;
pub mod summary;
pub mod table;

pub use csv_export::{CsvExporter, ExportSummary};
pub use summary::{ChapterReport, CompoundSummary};
pub use table::{CombinedTable, FrequencyTable, SortPolicy};
