//! CSV export of frequency tables.
//!
//! Every run writes into a new directory named after the current time:
//!
//! ```text
//! word_frequency_analysis_20240131_154500/
//! ├── Capítulo_1_frequencies.csv      Word,Frequency
//! ├── Capítulo_2_frequencies.csv
//! └── combined_analysis.csv           Word,<titles...>,Total
//! ```
//!
//! Write errors are returned to the caller; a failure part-way through a
//! file leaves that file partially written.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use csv::Writer;
use log::{debug, info, warn};
use regex::Regex;
use serde::Serialize;

use crate::chapter::ChapterRecord;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::report::table::{CombinedTable, FrequencyTable, SortPolicy};

/// Prefix of every output directory.
pub const OUTPUT_DIR_PREFIX: &str = "word_frequency_analysis_";

/// Suffix of per-chapter file names.
pub const CHAPTER_FILE_SUFFIX: &str = "_frequencies.csv";

/// Name of the combined table file.
pub const COMBINED_FILE_NAME: &str = "combined_analysis.csv";

static TITLE_DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("title pattern should be valid"));

/// Turn a chapter title into a file name stem.
///
/// Removes everything except word characters, whitespace and `-`, then
/// replaces each space with `_`. Other whitespace is kept as is.
pub fn sanitize_title(title: &str) -> String {
    TITLE_DISALLOWED.replace_all(title, "").replace(' ', "_")
}

/// Name of the output directory for a run started at `time`.
pub fn output_dir_name(time: DateTime<Local>) -> String {
    format!("{OUTPUT_DIR_PREFIX}{}", time.format("%Y%m%d_%H%M%S"))
}

/// Files written by one export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub output_dir: PathBuf,
    pub chapter_files: Vec<PathBuf>,
    pub combined_file: PathBuf,
}

/// Writes per-chapter and combined CSV files.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_root: PathBuf,
    min_frequency: usize,
    sort_policy: SortPolicy,
}

impl CsvExporter {
    /// Create an exporter from the analysis configuration.
    pub fn new(config: &AnalysisConfig) -> Self {
        CsvExporter {
            output_root: config.output_root.clone(),
            min_frequency: config.min_frequency,
            sort_policy: config.sort_policy,
        }
    }

    /// Export into a new timestamped directory under the output root.
    ///
    /// Returns `None` without touching the file system when there are no
    /// chapters.
    pub fn export(&self, chapters: &[ChapterRecord]) -> Result<Option<ExportSummary>> {
        if chapters.is_empty() {
            warn!("No chapters to export");
            return Ok(None);
        }
        let output_dir = self.output_root.join(output_dir_name(Local::now()));
        self.export_to_dir(chapters, &output_dir).map(Some)
    }

    /// Export into `output_dir`, creating it if needed.
    pub fn export_to_dir(
        &self,
        chapters: &[ChapterRecord],
        output_dir: &Path,
    ) -> Result<ExportSummary> {
        fs::create_dir_all(output_dir)?;
        info!("Exporting CSV files to {}", output_dir.display());

        let mut used_stems = HashSet::new();
        let mut chapter_files = Vec::with_capacity(chapters.len());
        for chapter in chapters {
            let stem = unique_stem(&sanitize_title(&chapter.title), &mut used_stems);
            let path = output_dir.join(format!("{stem}{CHAPTER_FILE_SUFFIX}"));
            let table = FrequencyTable::from_chapter(chapter, self.min_frequency, self.sort_policy);
            write_chapter_file(&path, &table)?;
            debug!("Wrote {} rows to {}", table.len(), path.display());
            chapter_files.push(path);
        }

        let combined_file = output_dir.join(COMBINED_FILE_NAME);
        let combined = CombinedTable::build(chapters, self.min_frequency, self.sort_policy);
        write_combined_file(&combined_file, &combined)?;
        debug!(
            "Wrote {} rows to {}",
            combined.rows().len(),
            combined_file.display()
        );

        Ok(ExportSummary {
            output_dir: output_dir.to_path_buf(),
            chapter_files,
            combined_file,
        })
    }
}

/// Make `stem` unique among the stems already used in this export, so
/// chapters with the same title do not overwrite each other.
fn unique_stem(stem: &str, used: &mut HashSet<String>) -> String {
    let base = if stem.is_empty() { "untitled" } else { stem };
    let mut candidate = base.to_string();
    let mut n = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{base}_{n}");
        n += 1;
    }
    candidate
}

/// Write a `Word,Frequency` file.
pub fn write_chapter_file(path: &Path, table: &FrequencyTable) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(["Word", "Frequency"])?;
    for (word, count) in table.iter() {
        let count = count.to_string();
        writer.write_record([word, count.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the `Word,<titles...>,Total` file.
pub fn write_combined_file(path: &Path, table: &CombinedTable) -> Result<()> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(table.header())?;
    for row in table.rows() {
        let record: Vec<String> = std::iter::once(row.word.clone())
            .chain(row.counts.iter().map(usize::to_string))
            .chain(std::iter::once(row.total.to_string()))
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
