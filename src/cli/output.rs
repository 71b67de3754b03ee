//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::args::{ChapterFreqArgs, OutputFormat};
use crate::error::Result;
use crate::report::csv_export::ExportSummary;
use crate::report::summary::{ChapterReport, CompoundSummary};

/// Rendering of a result for people rather than programs.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Result structure for book analysis.
///
/// The CSV export is reported separately, after this result is printed.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub compounds: CompoundSummary,
    pub chapters: Vec<ChapterReport>,
}

/// Result structure for text normalization.
#[derive(Debug, Serialize)]
pub struct NormalizationResult {
    pub normalizer: String,
    pub input: String,
    pub normalized: String,
    pub tokens: usize,
}

/// One entry of the compound listing.
#[derive(Debug, Serialize)]
pub struct CompoundListEntry {
    pub phrase: String,
    pub placeholder: String,
}

/// Result structure for the compound listing.
#[derive(Debug, Serialize)]
pub struct CompoundListing {
    pub compounds: Vec<CompoundListEntry>,
}

/// Output a result to stdout in the format selected on the command line.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &ChapterFreqArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, result, args.output_format, args.pretty)
}

/// Write a result in the given format.
pub fn write_result<W: Write, T: Serialize + HumanOutput>(
    out: &mut W,
    result: &T,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    match format {
        OutputFormat::Human => result.write_human(out)?,
        OutputFormat::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    out.flush()?;
    Ok(())
}

impl HumanOutput for CompoundSummary {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "=== Compound Expressions Analysis ===")?;

        for chapter in &self.chapters {
            writeln!(out)?;
            writeln!(out, "Chapter: {}", chapter.title)?;
            for compound in &chapter.compounds {
                writeln!(out, "'{}' appears {} times", compound.phrase, compound.count)?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Total Compound Expressions Across All Chapters:")?;
        if self.is_empty() {
            writeln!(out, "(none)")?;
        }
        for compound in &self.totals {
            writeln!(
                out,
                "'{}': {} total occurrences",
                compound.phrase, compound.count
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for ChapterReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "=== {} ===", self.title)?;
        writeln!(out, "Total unique words: {}", self.words.len())?;
        writeln!(out)?;
        writeln!(out, "Word Frequencies:")?;
        for (word, count) in self.words.iter() {
            writeln!(out, "{word}: {count}")?;
        }
        writeln!(out)?;
        writeln!(out, "Chapter Statistics:")?;
        writeln!(out, "Total words: {}", self.total_words)?;
        writeln!(out, "Unique words: {}", self.unique_words)?;
        Ok(())
    }
}

impl HumanOutput for AnalysisResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        self.compounds.write_human(out)?;

        if self.chapters.is_empty() {
            writeln!(out)?;
            writeln!(out, "No chapters were analyzed.")?;
        }
        for chapter in &self.chapters {
            writeln!(out)?;
            chapter.write_human(out)?;
        }
        Ok(())
    }
}

impl HumanOutput for ExportSummary {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(
            out,
            "CSV files exported to directory: {}",
            self.output_dir.display()
        )?;
        writeln!(
            out,
            "{} chapter files and {} have been created.",
            self.chapter_files.len(),
            self.combined_file
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_default()
        )
    }
}

impl HumanOutput for NormalizationResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.normalized)
    }
}

impl HumanOutput for CompoundListing {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for entry in &self.compounds {
            writeln!(out, "{:<20} {}", entry.phrase, entry.placeholder)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::*;
    use crate::analysis::compound::CompoundTable;
    use crate::chapter::ChapterRecord;
    use crate::report::table::SortPolicy;

    fn analysis_result() -> AnalysisResult {
        let frequencies: HashMap<String, usize> = [("o_que", 2), ("é", 2), ("isso", 2)]
            .into_iter()
            .map(|(w, c)| (w.to_string(), c))
            .collect();
        let chapters = vec![ChapterRecord::new("Ch1", frequencies)];
        AnalysisResult {
            compounds: CompoundSummary::collect(&chapters, CompoundTable::portuguese()),
            chapters: chapters
                .iter()
                .map(|c| ChapterReport::new(c, 1, SortPolicy::Frequency))
                .collect(),
        }
    }

    fn render<T: Serialize + HumanOutput>(result: &T, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_result(&mut buf, result, format, false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_human_analysis_output() {
        let text = render(&analysis_result(), OutputFormat::Human);

        let compounds = text.find("=== Compound Expressions Analysis ===").unwrap();
        let chapter = text.find("=== Ch1 ===").unwrap();
        assert!(compounds < chapter);
        assert!(text.contains("'o que' appears 2 times"));
        assert!(text.contains("'o que': 2 total occurrences"));
        assert!(text.contains("Total unique words: 3"));
        assert!(text.contains("é: 2\nisso: 2\no_que: 2\n"));
        assert!(text.contains("Total words: 6"));
        assert!(!text.contains("CSV files exported"));
    }

    #[test]
    fn test_human_export_line() {
        let export = ExportSummary {
            output_dir: PathBuf::from("out/word_frequency_analysis_20240101_000000"),
            chapter_files: vec![PathBuf::from("out/Ch1_frequencies.csv")],
            combined_file: PathBuf::from("out/combined_analysis.csv"),
        };
        let text = render(&export, OutputFormat::Human);
        assert!(text.contains(
            "CSV files exported to directory: out/word_frequency_analysis_20240101_000000"
        ));
        assert!(text.contains("1 chapter files and combined_analysis.csv"));
    }

    #[test]
    fn test_json_analysis_output() {
        let text = render(&analysis_result(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let chapter = &value["chapters"][0];
        assert_eq!(chapter["title"], "Ch1");
        assert_eq!(chapter["words"]["rows"][0][0], "é");
        assert_eq!(chapter["total_words"], 6);
        assert_eq!(value["compounds"]["totals"][0]["placeholder"], "o_que");
        assert!(value.get("export").is_none());
    }

    #[test]
    fn test_empty_analysis_output() {
        let result = AnalysisResult {
            compounds: CompoundSummary::default(),
            chapters: Vec::new(),
        };
        let text = render(&result, OutputFormat::Human);
        assert!(text.contains("No chapters were analyzed."));
    }

    #[test]
    fn test_normalization_output() {
        let result = NormalizationResult {
            normalizer: "portuguese".to_string(),
            input: "O que?".to_string(),
            normalized: "o_que".to_string(),
            tokens: 1,
        };
        assert_eq!(render(&result, OutputFormat::Human), "o_que\n");
    }
}
