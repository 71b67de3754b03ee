//! Command implementations for the chapterfreq CLI.

use std::io::{self, Write};

use log::info;

use crate::analysis::compound::CompoundTable;
use crate::analysis::frequency::{FrequencyAnalyzer, total_tokens};
use crate::analysis::normalizer::TextNormalizer;
use crate::chapter::ChapterRecord;
use crate::config::AnalysisConfig;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::epub::extractor::analyze_book;
use crate::error::Result;
use crate::report::csv_export::CsvExporter;
use crate::report::summary::{ChapterReport, CompoundSummary};

/// Execute a CLI command.
pub fn execute_command(args: ChapterFreqArgs) -> Result<()> {
    match &args.command {
        Command::Analyze(analyze_args) => analyze(analyze_args, &args),
        Command::Normalize(normalize_args) => normalize(normalize_args, &args),
        Command::Compounds => list_compounds(&args),
    }
}

/// Analyze a book, print the reports, then export the CSV files.
fn analyze(args: &AnalyzeArgs, cli_args: &ChapterFreqArgs) -> Result<()> {
    let config = args.to_config()?;
    let analyzer = FrequencyAnalyzer::default();

    let chapters = analyze_book(&args.epub_path, &analyzer);
    info!("Analyzed {} chapters", chapters.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report_and_export(
        &mut out,
        &chapters,
        &config,
        cli_args.output_format,
        cli_args.pretty,
    )
}

/// Write the analysis report to `out`, then export the CSV files. The report
/// is complete before any file is written.
fn report_and_export<W: Write>(
    out: &mut W,
    chapters: &[ChapterRecord],
    config: &AnalysisConfig,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    let compounds = CompoundSummary::collect(chapters, CompoundTable::portuguese());
    let reports = chapters
        .iter()
        .map(|chapter| ChapterReport::new(chapter, config.min_frequency, config.sort_policy))
        .collect();

    write_result(
        out,
        &AnalysisResult {
            compounds,
            chapters: reports,
        },
        format,
        pretty,
    )?;

    if config.emit_files {
        if let Some(export) = CsvExporter::new(config).export(chapters)? {
            write_result(out, &export, format, pretty)?;
        }
    }
    Ok(())
}

/// Print the normalized form of a text.
fn normalize(args: &NormalizeArgs, cli_args: &ChapterFreqArgs) -> Result<()> {
    output_result(&normalization_result(args)?, cli_args)
}

fn normalization_result(args: &NormalizeArgs) -> Result<NormalizationResult> {
    let normalizer = if args.no_compounds {
        TextNormalizer::portuguese_without_compounds()
    } else {
        TextNormalizer::portuguese()
    };
    let analyzer = FrequencyAnalyzer::new(normalizer);
    let normalized = analyzer.normalizer().normalize(&args.text);
    let frequencies = analyzer.aggregate(&normalized)?;

    Ok(NormalizationResult {
        normalizer: analyzer.normalizer().name().to_string(),
        input: args.text.clone(),
        normalized,
        tokens: total_tokens(&frequencies),
    })
}

/// List the compound table in matching order.
fn list_compounds(cli_args: &ChapterFreqArgs) -> Result<()> {
    let compounds = CompoundTable::portuguese()
        .entries()
        .map(|entry| CompoundListEntry {
            phrase: entry.phrase.clone(),
            placeholder: entry.placeholder.clone(),
        })
        .collect();

    output_result(&CompoundListing { compounds }, cli_args)
}
