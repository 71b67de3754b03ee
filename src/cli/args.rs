//! Command line argument parsing for the chapterfreq CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::report::table::SortPolicy;

/// chapterfreq - Per-chapter word frequencies of Portuguese EPUB books
#[derive(Parser, Debug, Clone)]
#[command(name = "chapterfreq")]
#[command(about = "Per-chapter word frequencies of Portuguese EPUB books")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ChapterFreqArgs {
    /// Verbosity level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ChapterFreqArgs {
    /// Get the effective verbosity level (0=quiet, 1=normal, 2=verbose, 3+=debug)
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze an EPUB and export word frequencies
    Analyze(AnalyzeArgs),

    /// Print the normalized form of a text
    Normalize(NormalizeArgs),

    /// List the compound expressions, longest first
    Compounds,
}

/// Arguments for analyzing a book
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the EPUB file
    #[arg(value_name = "EPUB")]
    pub epub_path: PathBuf,

    /// Minimum occurrences for a word to be reported
    #[arg(short, long, value_name = "N")]
    pub min_frequency: Option<usize>,

    /// Row ordering
    #[arg(short, long, value_name = "POLICY")]
    pub sort: Option<SortPolicy>,

    /// Don't write CSV files
    #[arg(long)]
    pub no_export: bool,

    /// Directory in which the output directory is created
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

impl AnalyzeArgs {
    /// Build the analysis configuration: the config file or the defaults,
    /// overridden by the flags given on the command line.
    pub fn to_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(min_frequency) = self.min_frequency {
            config.min_frequency = min_frequency;
        }
        if let Some(sort) = self.sort {
            config.sort_policy = sort;
        }
        if self.no_export {
            config.emit_files = false;
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_root = output_dir.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Arguments for normalizing a text
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Text to normalize
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Leave compound expressions unfolded
    #[arg(long)]
    pub no_compounds: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
