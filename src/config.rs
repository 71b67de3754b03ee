//! Configuration of an analysis run.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChapterFreqError, Result};
use crate::report::table::SortPolicy;

/// Settings shared by the console report and the CSV export.
///
/// Missing fields in a configuration file take their default values:
///
/// ```json
/// { "min_frequency": 2, "sort_policy": "alphabetical" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Words occurring fewer times than this in a chapter are left out of
    /// reports. Must be at least 1.
    pub min_frequency: usize,

    /// Row ordering of reports.
    pub sort_policy: SortPolicy,

    /// Whether CSV files are written.
    pub emit_files: bool,

    /// Directory in which the timestamped output directory is created.
    pub output_root: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_frequency: 1,
            sort_policy: SortPolicy::Frequency,
            emit_files: true,
            output_root: PathBuf::from("."),
        }
    }
}

impl AnalysisConfig {
    /// Create a builder starting from the defaults.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config: AnalysisConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.min_frequency == 0 {
            return Err(ChapterFreqError::invalid_argument(
                "min_frequency must be at least 1",
            ));
        }
        Ok(())
    }
}

/// A builder for [`AnalysisConfig`].
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum frequency.
    pub fn min_frequency(mut self, min_frequency: usize) -> Self {
        self.config.min_frequency = min_frequency;
        self
    }

    /// Set the sort policy.
    pub fn sort_policy(mut self, sort_policy: SortPolicy) -> Self {
        self.config.sort_policy = sort_policy;
        self
    }

    /// Enable or disable CSV output.
    pub fn emit_files(mut self, emit_files: bool) -> Self {
        self.config.emit_files = emit_files;
        self
    }

    /// Set the output root directory.
    pub fn output_root<P: Into<PathBuf>>(mut self, output_root: P) -> Self {
        self.config.output_root = output_root.into();
        self
    }

    pub fn build(self) -> AnalysisConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.min_frequency, 1);
        assert_eq!(config.sort_policy, SortPolicy::Frequency);
        assert!(config.emit_files);
        assert_eq!(config.output_root, PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = AnalysisConfig::builder()
            .min_frequency(3)
            .sort_policy(SortPolicy::Alphabetical)
            .emit_files(false)
            .output_root("/tmp/out")
            .build();
        assert_eq!(config.min_frequency, 3);
        assert_eq!(config.sort_policy, SortPolicy::Alphabetical);
        assert!(!config.emit_files);
        assert_eq!(config.output_root, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_zero_min_frequency_is_rejected() {
        let config = AnalysisConfig::builder().min_frequency(0).build();
        assert!(matches!(
            config.validate(),
            Err(ChapterFreqError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"min_frequency": 2, "sort_policy": "alphabetical"}}"#).unwrap();

        let config = AnalysisConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.min_frequency, 2);
        assert_eq!(config.sort_policy, SortPolicy::Alphabetical);
        assert!(config.emit_files);
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"min_frequency": 0}}"#).unwrap();
        assert!(AnalysisConfig::from_json_file(file.path()).is_err());

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            AnalysisConfig::from_json_file(file.path()),
            Err(ChapterFreqError::Json(_))
        ));
    }
}
