use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default size limit: 500 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Extensions accepted unless the caller configures otherwise
pub const DEFAULT_SUPPORTED_FORMATS: &[&str] = &[
    // Sequence
    "fasta", "fa", "fas", "fastq", "fq",
    // Tabular
    "csv", "tsv", "xlsx", "xls", "ods",
    // Document
    "pdf",
    // Structured
    "json", "xml",
    // Text
    "txt", "md", "rtf",
    // Laboratory
    "gb", "gbk", "genbank", "embl", "sam", "vcf", "bed", "gff", "gtf",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Per-call processing settings
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Files strictly larger than this are rejected
    pub max_file_size: u64,

    /// Lowercase extensions, without the leading dot
    pub supported_formats: Vec<String>,

    pub enable_batch_processing: bool,

    pub enable_validation: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            supported_formats: DEFAULT_SUPPORTED_FORMATS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            enable_batch_processing: true,
            enable_validation: true,
        }
    }
}

impl ProcessingConfig {
    /// Load a config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.normalize();
        Ok(config)
    }

    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    #[must_use]
    pub fn with_supported_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_formats = formats.into_iter().map(Into::into).collect();
        self.normalize();
        self
    }

    #[must_use]
    pub fn with_batch_processing(mut self, enabled: bool) -> Self {
        self.enable_batch_processing = enabled;
        self
    }

    #[must_use]
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.enable_validation = enabled;
        self
    }

    /// Whether an extension (any case, with or without a dot) is allowed
    #[must_use]
    pub fn is_supported(&self, extension: &str) -> bool {
        let ext = extension.trim_start_matches('.').to_lowercase();
        self.supported_formats.iter().any(|f| *f == ext)
    }

    /// Lowercase entries and strip leading dots
    fn normalize(&mut self) {
        for format in &mut self.supported_formats {
            *format = format.trim_start_matches('.').to_lowercase();
        }
    }
}
