use std::io::Read;
use std::time::Instant;

use chrono::Utc;
use flate2::read::GzDecoder;
use thiserror::Error;
use uuid::Uuid;

use crate::core::result::{FileMetadata, FileProcessingResult, ParsedData};
use crate::core::types::FormatTag;
use crate::core::validation::ValidationResult;
use crate::parsing::{csv, fasta, fastq, json, text, xml};
use crate::processing::config::ProcessingConfig;
use crate::processing::input::InputFile;
use crate::processing::insights::{
    generate_insights, generate_recommendations, generate_warnings,
};
use crate::processing::sniff::{detect, file_extension, has_gzip_suffix, is_gzip};

/// Content encoding assumed for every input
const ASSUMED_ENCODING: &str = "utf-8";

/// Failures that stop a file from being processed at all
///
/// Problems found inside the content are not errors; they are reported in
/// the result's `validation` instead.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File '{name}' is {size} bytes, exceeding the {max} byte limit")]
    SizeExceeded { name: String, size: u64, max: u64 },

    #[error("File '{name}' has unsupported extension '.{extension}'")]
    UnsupportedFormat { name: String, extension: String },

    #[error("Batch processing is disabled")]
    BatchDisabled,

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decompress '{name}': {source}")]
    Decompression {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs files through sniffing, parsing, validation and insight generation
#[derive(Debug, Clone, Default)]
pub struct FileProcessor {
    config: ProcessingConfig,
}

impl FileProcessor {
    #[must_use]
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Process one file
    ///
    /// # Errors
    ///
    /// Returns `SizeExceeded` or `UnsupportedFormat` before any content is
    /// read, or an I/O error if the content cannot be read or inflated.
    pub fn process_file(&self, file: &InputFile) -> Result<FileProcessingResult, ProcessingError> {
        let started = Instant::now();
        self.check_admissible(file)?;
        let bytes = file.read_bytes(self.read_limit())?;
        self.check_read_size(file, &bytes)?;
        self.finish(file, &bytes, started)
    }

    /// Process one file, reading its content without blocking the runtime
    ///
    /// # Errors
    ///
    /// Same as [`FileProcessor::process_file`].
    pub async fn process_file_async(
        &self,
        file: &InputFile,
    ) -> Result<FileProcessingResult, ProcessingError> {
        let started = Instant::now();
        self.check_admissible(file)?;
        let bytes = file.read_bytes_async(self.read_limit()).await?;
        self.check_read_size(file, &bytes)?;
        self.finish(file, &bytes, started)
    }

    /// Process files in order, skipping any that fail
    ///
    /// Failed files are logged and left out of the returned list; they never
    /// stop the remaining files from being processed.
    ///
    /// # Errors
    ///
    /// Returns `BatchDisabled` if batch processing is turned off.
    pub fn process_batch(
        &self,
        files: &[InputFile],
    ) -> Result<Vec<FileProcessingResult>, ProcessingError> {
        let outcomes = self.process_each(files)?;

        let mut results = Vec::with_capacity(files.len());
        for (file, outcome) in files.iter().zip(outcomes) {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) => tracing::warn!("Skipping {}: {}", file.name, e),
            }
        }

        tracing::info!(
            "Batch complete: {} of {} files processed",
            results.len(),
            files.len()
        );
        Ok(results)
    }

    /// Process files in order, keeping one outcome per input
    ///
    /// The outcome at index `i` belongs to `files[i]`.
    ///
    /// # Errors
    ///
    /// Returns `BatchDisabled` if batch processing is turned off.
    pub fn process_each(
        &self,
        files: &[InputFile],
    ) -> Result<Vec<Result<FileProcessingResult, ProcessingError>>, ProcessingError> {
        if !self.config.enable_batch_processing {
            return Err(ProcessingError::BatchDisabled);
        }
        Ok(files.iter().map(|file| self.process_file(file)).collect())
    }

    /// Size and allow-list checks, run before any content is read
    fn check_admissible(&self, file: &InputFile) -> Result<(), ProcessingError> {
        if file.size > self.config.max_file_size {
            return Err(ProcessingError::SizeExceeded {
                name: file.name.clone(),
                size: file.size,
                max: self.config.max_file_size,
            });
        }

        // A name without an extension is left to the sniffer
        if let Some(extension) = file_extension(&file.name) {
            if !self.config.is_supported(&extension) {
                return Err(ProcessingError::UnsupportedFormat {
                    name: file.name.clone(),
                    extension,
                });
            }
        }
        Ok(())
    }

    /// One byte past the size limit, enough to tell that a file outgrew it
    fn read_limit(&self) -> u64 {
        self.config.max_file_size.saturating_add(1)
    }

    /// Files can grow between being described and being read
    fn check_read_size(&self, file: &InputFile, bytes: &[u8]) -> Result<(), ProcessingError> {
        let size = bytes.len() as u64;
        if size > self.config.max_file_size {
            return Err(ProcessingError::SizeExceeded {
                name: file.name.clone(),
                size,
                max: self.config.max_file_size,
            });
        }
        Ok(())
    }

    fn finish(
        &self,
        file: &InputFile,
        bytes: &[u8],
        started: Instant,
    ) -> Result<FileProcessingResult, ProcessingError> {
        let compressed = has_gzip_suffix(&file.name) && is_gzip(bytes);
        let inflated;
        let content = if compressed {
            inflated = self.inflate(&file.name, bytes)?;
            inflated.as_slice()
        } else {
            bytes
        };
        let text = String::from_utf8_lossy(content);

        let format = detect(&file.name, &file.mime_type);
        tracing::debug!("Processing {} as {}", file.name, format);

        let metadata = FileMetadata {
            name: file.name.clone(),
            size: file.size,
            mime_type: file.mime_type.clone(),
            last_modified: file.last_modified,
            encoding: ASSUMED_ENCODING.to_string(),
            compressed,
        };

        let (data, validation) = parse_content(format, &text);
        let validation = if self.config.enable_validation {
            validation
        } else {
            ValidationResult::unchecked()
        };

        let insights = generate_insights(format, &data, &metadata);
        let recommendations = generate_recommendations(format, &data, &validation);
        let warnings = generate_warnings(&validation);

        let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(
            "Processed {} ({}) in {:.2} ms, valid: {}",
            file.name,
            format,
            processing_time_ms,
            validation.is_valid()
        );

        Ok(FileProcessingResult {
            id: Uuid::new_v4(),
            filename: file.name.clone(),
            mime_type: file.mime_type.clone(),
            format,
            processed_at: Utc::now(),
            processing_time_ms,
            file_size: file.size,
            record_count: data.record_count(),
            data,
            metadata,
            validation,
            insights,
            warnings,
            recommendations,
        })
    }

    /// Inflate gzip content, holding the output to the size limit
    fn inflate(&self, name: &str, bytes: &[u8]) -> Result<Vec<u8>, ProcessingError> {
        let max = self.config.max_file_size;
        let mut out = Vec::new();
        GzDecoder::new(bytes)
            .take(max.saturating_add(1))
            .read_to_end(&mut out)
            .map_err(|source| ProcessingError::Decompression {
                name: name.to_string(),
                source,
            })?;

        let size = out.len() as u64;
        if size > max {
            return Err(ProcessingError::SizeExceeded {
                name: name.to_string(),
                size,
                max,
            });
        }
        Ok(out)
    }
}

/// Dispatch decoded text to the parser for its format
///
/// Formats without a dedicated parser pass through as plain text; Excel and
/// PDF get a placeholder payload.
#[must_use]
pub fn parse_content(format: FormatTag, content: &str) -> (ParsedData, ValidationResult) {
    match format {
        FormatTag::Fasta => {
            let (records, validation) = fasta::parse_fasta(content);
            (ParsedData::Sequences(records), validation)
        }
        FormatTag::Fastq => {
            let (records, validation) = fastq::parse_fastq(content);
            (ParsedData::Sequences(records), validation)
        }
        FormatTag::Csv => {
            let (table, validation) = csv::parse_csv(content);
            (ParsedData::Table(table), validation)
        }
        FormatTag::Json => {
            let (value, validation) = json::parse_json(content);
            (ParsedData::Json(value), validation)
        }
        FormatTag::Xml => {
            let (doc, validation) = xml::parse_xml(content);
            (ParsedData::Xml(doc), validation)
        }
        _ if format.is_placeholder() => {
            let (stub, validation) = text::placeholder(format);
            (ParsedData::Placeholder(stub), validation)
        }
        _ => {
            let (text, validation) = text::parse_text(content);
            (ParsedData::Text(text), validation)
        }
    }
}
