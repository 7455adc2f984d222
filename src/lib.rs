//! # lab-ingest
//!
//! A library for ingesting and validating laboratory data files.
//!
//! Instruments and LIMS exports produce a mix of sequence files, plate
//! layouts, structured run reports and free text. `lab-ingest` takes any of
//! these, decides what it is, parses it, checks it, and returns one uniform
//! result describing the content and every problem found.
//!
//! ## Features
//!
//! - **Format sniffing**: Filename suffix first, MIME type as fallback
//! - **Sequence parsing**: FASTA and FASTQ with molecule type inference and base composition
//! - **Tabular parsing**: CSV with column type inference and summary statistics
//! - **Structured parsing**: JSON and XML well-formedness checks
//! - **Validation**: Line-numbered errors, warnings, a quality score and suggestions
//! - **Insights**: Observations and next-step recommendations per file
//! - **Compressed input**: gzip-compressed sequence files are inflated transparently
//!
//! ## Example
//!
//! ```rust
//! use lab_ingest::{FileProcessor, FormatTag, InputFile, ProcessingConfig};
//!
//! let processor = FileProcessor::new(ProcessingConfig::default());
//! let file = InputFile::from_bytes("ref.fasta", "", b">seq1 desc\nACGT\n>seq2\nACGU\n".to_vec());
//!
//! let result = processor.process_file(&file).unwrap();
//! assert_eq!(result.format, FormatTag::Fasta);
//! assert!(result.validation.is_valid());
//!
//! for insight in &result.insights {
//!     println!("{insight}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Data types for sequences, tables, validation and results
//! - [`parsing`]: Parsers for FASTA, FASTQ, CSV, JSON, XML and text
//! - [`processing`]: Configuration, sniffing, insights and the processor
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP upload endpoint

pub mod cli;
pub mod core;
pub mod parsing;
pub mod processing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::core::result::{FileProcessingResult, ParsedData};
pub use crate::core::types::*;
pub use crate::core::validation::ValidationResult;
pub use processing::{FileProcessor, InputFile, ProcessingConfig, ProcessingError};
