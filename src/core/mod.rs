//! Core data types for laboratory file ingestion.
//!
//! This module provides the values produced by the parsers and the
//! processor:
//!
//! - [`FormatTag`]: The logical format decided by the sniffer
//! - [`SequenceRecord`]: One FASTA/FASTQ entry with molecule type and composition
//! - [`TabularData`]: Parsed delimited data with column types and a [`DataSummary`]
//! - [`ValidationResult`]: Errors, warnings, score and suggestions for a file
//! - [`FileProcessingResult`]: The unified, serialisable outcome of one file
//!
//! ## Payload shapes
//!
//! | Format | `data` variant |
//! |--------|----------------|
//! | fasta, fastq | `Sequences` |
//! | csv | `Table` |
//! | json | `Json` |
//! | xml | `Xml` |
//! | text, unknown | `Text` |
//! | excel, pdf | `Placeholder` |

pub mod result;
pub mod sequence;
pub mod table;
pub mod types;
pub mod validation;

pub use result::{FileMetadata, FileProcessingResult, ParsedData};
pub use sequence::SequenceRecord;
pub use table::{DataSummary, TabularData};
pub use types::FormatTag;
pub use validation::ValidationResult;
