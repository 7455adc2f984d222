//! Parsers for laboratory file formats.
//!
//! This module provides parsers for:
//!
//! - **FASTA**: `>`-headed sequence records, validated line by line
//! - **FASTQ**: fixed four-line records with per-base quality strings
//! - **CSV**: quote-aware comma splitting, column type inference, summary statistics
//! - **JSON / XML**: syntax validation of structured documents
//! - **Text**: plain-text passthrough and placeholders for binary office formats
//!
//! Every parser returns its payload together with a
//! [`ValidationResult`](crate::core::validation::ValidationResult); content
//! problems are reported there and never abort the parse.
//!
//! ## Example
//!
//! ```rust
//! use lab_ingest::parsing::fasta::parse_fasta;
//!
//! let (records, validation) = parse_fasta(">seq1 demo\nACGT\n");
//! assert_eq!(records.len(), 1);
//! assert!(validation.is_valid());
//! ```

pub mod alphabet;
pub mod csv;
pub mod fasta;
pub mod fastq;
pub mod json;
pub mod text;
pub mod xml;

use crate::core::sequence::SequenceRecord;

/// Split a header (without its `>`/`@` marker) into id and description
pub(crate) fn split_header(header: &str) -> (String, Option<String>) {
    let mut tokens = header.split_whitespace();
    let id = tokens.next().unwrap_or_default().to_string();
    let description = tokens.collect::<Vec<_>>().join(" ");
    let description = if description.is_empty() {
        None
    } else {
        Some(description)
    };
    (id, description)
}

/// Build a finished record, computing length, molecule type and composition
pub(crate) fn finish_record(
    id: String,
    description: Option<String>,
    sequence: String,
    quality: Option<String>,
) -> SequenceRecord {
    let molecule_type = alphabet::infer_molecule_type(&sequence);
    let composition = alphabet::composition(&sequence, molecule_type);
    SequenceRecord {
        id,
        description,
        length: sequence.chars().count(),
        sequence,
        quality,
        molecule_type,
        composition,
    }
}
