//! Parser for FASTA text.
//!
//! Records are assembled by a small state machine fed one line at a time:
//! a `>` line closes the open record and starts a new one, other non-empty
//! lines extend the open record's sequence. Lines with characters outside
//! the IUPAC alphabets are reported and skipped, never appended.

use crate::core::sequence::SequenceRecord;
use crate::core::validation::{error_rate_score, ContentError, ValidationBuilder, ValidationResult};
use crate::parsing::alphabet::{describe_invalid, invalid_characters};
use crate::parsing::{finish_record, split_header};

const HEADER_SUGGESTION: &str = "Check for proper FASTA format with > headers";
const ALPHABET_SUGGESTION: &str =
    "Remove characters that are not IUPAC nucleotide or amino-acid codes";
const EMPTY_SUGGESTION: &str = "Ensure the file contains at least one header followed by sequence lines";

/// A record whose header has been seen but whose body is still growing
#[derive(Debug)]
struct RecordBuilder {
    id: String,
    description: Option<String>,
    sequence: String,
}

impl RecordBuilder {
    fn from_header(header: &str) -> Self {
        let (id, description) = split_header(header);
        Self {
            id,
            description,
            sequence: String::new(),
        }
    }

    /// Records without a sequence body are dropped
    fn finish(self) -> Option<SequenceRecord> {
        if self.sequence.is_empty() {
            None
        } else {
            Some(finish_record(self.id, self.description, self.sequence, None))
        }
    }
}

#[derive(Debug, Default)]
struct FastaState {
    records: Vec<SequenceRecord>,
    current: Option<RecordBuilder>,
    validation: ValidationBuilder,
    total_lines: usize,
}

impl FastaState {
    fn feed(mut self, line_num: usize, raw: &str) -> Self {
        self.total_lines = line_num;
        let line = raw.trim();
        if line.is_empty() {
            return self;
        }

        if let Some(header) = line.strip_prefix('>') {
            self.close_current();
            self.current = Some(RecordBuilder::from_header(header));
            return self;
        }

        let Some(current) = self.current.as_mut() else {
            self.validation.error(
                ContentError::new("Sequence data found before any header line")
                    .at_line(line_num),
            );
            self.validation.suggest(HEADER_SUGGESTION);
            return self;
        };

        let upper = line.to_ascii_uppercase();
        let invalid = invalid_characters(&upper);
        if let Some((column, _)) = invalid.first() {
            self.validation.error(
                ContentError::new(format!(
                    "Invalid characters in sequence: {}",
                    describe_invalid(&invalid)
                ))
                .at_line(line_num)
                .at_column(*column)
                .with_field(current.id.clone()),
            );
            self.validation.suggest(ALPHABET_SUGGESTION);
        } else {
            current.sequence.push_str(&upper);
        }
        self
    }

    fn close_current(&mut self) {
        if let Some(record) = self.current.take().and_then(RecordBuilder::finish) {
            self.records.push(record);
        }
    }

    fn finish(mut self) -> (Vec<SequenceRecord>, ValidationResult) {
        self.close_current();

        if self.records.is_empty() {
            self.validation
                .error(ContentError::new("No valid sequences found"));
            self.validation.suggest(EMPTY_SUGGESTION);
        }

        #[allow(clippy::cast_precision_loss)]
        let total_lines = self.total_lines.max(1) as f64;
        let score = error_rate_score(self.validation.error_count(), total_lines);
        (self.records, self.validation.finish(score))
    }
}

/// Parse FASTA text into sequence records and a validation report
///
/// Score is 1.0 without errors, otherwise `max(0, 1 - errors / lines)`.
#[must_use]
pub fn parse_fasta(text: &str) -> (Vec<SequenceRecord>, ValidationResult) {
    text.lines()
        .enumerate()
        .fold(FastaState::default(), |state, (i, line)| state.feed(i + 1, line))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MoleculeType;

    #[test]
    fn test_parse_two_records() {
        let (records, validation) = parse_fasta(">seq1 desc\nACGT\n>seq2\nACGU\n");
        assert!(validation.is_valid());
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].description.as_deref(), Some("desc"));
        assert_eq!(records[0].molecule_type, MoleculeType::Dna);
        assert_eq!(records[0].length, 4);
        assert_eq!(records[0].composition.gc_content(), Some(0.5));

        assert_eq!(records[1].id, "seq2");
        assert_eq!(records[1].description, None);
        assert_eq!(records[1].molecule_type, MoleculeType::Rna);
        assert_eq!(records[1].composition.gc_content(), Some(0.5));
    }

    #[test]
    fn test_multiline_and_lowercase() {
        let (records, validation) = parse_fasta(">chr1 test\nacgt\nACGT\n\nggcc\n");
        assert!(validation.is_valid());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence, "ACGTACGTGGCC");
        assert_eq!(records[0].length, 12);
    }

    #[test]
    fn test_gc_content_counts_unknown_bases() {
        let (records, _) = parse_fasta(">s\nGGNN\n");
        assert_eq!(records[0].molecule_type, MoleculeType::Dna);
        assert_eq!(records[0].composition.gc_content(), Some(0.5));
    }

    #[test]
    fn test_protein_record() {
        let (records, _) = parse_fasta(">p1\nMKTAYIAKQRQISFVKSHFSRQ\n");
        assert_eq!(records[0].molecule_type, MoleculeType::Protein);
        assert_eq!(records[0].composition.gc_content(), None);
    }

    #[test]
    fn test_invalid_line_is_reported_and_skipped() {
        let (records, validation) = parse_fasta(">seq1\nACGT\nAC12\nGG\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence, "ACGTGG");
        assert!(!validation.is_valid());
        assert_eq!(validation.errors().len(), 1);
        assert_eq!(validation.errors()[0].line, Some(3));
        assert_eq!(validation.errors()[0].column, Some(3));
        assert!((validation.score() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_sequence_before_header() {
        let (records, validation) = parse_fasta("ACGT\n>seq1\nACGT\n");
        assert_eq!(records.len(), 1);
        assert_eq!(validation.errors().len(), 1);
        assert_eq!(validation.errors()[0].line, Some(1));
        assert!(validation
            .suggestions()
            .iter()
            .any(|s| s.contains("> headers")));
    }

    #[test]
    fn test_header_without_body_is_discarded() {
        let (records, validation) = parse_fasta(">empty\n>seq1\nACGT\n>trailing\n");
        assert!(validation.is_valid());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "seq1");
    }

    #[test]
    fn test_no_sequences_is_an_error() {
        let (records, validation) = parse_fasta("");
        assert!(records.is_empty());
        assert!(!validation.is_valid());
        assert_eq!(validation.errors().len(), 1);
        assert!(validation.errors()[0].message.contains("No valid sequences"));
        assert!(validation.score().abs() < f64::EPSILON);

        let (records, validation) = parse_fasta(">only_header\n");
        assert!(records.is_empty());
        assert!(!validation.is_valid());
    }

    #[test]
    fn test_length_matches_sequence() {
        let (records, _) = parse_fasta(">a\nACGTN\n>b\nRYKM-\nAC\n>c\nMKV\n");
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_eq!(record.length, record.sequence.len());
        }
    }

    #[test]
    fn test_crlf_line_endings() {
        let (records, validation) = parse_fasta(">seq1\r\nACGT\r\n");
        assert!(validation.is_valid());
        assert_eq!(records[0].sequence, "ACGT");
    }
}
