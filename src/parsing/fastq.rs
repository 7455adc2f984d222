//! Parser for FASTQ text.
//!
//! Blank lines are dropped, then the remaining lines are taken in groups of
//! four (header, sequence, separator, quality). A group that fails any check
//! yields exactly one error and is skipped. Line numbers in errors refer to
//! the original input.

use crate::core::sequence::SequenceRecord;
use crate::core::validation::{error_rate_score, ContentError, ValidationBuilder, ValidationResult};
use crate::parsing::alphabet::{describe_invalid, invalid_characters};
use crate::parsing::{finish_record, split_header};

const LINES_PER_RECORD: usize = 4;

/// Why a four-line group was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
enum RecordProblem {
    Incomplete { found: usize },
    Header,
    Separator,
    LengthMismatch { sequence: usize, quality: usize },
    Alphabet { column: usize, chars: String },
}

impl RecordProblem {
    fn message(&self) -> String {
        match self {
            Self::Incomplete { found } => format!(
                "Incomplete FASTQ record: expected {LINES_PER_RECORD} lines, found {found}"
            ),
            Self::Header => "Record header must start with '@'".to_string(),
            Self::Separator => "Separator line must start with '+'".to_string(),
            Self::LengthMismatch { sequence, quality } => format!(
                "Sequence length ({sequence}) does not match quality length ({quality})"
            ),
            Self::Alphabet { chars, .. } => format!("Invalid characters in sequence: {chars}"),
        }
    }

    fn suggestion(&self) -> &'static str {
        match self {
            Self::Incomplete { .. } => "Ensure every record has exactly four lines",
            Self::Header => "Check that each record header starts with @",
            Self::Separator => "Check that the third line of each record starts with +",
            Self::LengthMismatch { .. } => {
                "Ensure quality strings are the same length as their sequences"
            }
            Self::Alphabet { .. } => {
                "Remove characters that are not IUPAC nucleotide or amino-acid codes"
            }
        }
    }
}

/// Check one complete group; returns the offending line and problem on failure
fn check_group(group: &[(usize, &str)]) -> Result<SequenceRecord, (usize, RecordProblem)> {
    let [(header_line, header), (seq_line, sequence), (sep_line, separator), (qual_line, quality)] =
        group
    else {
        let first_line = group.first().map_or(0, |(n, _)| *n);
        return Err((
            first_line,
            RecordProblem::Incomplete { found: group.len() },
        ));
    };

    let Some(header) = header.strip_prefix('@') else {
        return Err((*header_line, RecordProblem::Header));
    };
    if !separator.starts_with('+') {
        return Err((*sep_line, RecordProblem::Separator));
    }

    let seq_len = sequence.chars().count();
    let qual_len = quality.chars().count();
    if seq_len != qual_len {
        return Err((
            *qual_line,
            RecordProblem::LengthMismatch {
                sequence: seq_len,
                quality: qual_len,
            },
        ));
    }

    let upper = sequence.to_ascii_uppercase();
    let invalid = invalid_characters(&upper);
    if let Some((column, _)) = invalid.first() {
        return Err((
            *seq_line,
            RecordProblem::Alphabet {
                column: *column,
                chars: describe_invalid(&invalid),
            },
        ));
    }

    let (id, description) = split_header(header);
    Ok(finish_record(
        id,
        description,
        upper,
        Some((*quality).to_string()),
    ))
}

/// Parse FASTQ text into sequence records and a validation report
///
/// Score is 1.0 without errors, otherwise `max(0, 1 - errors / (lines / 4))`.
#[must_use]
pub fn parse_fastq(text: &str) -> (Vec<SequenceRecord>, ValidationResult) {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let mut records = Vec::new();
    let mut validation = ValidationBuilder::new();

    for group in lines.chunks(LINES_PER_RECORD) {
        match check_group(group) {
            Ok(record) => records.push(record),
            Err((line_num, problem)) => {
                let mut error = ContentError::new(problem.message()).at_line(line_num);
                if let RecordProblem::Alphabet { column, .. } = &problem {
                    error = error.at_column(*column);
                }
                validation.error(error);
                validation.suggest(problem.suggestion());
                if matches!(problem, RecordProblem::Incomplete { .. }) {
                    break;
                }
            }
        }
    }

    if lines.is_empty() {
        validation.error(ContentError::new("No FASTQ records found"));
        validation.suggest("Ensure the file contains at least one four-line record");
    }

    #[allow(clippy::cast_precision_loss)]
    let groups = lines.len() as f64 / LINES_PER_RECORD as f64;
    let score = error_rate_score(validation.error_count(), groups);
    (records, validation.finish(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MoleculeType;

    #[test]
    fn test_parse_records() {
        let text = "@r1 lane 1\nacgt\n+\nIIII\n\n@r2\nGGCC\n+r2\n!!!!\n";
        let (records, validation) = parse_fastq(text);
        assert!(validation.is_valid());
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].id, "r1");
        assert_eq!(records[0].description.as_deref(), Some("lane 1"));
        assert_eq!(records[0].sequence, "ACGT");
        assert_eq!(records[0].quality.as_deref(), Some("IIII"));
        assert_eq!(records[0].molecule_type, MoleculeType::Dna);
        assert_eq!(records[1].composition.gc_content(), Some(1.0));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let (records, validation) = parse_fastq("@r1\nACGT\n+\n!!!");
        assert!(records.is_empty());
        assert_eq!(validation.errors().len(), 1);
        assert_eq!(validation.errors()[0].line, Some(4));
        assert!(validation.errors()[0].message.contains("does not match"));
        assert!(validation.score().abs() < f64::EPSILON);
    }

    #[test]
    fn test_bad_header_and_separator() {
        let text = "r1\nACGT\n+\nIIII\n@r2\nACGT\n-\nIIII\n@r3\nACGT\n+\nIIII\n";
        let (records, validation) = parse_fastq(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "r3");
        assert_eq!(validation.errors().len(), 2);
        assert_eq!(validation.errors()[0].line, Some(1));
        assert_eq!(validation.errors()[1].line, Some(7));
        // 2 errors over 3 records
        assert!((validation.score() - (1.0 - 2.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_incomplete_trailing_record() {
        let (records, validation) = parse_fastq("@r1\nACGT\n+\nIIII\n@r2\nACGT\n");
        assert_eq!(records.len(), 1);
        assert_eq!(validation.errors().len(), 1);
        assert_eq!(validation.errors()[0].line, Some(5));
        assert!(validation.errors()[0].message.contains("Incomplete"));
    }

    #[test]
    fn test_invalid_sequence_characters() {
        let (records, validation) = parse_fastq("@r1\nAC#T\n+\nIIII\n");
        assert!(records.is_empty());
        assert_eq!(validation.errors()[0].line, Some(2));
        assert_eq!(validation.errors()[0].column, Some(3));
    }

    #[test]
    fn test_quality_matches_sequence_length() {
        let text = "@a\nACGTAC\n+\nIIIIII\n@b\nAC\n+\n!!!\n@c\nGG\n+\n##\n";
        let (records, validation) = parse_fastq(text);
        assert_eq!(records.len(), 2);
        assert_eq!(validation.errors().len(), 1);
        for record in &records {
            assert_eq!(
                record.quality.as_ref().map(String::len),
                Some(record.sequence.len())
            );
        }
    }

    #[test]
    fn test_empty_input() {
        let (records, validation) = parse_fastq("\n\n");
        assert!(records.is_empty());
        assert!(!validation.is_valid());
        assert!(validation.score().abs() < f64::EPSILON);
    }
}
