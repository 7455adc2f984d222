use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::types::MoleculeType;

/// Base counts for a nucleic-acid sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NucleotideComposition {
    pub a: usize,
    pub c: usize,
    pub g: usize,
    pub t: usize,
    pub u: usize,
    pub n: usize,
    /// IUPAC ambiguity codes other than N, plus gaps
    pub other: usize,
    /// (G + C) / (A + C + G + T + U); 0.0 when no resolved bases are present
    pub gc_content: f64,
}

/// Summary of the residues making up a sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Composition {
    Nucleotide(NucleotideComposition),
    Residues { counts: BTreeMap<char, usize> },
}

impl Composition {
    /// GC fraction for nucleic acids, `None` for proteins
    #[must_use]
    pub fn gc_content(&self) -> Option<f64> {
        match self {
            Self::Nucleotide(n) => Some(n.gc_content),
            Self::Residues { .. } => None,
        }
    }
}

/// One FASTA or FASTQ entry
///
/// `length` always equals the character count of `sequence`, and for FASTQ
/// records `quality` has the same length as `sequence`. Records are only
/// built by the parsers, once a complete entry has been assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// First whitespace-delimited token of the header
    pub id: String,

    /// Remainder of the header, joined by single spaces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Uppercased residues
    pub sequence: String,

    /// Per-base quality string (FASTQ only), verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,

    pub length: usize,

    pub molecule_type: MoleculeType,

    pub composition: Composition,
}

/// Mean sequence length over a set of records, 0.0 for an empty set
#[must_use]
pub fn mean_length(records: &[SequenceRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: usize = records.iter().map(|r| r.length).sum();
    #[allow(clippy::cast_precision_loss)]
    {
        total as f64 / records.len() as f64
    }
}

/// Distinct molecule types in first-seen order
#[must_use]
pub fn molecule_types(records: &[SequenceRecord]) -> Vec<MoleculeType> {
    let mut seen = Vec::new();
    for record in records {
        if !seen.contains(&record.molecule_type) {
            seen.push(record.molecule_type);
        }
    }
    seen
}
