//! Residue alphabets, molecule-type inference and composition.
//!
//! Both sequence parsers share these rules. A sequence line is accepted when
//! every character is an IUPAC nucleotide or amino-acid code, or `-` for a
//! gap. Input is uppercased before any check.

use std::collections::BTreeMap;

use crate::core::sequence::{Composition, NucleotideComposition};
use crate::core::types::MoleculeType;

/// IUPAC nucleotide codes including ambiguity codes, plus gap
pub const NUCLEOTIDE_CODES: &[u8] = b"ACGTURYSWKMBDHVN-";

/// IUPAC amino-acid codes including ambiguity (B, Z, J, X), selenocysteine
/// (U), pyrrolysine (O), stop (*) and gap
pub const AMINO_ACID_CODES: &[u8] = b"ACDEFGHIKLMNPQRSTVWYBZJXUO*-";

#[must_use]
pub fn is_nucleotide_code(c: char) -> bool {
    c.is_ascii() && NUCLEOTIDE_CODES.contains(&(c as u8))
}

#[must_use]
pub fn is_amino_acid_code(c: char) -> bool {
    c.is_ascii() && AMINO_ACID_CODES.contains(&(c as u8))
}

/// A character allowed on a sequence line
#[must_use]
pub fn is_sequence_code(c: char) -> bool {
    is_nucleotide_code(c) || is_amino_acid_code(c)
}

/// Characters of an uppercased line that are not sequence codes, each with
/// its 1-based column. Empty when the line is clean.
#[must_use]
pub fn invalid_characters(line: &str) -> Vec<(usize, char)> {
    line.chars()
        .enumerate()
        .filter(|(_, c)| !is_sequence_code(*c))
        .map(|(i, c)| (i + 1, c))
        .collect()
}

/// Render the distinct offending characters for an error message
#[must_use]
pub fn describe_invalid(invalid: &[(usize, char)]) -> String {
    let mut distinct: Vec<char> = Vec::new();
    for (_, c) in invalid {
        if !distinct.contains(c) {
            distinct.push(*c);
        }
    }
    distinct
        .iter()
        .map(|c| format!("'{}'", c.escape_default()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Classify an uppercased sequence
///
/// Nucleotide alphabet without `U` is DNA, with `U` is RNA; otherwise the
/// amino-acid alphabet gives protein, and anything else is unknown.
#[must_use]
pub fn infer_molecule_type(sequence: &str) -> MoleculeType {
    if sequence.is_empty() {
        return MoleculeType::Unknown;
    }
    if sequence.chars().all(is_nucleotide_code) {
        if sequence.contains('U') {
            MoleculeType::Rna
        } else {
            MoleculeType::Dna
        }
    } else if sequence.chars().all(is_amino_acid_code) {
        MoleculeType::Protein
    } else {
        MoleculeType::Unknown
    }
}

/// Composition summary for a finished sequence
#[must_use]
pub fn composition(sequence: &str, molecule_type: MoleculeType) -> Composition {
    match molecule_type {
        MoleculeType::Dna | MoleculeType::Rna => {
            Composition::Nucleotide(nucleotide_composition(sequence))
        }
        MoleculeType::Protein | MoleculeType::Unknown => Composition::Residues {
            counts: residue_counts(sequence),
        },
    }
}

/// Count bases; the GC denominator is A, C, G, T, U and N, the other
/// ambiguity codes are left out
#[must_use]
pub fn nucleotide_composition(sequence: &str) -> NucleotideComposition {
    let mut comp = NucleotideComposition::default();
    for c in sequence.chars() {
        match c {
            'A' => comp.a += 1,
            'C' => comp.c += 1,
            'G' => comp.g += 1,
            'T' => comp.t += 1,
            'U' => comp.u += 1,
            'N' => comp.n += 1,
            _ => comp.other += 1,
        }
    }

    let counted = comp.a + comp.c + comp.g + comp.t + comp.u + comp.n;
    comp.gc_content = if counted == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        {
            (comp.g + comp.c) as f64 / counted as f64
        }
    };
    comp
}

#[must_use]
pub fn residue_counts(sequence: &str) -> BTreeMap<char, usize> {
    let mut counts = BTreeMap::new();
    for c in sequence.chars() {
        *counts.entry(c).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_molecule_type() {
        assert_eq!(infer_molecule_type("ACGT"), MoleculeType::Dna);
        assert_eq!(infer_molecule_type("ACGN-RY"), MoleculeType::Dna);
        assert_eq!(infer_molecule_type("ACGU"), MoleculeType::Rna);
        assert_eq!(infer_molecule_type("MKTAYIAKQR"), MoleculeType::Protein);
        assert_eq!(infer_molecule_type("ACGT123"), MoleculeType::Unknown);
        assert_eq!(infer_molecule_type(""), MoleculeType::Unknown);
    }

    #[test]
    fn test_invalid_characters() {
        assert!(invalid_characters("ACGTNRY-").is_empty());
        assert!(invalid_characters("MKTAYIAKQR*").is_empty());
        assert_eq!(invalid_characters("AC1T!"), vec![(3, '1'), (5, '!')]);
        assert_eq!(describe_invalid(&invalid_characters("A11")), "'1'");
    }

    #[test]
    fn test_nucleotide_composition_dna() {
        let comp = nucleotide_composition("ACGT");
        assert_eq!((comp.a, comp.c, comp.g, comp.t), (1, 1, 1, 1));
        assert!((comp.gc_content - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nucleotide_composition_counts_u() {
        let comp = nucleotide_composition("ACGU");
        assert_eq!(comp.u, 1);
        assert!((comp.gc_content - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_nucleotide_composition_counts_n_in_gc() {
        let comp = nucleotide_composition("GGNN");
        assert_eq!(comp.n, 2);
        assert!((comp.gc_content - 0.5).abs() < f64::EPSILON);

        let comp = nucleotide_composition("GCRY");
        assert_eq!(comp.other, 2);
        assert!((comp.gc_content - 1.0).abs() < f64::EPSILON);

        let comp = nucleotide_composition("NNNN");
        assert!(comp.gc_content.abs() < f64::EPSILON);
    }

    #[test]
    fn test_protein_composition() {
        let comp = composition("MKKM", MoleculeType::Protein);
        let Composition::Residues { counts } = comp else {
            panic!("expected residue counts");
        };
        assert_eq!(counts.get(&'M'), Some(&2));
        assert_eq!(counts.get(&'K'), Some(&2));
    }
}
