use serde::{Deserialize, Serialize};

/// Logical format of an ingested file, as decided by the sniffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatTag {
    Fasta,
    Fastq,
    Csv,
    Excel,
    Pdf,
    Json,
    Xml,
    Text,
    Unknown,
}

impl FormatTag {
    /// Get the display name for this format
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Fasta => "FASTA",
            Self::Fastq => "FASTQ",
            Self::Csv => "CSV",
            Self::Excel => "Excel",
            Self::Pdf => "PDF",
            Self::Json => "JSON",
            Self::Xml => "XML",
            Self::Text => "Text",
            Self::Unknown => "Unknown",
        }
    }

    /// Formats whose payload is a list of sequence records
    #[must_use]
    pub fn is_sequence(self) -> bool {
        matches!(self, Self::Fasta | Self::Fastq)
    }

    /// Formats that are recognised but need a binary reader we do not ship
    #[must_use]
    pub fn is_placeholder(self) -> bool {
        matches!(self, Self::Excel | Self::Pdf)
    }
}

impl std::fmt::Display for FormatTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Fasta => "fasta",
            Self::Fastq => "fastq",
            Self::Csv => "csv",
            Self::Excel => "excel",
            Self::Pdf => "pdf",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Text => "text",
            Self::Unknown => "unknown",
        };
        write!(f, "{tag}")
    }
}

/// Inferred molecule type of a sequence record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoleculeType {
    Dna,
    Rna,
    Protein,
    Unknown,
}

impl std::fmt::Display for MoleculeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dna => write!(f, "dna"),
            Self::Rna => write!(f, "rna"),
            Self::Protein => write!(f, "protein"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Inferred type of a tabular column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Number,
    Boolean,
    Date,
    String,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::Boolean => write!(f, "boolean"),
            Self::Date => write!(f, "date"),
            Self::String => write!(f, "string"),
        }
    }
}
