use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::sequence::SequenceRecord;
use crate::core::table::TabularData;
use crate::core::types::FormatTag;
use crate::core::validation::ValidationResult;

/// Raw XML text plus the name of its root element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlDocument {
    pub root: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    pub line_count: usize,
    pub word_count: usize,
    pub char_count: usize,
}

/// Stub payload for formats that need a binary reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderData {
    pub format: FormatTag,
    pub message: String,
}

/// Format-specific parsed payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ParsedData {
    Sequences(Vec<SequenceRecord>),
    Table(TabularData),
    /// `None` when the document failed to parse
    Json(Option<serde_json::Value>),
    /// `None` when the document failed to parse
    Xml(Option<XmlDocument>),
    Text(TextContent),
    Placeholder(PlaceholderData),
}

impl ParsedData {
    /// Number of records for sequence and tabular payloads
    #[must_use]
    pub fn record_count(&self) -> Option<usize> {
        match self {
            Self::Sequences(records) => Some(records.len()),
            Self::Table(table) => Some(table.row_count),
            _ => None,
        }
    }

    #[must_use]
    pub fn sequences(&self) -> Option<&[SequenceRecord]> {
        match self {
            Self::Sequences(records) => Some(records),
            _ => None,
        }
    }

    #[must_use]
    pub fn table(&self) -> Option<&TabularData> {
        match self {
            Self::Table(table) => Some(table),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    pub encoding: String,
    /// Content was gzip-compressed and inflated before parsing
    pub compressed: bool,
}

/// Outcome of processing one file
///
/// Built once by the processor and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileProcessingResult {
    pub id: Uuid,
    pub filename: String,
    pub mime_type: String,
    pub format: FormatTag,
    pub processed_at: DateTime<Utc>,
    pub processing_time_ms: f64,
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_count: Option<usize>,
    pub data: ParsedData,
    pub metadata: FileMetadata,
    pub validation: ValidationResult,
    pub insights: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}
