//! Human-readable observations derived from a parsed file.

use crate::core::result::{FileMetadata, ParsedData};
use crate::core::sequence::{mean_length, molecule_types};
use crate::core::types::{ColumnType, FormatTag};
use crate::core::validation::{Severity, ValidationResult};
use crate::parsing::json::describe_root;

const BYTES_PER_KB: f64 = 1024.0;

fn join_display<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Observations about the file and its content
///
/// Format and size are always reported; sequence and tabular payloads add
/// counts and the types found.
#[must_use]
pub fn generate_insights(
    format: FormatTag,
    data: &ParsedData,
    metadata: &FileMetadata,
) -> Vec<String> {
    #[allow(clippy::cast_precision_loss)]
    let size_kb = metadata.size as f64 / BYTES_PER_KB;
    let mut insights = vec![
        format!("File format: {}", format.display_name()),
        format!("File size: {size_kb:.2} KB"),
    ];
    if metadata.compressed {
        insights.push("Content was gzip-compressed".to_string());
    }

    match data {
        ParsedData::Sequences(records) => {
            insights.push(format!("Contains {} sequences", records.len()));
            if !records.is_empty() {
                insights.push(format!(
                    "Average sequence length: {:.1}",
                    mean_length(records)
                ));
                insights.push(format!(
                    "Molecule types: {}",
                    join_display(&molecule_types(records))
                ));
            }
        }
        ParsedData::Table(table) => {
            insights.push(format!(
                "Contains {} rows and {} columns",
                table.row_count, table.column_count
            ));
            if !table.column_types.is_empty() {
                insights.push(format!(
                    "Column types: {}",
                    join_display(&table.distinct_column_types())
                ));
            }
        }
        ParsedData::Json(Some(value)) => insights.push(describe_root(value)),
        ParsedData::Xml(Some(doc)) => insights.push(format!("XML root element: <{}>", doc.root)),
        ParsedData::Text(text) => insights.push(format!(
            "Contains {} lines and {} words",
            text.line_count, text.word_count
        )),
        ParsedData::Json(None) | ParsedData::Xml(None) | ParsedData::Placeholder(_) => {}
    }

    insights
}

/// Next steps for the file, gated on whether validation passed
#[must_use]
pub fn generate_recommendations(
    format: FormatTag,
    data: &ParsedData,
    validation: &ValidationResult,
) -> Vec<String> {
    if !validation.is_valid() {
        return vec!["Fix validation errors before proceeding with analysis".to_string()];
    }

    let mut recommendations = Vec::new();
    if format.is_sequence() {
        recommendations.push("Data is ready for sequence analysis".to_string());
        if format == FormatTag::Fastq {
            recommendations
                .push("Quality scores are available for read quality control".to_string());
        }
    } else if format.is_placeholder() {
        recommendations.push(format!(
            "{} content requires additional library integration for full parsing",
            format.display_name()
        ));
    } else {
        match format {
            FormatTag::Csv => {
                recommendations.push("Data is suitable for statistical analysis".to_string());
                let has_numeric = data
                    .table()
                    .is_some_and(|t| t.column_types.contains(&ColumnType::Number));
                if has_numeric {
                    recommendations.push(
                        "Numeric columns can be used for trend and outlier analysis".to_string(),
                    );
                }
            }
            FormatTag::Json | FormatTag::Xml => {
                recommendations.push(
                    "Structured data is ready for import into downstream systems".to_string(),
                );
            }
            _ => recommendations.push("Content is available for text review".to_string()),
        }
    }
    recommendations
}

/// Every warning message, plus errors flagged with warning severity
#[must_use]
pub fn generate_warnings(validation: &ValidationResult) -> Vec<String> {
    validation
        .warnings()
        .iter()
        .map(|w| w.message.clone())
        .chain(
            validation
                .errors()
                .iter()
                .filter(|e| e.severity == Severity::Warning)
                .map(|e| e.message.clone()),
        )
        .collect()
}
