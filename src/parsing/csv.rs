//! Parser for comma-separated tabular data.
//!
//! The first non-empty line is the header row and every later non-empty
//! line is a data row. Rows with the wrong number of cells are kept and
//! reported as warnings. Column types and statistics only consider
//! non-empty cells.
//!
//! The line splitter toggles a quoted state on every `"` and drops the quote
//! characters; a doubled `""` is not unescaped to a literal quote.

use std::collections::hash_map::{Entry, HashMap};

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::core::table::{
    CategoricalSummary, ColumnStats, ColumnSummary, DataSummary, NumericSummary, TabularData,
    ValueCount,
};
use crate::core::types::ColumnType;
use crate::core::validation::{ContentError, ContentWarning, ValidationBuilder, ValidationResult};

/// Score lost per column-count warning
const WARNING_PENALTY: f64 = 0.1;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y", "%B %d, %Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Split one line on commas that are outside double quotes, trimming cells
#[must_use]
pub fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

#[must_use]
pub fn is_number(value: &str) -> bool {
    value.parse::<f64>().is_ok_and(f64::is_finite)
}

#[must_use]
pub fn is_boolean(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

/// ISO-8601/RFC 3339, RFC 2822 and a handful of common laboratory layouts
#[must_use]
pub fn is_date(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_rfc2822(value).is_ok()
        || DATE_FORMATS
            .iter()
            .any(|f| NaiveDate::parse_from_str(value, f).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|f| NaiveDateTime::parse_from_str(value, f).is_ok())
}

/// Pick the strictest type every value satisfies: number, boolean, date, string
///
/// A column with no values is a string column.
#[must_use]
pub fn infer_column_type(values: &[&str]) -> ColumnType {
    if values.is_empty() {
        ColumnType::String
    } else if values.iter().all(|v| is_number(v)) {
        ColumnType::Number
    } else if values.iter().all(|v| is_boolean(v)) {
        ColumnType::Boolean
    } else if values.iter().all(|v| is_date(v)) {
        ColumnType::Date
    } else {
        ColumnType::String
    }
}

/// Statistics over a non-empty list of numbers
///
/// The median is the lower-middle element for even counts; the standard
/// deviation is the population one.
#[must_use]
pub fn numeric_summary(values: &[f64]) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    #[allow(clippy::cast_precision_loss)]
    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(NumericSummary {
        count: sorted.len(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean,
        median: sorted[(sorted.len() - 1) / 2],
        std_dev: variance.sqrt(),
    })
}

/// Frequency distribution over a non-empty list; ties go to the value seen first
#[must_use]
pub fn categorical_summary(values: &[&str]) -> Option<CategoricalSummary> {
    let mut distribution: Vec<ValueCount> = Vec::new();
    // value -> position in `distribution`, which stays in first-seen order
    let mut index: HashMap<&str, usize> = HashMap::new();
    for &value in values {
        match index.entry(value) {
            Entry::Occupied(entry) => distribution[*entry.get()].count += 1,
            Entry::Vacant(entry) => {
                entry.insert(distribution.len());
                distribution.push(ValueCount {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    let mut best: Option<&ValueCount> = None;
    for vc in &distribution {
        if best.map_or(true, |b| vc.count > b.count) {
            best = Some(vc);
        }
    }
    let best = best?;

    Some(CategoricalSummary {
        unique_count: distribution.len(),
        most_common: best.value.clone(),
        most_common_count: best.count,
        distribution: distribution.clone(),
    })
}

fn column_values<'a>(rows: &'a [Vec<String>], index: usize) -> Vec<&'a str> {
    rows.iter()
        .filter_map(|row| row.get(index))
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .collect()
}

fn summarize(headers: &[String], rows: &[Vec<String>], types: &[ColumnType]) -> DataSummary {
    let mut columns = Vec::new();
    for (index, (name, column_type)) in headers.iter().zip(types).enumerate() {
        let values = column_values(rows, index);
        let stats = if *column_type == ColumnType::Number {
            let numbers: Vec<f64> = values.iter().filter_map(|v| v.parse().ok()).collect();
            numeric_summary(&numbers).map(ColumnStats::Numeric)
        } else {
            categorical_summary(&values).map(ColumnStats::Categorical)
        };
        if let Some(stats) = stats {
            columns.push(ColumnSummary {
                name: name.clone(),
                stats,
            });
        }
    }
    DataSummary { columns }
}

/// Parse CSV text into a table and a validation report
///
/// Score is `max(0, 1 - 0.1 * warnings)`; a file without a header row is
/// an error and scores 0.
#[must_use]
pub fn parse_csv(text: &str) -> (TabularData, ValidationResult) {
    let mut validation = ValidationBuilder::new();
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let cells = split_line(line);

        let Some(header_row) = headers.as_ref() else {
            headers = Some(cells);
            continue;
        };

        if cells.len() != header_row.len() {
            validation.warning(
                ContentWarning::new(format!(
                    "Row has {} columns, expected {}",
                    cells.len(),
                    header_row.len()
                ))
                .at_line(i + 1)
                .with_suggestion("Check for missing or extra commas"),
            );
        }
        rows.push(cells);
    }

    let headers = headers.unwrap_or_default();
    if headers.is_empty() {
        validation.error(ContentError::new("No header row found"));
        validation.suggest("Ensure the first non-empty line contains column names");
    }

    let column_types: Vec<ColumnType> = (0..headers.len())
        .map(|index| infer_column_type(&column_values(&rows, index)))
        .collect();
    let summary = summarize(&headers, &rows, &column_types);

    if validation.warning_count() > 0 {
        validation.suggest("Check for missing or extra commas and unquoted values containing commas");
    }

    #[allow(clippy::cast_precision_loss)]
    let score = if validation.error_count() > 0 {
        0.0
    } else {
        (1.0 - validation.warning_count() as f64 * WARNING_PENALTY).max(0.0)
    };

    let table = TabularData {
        row_count: rows.len(),
        column_count: headers.len(),
        headers,
        rows,
        column_types,
        summary,
    };
    (table, validation.finish(score))
}
