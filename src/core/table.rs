use serde::{Deserialize, Serialize};

use crate::core::types::ColumnType;

/// A parsed delimited file
///
/// `rows` keeps every data row verbatim, including rows whose cell count
/// differs from the header count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
    pub column_count: usize,
    /// Parallel to `headers`
    pub column_types: Vec<ColumnType>,
    pub summary: DataSummary,
}

impl TabularData {
    /// Look up the inferred type of a column by header name
    #[must_use]
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.headers
            .iter()
            .position(|h| h == name)
            .and_then(|i| self.column_types.get(i).copied())
    }

    /// Distinct column types in header order
    #[must_use]
    pub fn distinct_column_types(&self) -> Vec<ColumnType> {
        let mut seen = Vec::new();
        for t in &self.column_types {
            if !seen.contains(t) {
                seen.push(*t);
            }
        }
        seen
    }
}

/// Summary statistics, one entry per column that has at least one value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSummary {
    pub columns: Vec<ColumnSummary>,
}

impl DataSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub stats: ColumnStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Lower-middle element for even counts
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    pub unique_count: usize,
    pub most_common: String,
    pub most_common_count: usize,
    /// Value counts in first-encountered order
    pub distribution: Vec<ValueCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}
