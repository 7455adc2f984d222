//! Content validation results shared by every parser.
//!
//! Parsers report problems as values, never as Rust errors. A
//! [`ValidationResult`] can only be produced through [`ValidationBuilder`]
//! (or [`ValidationResult::unchecked`]), which keeps `is_valid` equal to
//! "no errors" and the score inside `[0, 1]`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

/// A content error with optional position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentError {
    pub message: String,
    /// 1-based line number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 1-based column number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub severity: Severity,
}

impl ContentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
            field: None,
            severity: Severity::Error,
        }
    }

    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn at_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// A non-fatal finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentWarning {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ContentWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            field: None,
            suggestion: None,
        }
    }

    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<ContentError>,
    warnings: Vec<ContentWarning>,
    score: f64,
    suggestions: Vec<String>,
}

impl ValidationResult {
    /// Result reported when validation is switched off in the config
    #[must_use]
    pub fn unchecked() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            score: 1.0,
            suggestions: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[must_use]
    pub fn errors(&self) -> &[ContentError] {
        &self.errors
    }

    #[must_use]
    pub fn warnings(&self) -> &[ContentWarning] {
        &self.warnings
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}

/// Accumulates errors, warnings and suggestions while a parser runs
#[derive(Debug, Default)]
pub struct ValidationBuilder {
    errors: Vec<ContentError>,
    warnings: Vec<ContentWarning>,
    suggestions: Vec<String>,
}

impl ValidationBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, error: ContentError) {
        self.errors.push(error);
    }

    pub fn warning(&mut self, warning: ContentWarning) {
        self.warnings.push(warning);
    }

    /// Add a suggestion once; repeats are ignored
    pub fn suggest(&mut self, suggestion: impl Into<String>) {
        let suggestion = suggestion.into();
        if !self.suggestions.contains(&suggestion) {
            self.suggestions.push(suggestion);
        }
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Close the builder with a format-specific score, clamped to `[0, 1]`
    #[must_use]
    pub fn finish(self, score: f64) -> ValidationResult {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        };
        ValidationResult {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
            score,
            suggestions: self.suggestions,
        }
    }
}

/// `max(0, 1 - errors / units)`, or 1.0 with no errors
///
/// Used by the sequence parsers, where `units` is lines (FASTA) or
/// four-line groups (FASTQ).
#[must_use]
pub fn error_rate_score(errors: usize, units: f64) -> f64 {
    if errors == 0 {
        return 1.0;
    }
    if units <= 0.0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let errors = errors as f64;
    (1.0 - errors / units).max(0.0)
}
