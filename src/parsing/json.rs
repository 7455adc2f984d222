use crate::core::validation::{ContentError, ValidationBuilder, ValidationResult};

/// Parse a JSON document strictly
///
/// On a syntax error the payload is `None`, the single error carries the
/// parser's message and position, and the score is 0.
#[must_use]
pub fn parse_json(text: &str) -> (Option<serde_json::Value>, ValidationResult) {
    let mut validation = ValidationBuilder::new();
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => (Some(value), validation.finish(1.0)),
        Err(e) => {
            validation.error(
                ContentError::new(format!("Invalid JSON: {e}"))
                    .at_line(e.line())
                    .at_column(e.column()),
            );
            validation.suggest("Check JSON syntax: matching braces, quoted keys and no trailing commas");
            (None, validation.finish(0.0))
        }
    }
}

/// One-line description of a JSON document's top level
#[must_use]
pub fn describe_root(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(map) => format!("JSON root is an object with {} keys", map.len()),
        serde_json::Value::Array(items) => {
            format!("JSON root is an array with {} items", items.len())
        }
        serde_json::Value::Null => "JSON root is null".to_string(),
        _ => "JSON root is a scalar value".to_string(),
    }
}
