use crate::core::result::{PlaceholderData, TextContent};
use crate::core::types::FormatTag;
use crate::core::validation::{ValidationBuilder, ValidationResult};

/// Pass plain text through with line, word and character counts
///
/// Text has no structure to check, so the result is always valid.
#[must_use]
pub fn parse_text(text: &str) -> (TextContent, ValidationResult) {
    let content = TextContent {
        content: text.to_string(),
        line_count: text.lines().count(),
        word_count: text.split_whitespace().count(),
        char_count: text.chars().count(),
    };
    (content, ValidationBuilder::new().finish(1.0))
}

/// Stub payload for Excel and PDF files
///
/// These formats are recognised but need a binary reader; the result is
/// neutral rather than failing.
#[must_use]
pub fn placeholder(format: FormatTag) -> (PlaceholderData, ValidationResult) {
    let message = format!(
        "{} parsing requires additional library integration",
        format.display_name()
    );
    let mut validation = ValidationBuilder::new();
    validation.suggest(message.clone());
    (PlaceholderData { format, message }, validation.finish(1.0))
}
