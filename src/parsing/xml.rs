//! Well-formedness check for XML documents.
//!
//! The document is pulled through `quick-xml` once; no tree is built. On
//! success the payload is the raw text plus the root element name.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::result::XmlDocument;
use crate::core::validation::{ContentError, ValidationBuilder, ValidationResult};

/// 1-based line of a byte offset
fn line_of(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Walk the document, returning the root element name or an error message
/// with the byte offset where it was detected
fn check_document(text: &str) -> Result<String, (String, usize)> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut root: Option<String> = None;
    let mut depth = 0usize;
    let mut root_closed = false;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                let at = usize::try_from(reader.error_position()).unwrap_or(text.len());
                return Err((e.to_string(), at));
            }
        };
        let offset = usize::try_from(reader.buffer_position()).unwrap_or(text.len());

        match event {
            Event::Start(ref start) | Event::Empty(ref start) if depth == 0 => {
                if root_closed {
                    return Err(("Document has more than one root element".to_string(), offset));
                }
                root = Some(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                if matches!(event, Event::Start(_)) {
                    depth = 1;
                } else {
                    root_closed = true;
                }
            }
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root_closed = true;
                }
            }
            Event::Text(_) | Event::CData(_) if depth == 0 => {
                return Err(("Text content outside the root element".to_string(), offset));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err((
            "Unexpected end of document: unclosed elements".to_string(),
            text.len(),
        ));
    }
    root.ok_or_else(|| ("Document has no root element".to_string(), text.len()))
}

/// Parse an XML document for well-formedness
///
/// On failure the payload is `None` with a single error and score 0; on
/// success the score is 1.0.
#[must_use]
pub fn parse_xml(text: &str) -> (Option<XmlDocument>, ValidationResult) {
    let mut validation = ValidationBuilder::new();
    match check_document(text) {
        Ok(root) => (
            Some(XmlDocument {
                root,
                content: text.to_string(),
            }),
            validation.finish(1.0),
        ),
        Err((message, offset)) => {
            validation.error(
                ContentError::new(format!("Invalid XML: {message}")).at_line(line_of(text, offset)),
            );
            validation.suggest("Check that every element is closed and tags are properly nested");
            (None, validation.finish(0.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_document() {
        let text = "<?xml version=\"1.0\"?>\n<run id=\"7\">\n  <sample>S1</sample>\n  <empty/>\n</run>\n";
        let (doc, validation) = parse_xml(text);
        assert!(validation.is_valid());
        let doc = doc.unwrap();
        assert_eq!(doc.root, "run");
        assert_eq!(doc.content, text);
    }

    #[test]
    fn test_self_closing_root() {
        let (doc, validation) = parse_xml("<instrument serial=\"A1\"/>");
        assert!(validation.is_valid());
        assert_eq!(doc.unwrap().root, "instrument");
    }

    #[test]
    fn test_mismatched_tags() {
        let (doc, validation) = parse_xml("<run>\n<sample></run>\n");
        assert!(doc.is_none());
        assert_eq!(validation.errors().len(), 1);
        assert!(validation.score().abs() < f64::EPSILON);
    }

    #[test]
    fn test_unclosed_root() {
        let (doc, validation) = parse_xml("<run><sample>S1</sample>");
        assert!(doc.is_none());
        assert!(!validation.is_valid());
    }

    #[test]
    fn test_multiple_roots() {
        let (doc, validation) = parse_xml("<a></a>\n<b></b>");
        assert!(doc.is_none());
        assert_eq!(validation.errors()[0].line, Some(2));
    }

    #[test]
    fn test_text_outside_root() {
        let (doc, _) = parse_xml("hello <a></a>");
        assert!(doc.is_none());
        let (doc, _) = parse_xml("");
        assert!(doc.is_none());
    }
}
