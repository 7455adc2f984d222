//! Upload hygiene checks run before a file reaches the processor.

use crate::core::types::FormatTag;
use crate::processing::config::DEFAULT_SUPPORTED_FORMATS;
use crate::processing::sniff::{file_extension, has_gzip_suffix, is_gzip};

/// Security-related constants for input validation
pub const MAX_FILENAME_LENGTH: usize = 255;
pub const MIN_FILE_CONTENT_SIZE: usize = 1;

/// Bytes sampled when deciding whether content is binary
const BINARY_SAMPLE_SIZE: usize = 1024;

const PDF_MAGIC: &[u8] = b"%PDF";
/// xlsx and ods are zip containers
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// Legacy xls is an OLE compound document
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// Security validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Filename too long: exceeds {MAX_FILENAME_LENGTH} characters")]
    FilenameTooLong,
    #[error("Invalid filename: contains path traversal or invalid characters")]
    InvalidFilename,
    #[error("Empty filename provided")]
    EmptyFilename,
    #[error("File content appears malformed or invalid")]
    InvalidFileContent,
    #[error("File content does not match its {0} extension")]
    FormatValidationFailed(FormatTag),
}

/// Sanitize an uploaded filename
///
/// Rejects names that are empty, too long, contain path separators, `..`
/// or control characters, then drops everything except ASCII letters,
/// digits, `.`, `-`, `_` and spaces. Hidden names are only allowed when
/// they end in a known extension.
///
/// # Errors
///
/// Returns `ValidationError::EmptyFilename` if the filename is empty,
/// `ValidationError::FilenameTooLong` if it exceeds the limit, or
/// `ValidationError::InvalidFilename` if it contains invalid characters.
///
/// # Examples
///
/// ```
/// use lab_ingest::utils::validation::validate_filename;
///
/// assert_eq!(validate_filename("plate #3.csv").unwrap(), "plate 3.csv");
/// assert!(validate_filename("../secrets.fa").is_err());
/// ```
pub fn validate_filename(filename: &str) -> Result<String, ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ValidationError::InvalidFilename);
    }

    if filename.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFilename);
    }

    let sanitized = filename
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' '))
        .collect::<String>();

    if sanitized.trim().is_empty() {
        return Err(ValidationError::InvalidFilename);
    }

    if sanitized.starts_with('.') && !has_known_extension(&sanitized) {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(sanitized)
}

/// Whether a name ends in one of the default supported extensions
fn has_known_extension(filename: &str) -> bool {
    file_extension(filename)
        .is_some_and(|ext| DEFAULT_SUPPORTED_FORMATS.contains(&ext.as_str()))
}

/// Heuristic binary check over the first KiB
///
/// More than 1% non-printable bytes counts as binary. Very short samples are
/// treated as text.
#[must_use]
pub fn is_binary(content: &[u8]) -> bool {
    let sample = &content[..content.len().min(BINARY_SAMPLE_SIZE)];
    if sample.len() < 10 {
        return false;
    }

    let non_printable = sample.iter().filter(|&&b| is_non_printable(b)).count();
    non_printable * 100 > sample.len()
}

fn is_non_printable(byte: u8) -> bool {
    byte < 9 || (byte > 13 && byte < 32) || byte == 127
}

/// Check that content plausibly matches the format its name claims
///
/// Excel and PDF must carry their container signatures; every other format
/// is text and must not look binary. Gzip-compressed names must start with
/// the gzip magic bytes instead.
#[must_use]
pub fn matches_format(filename: &str, content: &[u8], format: FormatTag) -> bool {
    if has_gzip_suffix(filename) {
        return is_gzip(content);
    }

    match format {
        FormatTag::Pdf => content.starts_with(PDF_MAGIC),
        FormatTag::Excel => content.starts_with(ZIP_MAGIC) || content.starts_with(OLE_MAGIC),
        FormatTag::Unknown => true,
        _ => !is_binary(content),
    }
}

/// Reject empty uploads
///
/// # Errors
///
/// Returns `ValidationError::InvalidFileContent` if the content is shorter
/// than the minimum size.
pub fn validate_file_content(content: &[u8]) -> Result<(), ValidationError> {
    if content.len() < MIN_FILE_CONTENT_SIZE {
        return Err(ValidationError::InvalidFileContent);
    }
    Ok(())
}

/// Filename and content checks for one upload
///
/// Returns the sanitized filename when one was given.
///
/// # Errors
///
/// Returns a `ValidationError` if the filename is unsafe, the content is
/// empty, or the content does not match the format the filename claims.
pub fn validate_upload(
    filename: Option<&str>,
    content: &[u8],
    format: FormatTag,
) -> Result<Option<String>, ValidationError> {
    let validated_filename = filename.map(validate_filename).transpose()?;

    validate_file_content(content)?;

    let name = validated_filename.as_deref().unwrap_or_default();
    if !matches_format(name, content, format) {
        return Err(ValidationError::FormatValidationFailed(format));
    }

    Ok(validated_filename)
}
