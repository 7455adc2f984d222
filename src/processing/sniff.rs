//! Format sniffing from filename and MIME type.
//!
//! Detection never looks at content. The final dot-suffix of the filename
//! is matched first, family by family (sequence, tabular, document,
//! structured, text); the MIME type is the fallback in the same order.

use std::path::Path;

use crate::core::types::FormatTag;

/// gzip magic bytes
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Compressed sequence suffixes recognised anywhere in the filename
const FASTQ_GZ_SUFFIXES: &[&str] = &[".fastq.gz", ".fq.gz"];
const FASTA_GZ_SUFFIXES: &[&str] = &[".fasta.gz", ".fa.gz", ".fas.gz"];

/// Decide the format of a file from its name, falling back to its MIME type
///
/// Always returns a tag; `Unknown` when neither source matches.
///
/// # Examples
///
/// ```
/// use lab_ingest::core::types::FormatTag;
/// use lab_ingest::processing::sniff::detect;
///
/// assert_eq!(detect("reads.FQ", ""), FormatTag::Fastq);
/// assert_eq!(detect("reads.fastq.gz", ""), FormatTag::Fastq);
/// assert_eq!(detect("upload", "text/csv"), FormatTag::Csv);
/// assert_eq!(detect("blob.bin", "application/octet-stream"), FormatTag::Unknown);
/// ```
#[must_use]
pub fn detect(filename: &str, mime_type: &str) -> FormatTag {
    detect_from_filename(filename).unwrap_or_else(|| detect_from_mime(mime_type))
}

/// Detect format based on filename and extension
fn detect_from_filename(filename: &str) -> Option<FormatTag> {
    let lower_name = filename.to_lowercase();

    let extension = final_suffix(&lower_name);

    // Sequence family, fasta before fastq; compressed names end in "gz" so
    // they are matched by substring
    match extension.as_deref() {
        Some("fasta" | "fas" | "fa") => return Some(FormatTag::Fasta),
        Some("fastq" | "fq") => return Some(FormatTag::Fastq),
        _ => {}
    }
    if FASTQ_GZ_SUFFIXES.iter().any(|s| lower_name.contains(s)) {
        return Some(FormatTag::Fastq);
    }
    if FASTA_GZ_SUFFIXES.iter().any(|s| lower_name.contains(s)) {
        return Some(FormatTag::Fasta);
    }

    match extension?.as_str() {
        "csv" => Some(FormatTag::Csv),
        "xlsx" | "xls" | "ods" => Some(FormatTag::Excel),
        "pdf" => Some(FormatTag::Pdf),
        "json" => Some(FormatTag::Json),
        "xml" => Some(FormatTag::Xml),
        "txt" | "md" | "rtf" => Some(FormatTag::Text),
        _ => None,
    }
}

/// Detect format from substrings of the MIME type
fn detect_from_mime(mime_type: &str) -> FormatTag {
    let mime = mime_type.to_lowercase();

    if mime.contains("fastq") {
        FormatTag::Fastq
    } else if mime.contains("fasta") {
        FormatTag::Fasta
    } else if mime.contains("csv") {
        FormatTag::Csv
    } else if mime.contains("spreadsheet") || mime.contains("excel") {
        FormatTag::Excel
    } else if mime.contains("pdf") {
        FormatTag::Pdf
    } else if mime.contains("json") {
        FormatTag::Json
    } else if mime.contains("xml") {
        FormatTag::Xml
    } else if mime.starts_with("text/") {
        FormatTag::Text
    } else {
        FormatTag::Unknown
    }
}

/// Lowercased final dot-suffix of a name, if it has one
fn final_suffix(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(str::to_lowercase)
}

/// Extension used for allow-list checks
///
/// A trailing `.gz` is looked through, so `reads.fastq.gz` has extension
/// `fastq`. Returns `None` when the name has no extension at all.
#[must_use]
pub fn file_extension(filename: &str) -> Option<String> {
    let lower_name = filename.to_lowercase();
    match lower_name.strip_suffix(".gz") {
        Some(inner) => final_suffix(inner).or_else(|| Some("gz".to_string())),
        None => final_suffix(&lower_name),
    }
}

/// Whether a name marks gzip-compressed content
#[must_use]
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn has_gzip_suffix(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".gz")
}

/// Whether content starts with the gzip magic bytes
#[must_use]
pub fn is_gzip(content: &[u8]) -> bool {
    content.starts_with(&GZIP_MAGIC)
}

/// Best-effort MIME type for a filename, for inputs that arrive without one
#[must_use]
pub fn guess_mime(filename: &str) -> &'static str {
    if has_gzip_suffix(filename) {
        return "application/gzip";
    }
    match final_suffix(&filename.to_lowercase()).as_deref() {
        Some("fasta" | "fas" | "fa") => "text/x-fasta",
        Some("fastq" | "fq") => "text/x-fastq",
        Some("csv") => "text/csv",
        Some("tsv") => "text/tab-separated-values",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        Some("ods") => "application/vnd.oasis.opendocument.spreadsheet",
        Some("pdf") => "application/pdf",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("md") => "text/markdown",
        Some("rtf") => "application/rtf",
        Some("txt" | "sam" | "vcf" | "bed" | "gff" | "gtf" | "gb" | "gbk" | "genbank" | "embl") => {
            "text/plain"
        }
        _ => "application/octet-stream",
    }
}
