//! End-to-end processing tests through the public library API.

use std::io::Write;

use lab_ingest::core::table::ColumnStats;
use lab_ingest::core::types::{ColumnType, MoleculeType};
use lab_ingest::{FileProcessor, FormatTag, InputFile, ParsedData, ProcessingConfig};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn process(name: &str, content: &str) -> lab_ingest::FileProcessingResult {
    FileProcessor::new(ProcessingConfig::default())
        .process_file(&InputFile::from_bytes(name, "", content.as_bytes().to_vec()))
        .unwrap()
}

#[test]
fn test_fasta_dna_and_rna() {
    let result = process("mixed.fasta", ">seq1 desc\nACGT\n>seq2\nACGU\n");
    assert!(result.validation.is_valid());

    let records = result.data.sequences().unwrap();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].id, "seq1");
    assert_eq!(records[0].description.as_deref(), Some("desc"));
    assert_eq!(records[0].molecule_type, MoleculeType::Dna);
    assert_eq!(records[0].length, 4);
    assert_eq!(records[0].composition.gc_content(), Some(0.5));

    assert_eq!(records[1].id, "seq2");
    assert_eq!(records[1].molecule_type, MoleculeType::Rna);
    assert_eq!(records[1].composition.gc_content(), Some(0.5));

    assert!(result
        .insights
        .contains(&"Molecule types: dna, rna".to_string()));
}

#[test]
fn test_fastq_length_mismatch_rejected() {
    let result = process("reads.fq", "@r1\nACGT\n+\n!!!");
    assert!(!result.validation.is_valid());
    assert_eq!(result.validation.errors().len(), 1);
    assert_eq!(result.validation.errors()[0].line, Some(4));
    assert_eq!(result.record_count, Some(0));
}

#[test]
fn test_fastq_quality_matches_sequence() {
    let result = process(
        "reads.fastq",
        "@r1\nACGT\n+\nIIII\n@r2\nACG\n+\nII\n@r3\nGGCC\n+r3\n####\n",
    );
    let records = result.data.sequences().unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r3"]);
    for record in records {
        assert_eq!(
            record.quality.as_ref().map(String::len),
            Some(record.sequence.len())
        );
    }
    assert_eq!(result.validation.errors().len(), 1);
}

#[test]
fn test_csv_round_trip_scenario() {
    let result = process("plate.csv", "a,b\n1,x\n2,y\n");
    let table = result.data.table().unwrap();

    assert_eq!(table.row_count, 2);
    assert_eq!(table.column_count, 2);
    assert_eq!(table.column_type("a"), Some(ColumnType::Number));
    assert_eq!(table.column_type("b"), Some(ColumnType::String));

    let Some(ColumnStats::Numeric(stats)) = table.summary.column("a").map(|c| &c.stats) else {
        panic!("column a should have a numeric summary");
    };
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.max, 2.0);
    assert_eq!(stats.mean, 1.5);
}

#[test]
fn test_csv_header_only() {
    let result = process("empty.csv", "well,od\n");
    let table = result.data.table().unwrap();
    assert_eq!(table.row_count, 0);
    assert!(table.summary.is_empty());
    assert!(result.validation.is_valid());
}

#[test]
fn test_csv_ragged_rows_warn() {
    let result = process("ragged.csv", "a,b\n1,2\n3\n4,5,6\n");
    assert!(result.validation.is_valid());
    assert_eq!(result.validation.warnings().len(), 2);
    assert_eq!(result.warnings.len(), 2);
    assert!((result.validation.score() - 0.8).abs() < 1e-9);
    assert_eq!(result.record_count, Some(3));
}

#[test]
fn test_malformed_json() {
    let result = process("report.json", "{ invalid");
    assert_eq!(result.format, FormatTag::Json);
    assert!(!result.validation.is_valid());
    assert_eq!(result.validation.errors().len(), 1);
    assert_eq!(result.data, ParsedData::Json(None));
}

#[test]
fn test_xml_payload() {
    let result = process("run.xml", "<run id=\"7\"><well>A1</well></run>");
    assert!(result.validation.is_valid());
    let ParsedData::Xml(Some(doc)) = &result.data else {
        panic!("expected an XML document");
    };
    assert_eq!(doc.root, "run");
}

#[test]
fn test_result_serializes() {
    let result = process("ref.fa", ">s\nACGT\n");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["format"], "fasta");
    assert_eq!(json["data"]["kind"], "sequences");
    assert_eq!(json["validation"]["is_valid"], true);

    let back: lab_ingest::FileProcessingResult = serde_json::from_value(json).unwrap();
    assert_eq!(back.data, result.data);
}

#[test]
fn test_batch_preserves_order() {
    let processor = FileProcessor::new(ProcessingConfig::default());
    let files = vec![
        InputFile::from_bytes("3.txt", "", b"third".to_vec()),
        InputFile::from_bytes("bad.bin", "", vec![0, 1, 2]),
        InputFile::from_bytes("1.json", "", b"{}".to_vec()),
        InputFile::from_bytes("2.fa", "", b">x\nAC\n".to_vec()),
    ];
    let results = processor.process_batch(&files).unwrap();
    let names: Vec<_> = results.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names, vec!["3.txt", "1.json", "2.fa"]);
}

#[tokio::test]
async fn test_process_path_async() {
    let mut temp = NamedTempFile::with_suffix(".fastq").unwrap();
    temp.write_all(b"@r1 lane1\nACGTN\n+\nIIII#\n").unwrap();
    temp.flush().unwrap();

    let file = InputFile::from_path(temp.path()).unwrap();
    let processor = FileProcessor::new(ProcessingConfig::default());
    let result = processor.process_file_async(&file).await.unwrap();

    assert_eq!(result.format, FormatTag::Fastq);
    assert_eq!(result.mime_type, "text/x-fastq");
    assert!(result.metadata.last_modified.is_some());
    assert_eq!(result.record_count, Some(1));
}
