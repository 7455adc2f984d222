//! Command-line tests for the `lab-ingest` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn lab_ingest() -> Command {
    Command::cargo_bin("lab-ingest").unwrap()
}

#[test]
fn test_process_fasta_text_report() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "ref.fasta", b">seq1 desc\nACGT\n>seq2\nACGU\n");

    lab_ingest()
        .arg("process")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ref.fasta (FASTA) VALID"))
        .stdout(predicate::str::contains("Contains 2 sequences"))
        .stdout(predicate::str::contains("Data is ready for sequence analysis"));
}

#[test]
fn test_process_reports_content_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "reads.fq", b"@r1\nACGT\n+\n!!!\n");

    lab_ingest()
        .arg("process")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("INVALID"))
        .stdout(predicate::str::contains("Line 4:"));
}

#[test]
fn test_process_json_output() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "plate.csv", b"a,b\n1,x\n2,y\n");

    let output = lab_ingest()
        .args(["--format", "json", "process"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["format"], "csv");
    assert_eq!(json["record_count"], 2);
    assert_eq!(json["data"]["value"]["column_types"][0], "number");
}

#[test]
fn test_process_tsv_output() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "notes.txt", b"hello world\n");

    lab_ingest()
        .args(["--format", "tsv", "process"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("filename\tformat\tvalid"))
        .stdout(predicate::str::contains("notes.txt\ttext\ttrue"));
}

#[test]
fn test_process_unsupported_extension_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "tool.exe", b"MZ");

    lab_ingest()
        .arg("process")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported extension '.exe'"));
}

#[test]
fn test_process_size_limit_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "plate.csv", b"a,b\n1,2\n");

    lab_ingest()
        .arg("process")
        .arg(&path)
        .args(["--max-file-size", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeding the 4 byte limit"));
}

#[test]
fn test_process_allow_list_override() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "ref.fa", b">s\nACGT\n");

    lab_ingest()
        .arg("process")
        .arg(&path)
        .args(["--allow", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported extension"));
}

#[test]
fn test_process_config_file() {
    let dir = TempDir::new().unwrap();
    let config = write_file(&dir, "ingest.json", br#"{"enable_validation": false}"#);
    let path = write_file(&dir, "bad.json", b"{ invalid");

    lab_ingest()
        .arg("process")
        .arg(&path)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("VALID"))
        .stdout(predicate::str::contains("INVALID").not());
}

#[test]
fn test_process_batch_skips_failures() {
    let dir = TempDir::new().unwrap();
    let good = write_file(&dir, "a.csv", b"x\n1\n");
    let bad = write_file(&dir, "b.exe", b"MZ");

    lab_ingest()
        .arg("process")
        .arg(&good)
        .arg(&bad)
        .assert()
        .success()
        .stdout(predicate::str::contains("a.csv (CSV)"))
        .stderr(predicate::str::contains(format!("Skipped: {}", bad.display())))
        .stderr(predicate::str::contains("unsupported extension '.exe'"));
}

#[test]
fn test_process_batch_skips_by_path() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("a")).unwrap();
    std::fs::create_dir(dir.path().join("b")).unwrap();
    let big = write_file(&dir, "a/x.csv", b"n\n1\n2\n3\n4\n5\n");
    let small = write_file(&dir, "b/x.csv", b"n\n1\n");

    lab_ingest()
        .arg("process")
        .arg(&big)
        .arg(&small)
        .args(["--max-file-size", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("x.csv (CSV) VALID"))
        .stderr(predicate::str::contains(format!("Skipped: {}", big.display())))
        .stderr(predicate::str::contains(small.display().to_string()).not());
}

#[test]
fn test_process_missing_file() {
    lab_ingest()
        .args(["process", "/nonexistent/reads.fq"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_detect() {
    lab_ingest()
        .args(["detect", "reads.fq.gz"])
        .assert()
        .success()
        .stdout("fastq\n");

    lab_ingest()
        .args(["detect", "upload", "--mime", "text/csv"])
        .assert()
        .success()
        .stdout("csv\n");

    lab_ingest()
        .args(["detect", "blob.bin"])
        .assert()
        .success()
        .stdout("unknown\n");
}

#[test]
fn test_detect_json() {
    lab_ingest()
        .args(["--format", "json", "detect", "plate.xlsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"format\": \"excel\""))
        .stdout(predicate::str::contains("\"extension\": \"xlsx\""));
}
