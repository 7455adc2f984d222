use std::path::PathBuf;

use clap::Args;

use crate::cli::{ConfigArgs, OutputFormat};
use crate::core::result::FileProcessingResult;
use crate::processing::input::InputFile;
use crate::processing::processor::FileProcessor;

#[derive(Args)]
pub struct ProcessArgs {
    /// Files to process
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Execute process subcommand
///
/// A single file that cannot be processed is an error. With several files,
/// failures are reported and skipped.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, an input file is missing,
/// or a single input file fails size or extension checks.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ProcessArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.config.resolve()?;
    let processor = FileProcessor::new(config);

    let mut inputs = Vec::with_capacity(args.files.len());
    for path in &args.files {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        inputs.push(InputFile::from_path(path)?);
    }

    let results = if let [input] = inputs.as_slice() {
        vec![processor.process_file(input)?]
    } else {
        let mut results = Vec::with_capacity(inputs.len());
        for (path, outcome) in args.files.iter().zip(processor.process_each(&inputs)?) {
            match outcome {
                Ok(result) => results.push(result),
                Err(e) => eprintln!("Skipped: {}: {e}", path.display()),
            }
        }
        results
    };

    if verbose {
        eprintln!("Processed {} of {} files", results.len(), inputs.len());
    }

    match format {
        OutputFormat::Text => print_text_results(&results, verbose),
        OutputFormat::Json => print_json_results(&results)?,
        OutputFormat::Tsv => print_tsv_results(&results),
    }

    Ok(())
}

fn print_text_results(results: &[FileProcessingResult], verbose: bool) {
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(60));
        }

        let status = if result.validation.is_valid() {
            "VALID"
        } else {
            "INVALID"
        };
        println!(
            "\n{} ({}) {}",
            result.filename,
            result.format.display_name(),
            status
        );
        println!("   Score: {:.1}%", result.validation.score() * 100.0);
        if let Some(count) = result.record_count {
            println!("   Records: {count}");
        }
        println!(
            "   Size: {} bytes, processed in {:.2} ms",
            result.file_size, result.processing_time_ms
        );
        if verbose {
            println!("   ID: {}", result.id);
            println!("   Processed at: {}", result.processed_at.to_rfc3339());
            println!("   MIME type: {}", result.mime_type);
        }

        if !result.validation.errors().is_empty() {
            println!("\n   Errors:");
            for error in result.validation.errors() {
                match error.line {
                    Some(line) => println!("   - Line {line}: {}", error.message),
                    None => println!("   - {}", error.message),
                }
            }
        }

        if !result.warnings.is_empty() {
            println!("\n   Warnings:");
            for warning in &result.warnings {
                println!("   - {warning}");
            }
        }

        if !result.validation.suggestions().is_empty() {
            println!("\n   Suggestions:");
            for suggestion in result.validation.suggestions() {
                println!("   - {suggestion}");
            }
        }

        println!("\n   Insights:");
        for insight in &result.insights {
            println!("   - {insight}");
        }

        if !result.recommendations.is_empty() {
            println!("\n   Recommendations:");
            for recommendation in &result.recommendations {
                println!("   - {recommendation}");
            }
        }
    }

    println!();
}

fn print_json_results(results: &[FileProcessingResult]) -> anyhow::Result<()> {
    let output = if let [result] = results {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string_pretty(results)?
    };
    println!("{output}");
    Ok(())
}

fn print_tsv_results(results: &[FileProcessingResult]) {
    println!("filename\tformat\tvalid\tscore\trecords\terrors\twarnings\tsize_bytes\tprocessing_ms");
    for r in results {
        println!(
            "{}\t{}\t{}\t{:.4}\t{}\t{}\t{}\t{}\t{:.2}",
            r.filename,
            r.format,
            r.validation.is_valid(),
            r.validation.score(),
            r.record_count.map_or_else(String::new, |n| n.to_string()),
            r.validation.errors().len(),
            r.warnings.len(),
            r.file_size,
            r.processing_time_ms,
        );
    }
}
