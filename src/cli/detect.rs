use clap::Args;

use crate::cli::OutputFormat;
use crate::processing::sniff::{detect, file_extension, guess_mime};

#[derive(Args)]
pub struct DetectArgs {
    /// Filename to classify (the file need not exist)
    pub filename: String,

    /// MIME type to fall back on when the filename is not recognised
    #[arg(long)]
    pub mime: Option<String>,
}

/// Execute detect subcommand
///
/// # Errors
///
/// Returns an error if JSON output cannot be serialized.
pub fn run(args: &DetectArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mime = args
        .mime
        .clone()
        .unwrap_or_else(|| guess_mime(&args.filename).to_string());
    let tag = detect(&args.filename, &mime);
    let extension = file_extension(&args.filename);

    match format {
        OutputFormat::Text => {
            println!("{tag}");
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "filename": args.filename,
                "format": tag,
                "display_name": tag.display_name(),
                "extension": extension,
                "mime_type": mime,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("filename\tformat\textension\tmime_type");
            println!(
                "{}\t{}\t{}\t{}",
                args.filename,
                tag,
                extension.unwrap_or_default(),
                mime
            );
        }
    }
    Ok(())
}
