use clap::Parser;
use tracing_subscriber::EnvFilter;

use lab_ingest::{cli, web};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("lab_ingest=debug,info")
    } else {
        EnvFilter::new("lab_ingest=warn")
    };

    // Logs go to stderr so JSON and TSV output stay clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Process(args) => {
            cli::process::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Detect(args) => {
            cli::detect::run(&args, cli.format)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
    }

    Ok(())
}
