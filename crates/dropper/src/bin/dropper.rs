// ABOUTME: CLI binary for dropper.
// ABOUTME: Archives one URL as Markdown, printing it or saving it under a title-derived name.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use dropper::logging::init_logging;
use dropper::{
    ArchiveError, Archiver, Output, OutputMode, DEFAULT_CHAR_THRESHOLD, DEFAULT_MAX_BYTES,
    DEFAULT_TIMEOUT_SECS,
};

#[derive(Parser, Debug)]
#[command(name = "dropper", version)]
#[command(about = "Save the readable content of a web page as Markdown")]
struct Args {
    /// Write the document to a file instead of stdout
    #[arg(short = 'o', long = "output-file")]
    output_file: bool,

    /// Directory for --output-file (default: current directory)
    #[arg(short = 'd', long = "output-dir", default_value = ".")]
    output_dir: PathBuf,

    /// Minimum character count for readable content
    #[arg(long = "char-threshold", default_value_t = DEFAULT_CHAR_THRESHOLD)]
    char_threshold: usize,

    /// Maximum filename length in UTF-8 bytes
    #[arg(long = "max-bytes", default_value_t = DEFAULT_MAX_BYTES)]
    max_bytes: usize,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// User-Agent header for the request
    #[arg(long = "user-agent")]
    user_agent: Option<String>,

    /// Log pipeline steps to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// URL of the page to archive
    #[arg()]
    url: Option<String>,
}

async fn run(args: Args) -> Result<Output, ArchiveError> {
    let url = args
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ArchiveError::missing_input("Archive"))?;

    let mode = if args.output_file {
        OutputMode::File
    } else {
        OutputMode::Stdout
    };

    let mut builder = Archiver::builder()
        .output_mode(mode)
        .output_dir(args.output_dir)
        .char_threshold(args.char_threshold)
        .max_filename_bytes(args.max_bytes)
        .timeout(Duration::from_secs(args.timeout));
    if let Some(user_agent) = args.user_agent {
        builder = builder.user_agent(user_agent);
    }

    builder.build()?.run(&url).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(Output::Stdout(content)) => {
            println!("{}", content);
            ExitCode::SUCCESS
        }
        Ok(Output::Saved(path)) => {
            println!("Saved to: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(code = %e.code, "archive failed");
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
