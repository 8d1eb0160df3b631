use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "doc-offsets")]
#[command(about = "Report source byte offsets of decoded text runs", long_about = None)]
struct Args {
    /// Document to recover offsets from
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn main() {
    // Diagnostics go to stderr; the report itself is the only stdout output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let args = Args::parse();

    let extractor = doc_offsets::Extractor::new(doc_offsets::PlainTextParser);
    let report = match extractor.from_path(&args.file) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error reading {:?}: {}", args.file, e);
            std::process::exit(2);
        }
    };

    // Partial parses and unrecoverable runs still exit 0: this is a
    // best-effort diagnostic tool, not a validator.
    for line in report {
        println!("{}", line);
    }
}
