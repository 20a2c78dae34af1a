//! fixcap - capture and sanitize session JSONL logs into a shareable
//! test fixture.
//!
//! Reads every `*.jsonl` file under the input directory, sanitizes each
//! line through the `fc-sanitize` engine, and writes the fixture layout:
//! `raw/sessions/*.jsonl`, `manifest.json`, `README.md`, and `expected/`
//! placeholders.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fc_capture::error::Result;
use fc_capture::manifest::{write_expected_placeholders, write_readme, Manifest};
use fc_capture::transcode::Transcoder;
use fc_sanitize::KeySets;

/// Capture and sanitize session JSONL logs into a shareable fixture.
#[derive(Parser)]
#[command(name = "fixcap", version, about, long_about = None)]
struct Cli {
    /// Directory containing captured *.jsonl session files
    #[arg(long, env = "FIXCAP_INPUT_DIR")]
    input_dir: PathBuf,

    /// Directory to write the fixture into
    #[arg(long, env = "FIXCAP_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Fixture date label (YYYY-MM-DD)
    #[arg(long)]
    fixture_date: String,

    /// Source family label recorded in the manifest
    #[arg(long, default_value = "codex")]
    source_family: String,

    /// JSON file overriding the default classification key sets
    #[arg(long)]
    keysets: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fixcap: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let keysets = match &cli.keysets {
        Some(path) => KeySets::load(path)?,
        None => KeySets::default(),
    };

    let raw_out = cli.output_dir.join("raw").join("sessions");
    let expected_out = cli.output_dir.join("expected");

    let mut transcoder = Transcoder::new(keysets);
    transcoder.transcode_dir(&cli.input_dir, &raw_out)?;
    let stats = transcoder.finish();

    Manifest::new(&cli.source_family, &cli.fixture_date, &stats)
        .save(&cli.output_dir.join("manifest.json"))?;
    write_readme(&cli.output_dir, &cli.source_family, &cli.fixture_date)?;
    write_expected_placeholders(&expected_out)?;

    if stats.url_passthroughs > 0 {
        tracing::warn!(
            count = stats.url_passthroughs,
            "url-keyed values without a scheme marker passed through unmodified"
        );
    }

    println!("Captured {} files, {} JSONL lines", stats.files, stats.lines_total);
    println!("Output: {}", cli.output_dir.display());
    println!("Observed line types:");
    for (event_type, count) in &stats.type_counts {
        println!("  {}: {}", event_type, count);
    }
    Ok(())
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
