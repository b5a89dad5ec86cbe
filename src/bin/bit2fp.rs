//! Decodes a raw bitstream image against the in-crate stub fabric, emitting
//! either the line-based floorplan text format or JSON.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use bitcodec::fabric::stub::StubFabric;
use bitcodec::floorplan::format_floorplan;
use bitcodec::{extract_model, BitPlane};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "bit2fp", about = "Decode a bitstream image into a floorplan")]
struct Args {
    /// Path to the bitstream image to decode.
    input: PathBuf,

    /// Path to write the decoded floorplan to.
    output: PathBuf,

    /// Output format for the decoded floorplan.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> bitcodec::Result<()> {
    let bytes = fs::read(&args.input)?;
    let mut plane = BitPlane::new(bytes);
    let mut fabric = StubFabric::new();

    let floorplan = extract_model(&mut plane, &mut fabric)?;

    let rendered = match args.format {
        OutputFormat::Text => format_floorplan(&floorplan),
        OutputFormat::Json => serde_json::to_string_pretty(&floorplan)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?,
    };
    fs::write(&args.output, rendered)?;
    tracing::info!(iobs = floorplan.iobs.len(), nets = floorplan.nets.len(), "decoded floorplan");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "bit2fp failed");
            ExitCode::FAILURE
        }
    }
}
