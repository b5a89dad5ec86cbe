//! Encodes a floorplan text file into a raw bitstream image, against the
//! in-crate stub fabric.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use bitcodec::fabric::stub::StubFabric;
use bitcodec::floorplan::parse_floorplan;
use bitcodec::{write_model, BitPlane};
use clap::Parser;

/// Number of frames allocated for the stub fabric's flat image.
const STUB_FRAME_COUNT: usize = 4096;

#[derive(Debug, Parser)]
#[command(name = "fp2bit", about = "Encode a floorplan text file into a bitstream image")]
struct Args {
    /// Path to the input floorplan text file.
    input: PathBuf,

    /// Path to write the encoded bitstream image to.
    output: PathBuf,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> bitcodec::Result<()> {
    let text = fs::read_to_string(&args.input)?;
    let floorplan = parse_floorplan(&text)?;

    let fabric = StubFabric::new();
    let mut plane = BitPlane::zeroed(STUB_FRAME_COUNT);
    write_model(&mut plane, &fabric, &floorplan)?;

    fs::write(&args.output, plane.as_bytes())?;
    tracing::info!(bytes = plane.len(), "wrote bitstream image");
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
            tracing::error!(%err, "fp2bit failed");
            ExitCode::FAILURE
        }
    }
}
