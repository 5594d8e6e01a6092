//! Convert the alanine dipeptide xyz trajectory from nanometers to Angstroms.
//!
//! The converted trajectory is written to standard output, log messages go to standard error.
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};
use xyzconv::{convert, XYZReader, XYZWriter, DEFAULT_INPUT, NFRAMES};

mod logging;

/// Convert an xyz trajectory from nanometers to Angstroms, writing it to standard output.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Input path (xyz, in nanometers).
    #[arg(default_value = DEFAULT_INPUT, value_name = "PATH")]
    input: PathBuf,

    /// Increase log verbosity (-v for INFO, -vv for DEBUG, -vvv for TRACE).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::setup_logging(args.verbose, args.quiet);
    debug!("parsed arguments: {args:?}");

    match run(&args) {
        Ok(nframes) => {
            info!("wrote {nframes} frames");
            ExitCode::SUCCESS
        }
        Err(err) => {
            debug!("conversion failed: {err:?}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> xyzconv::Result<usize> {
    info!("reading {} ({NFRAMES} frames)", args.input.display());
    let mut reader = XYZReader::open(&args.input)?;
    let stdout = std::io::stdout();
    let mut writer = XYZWriter::new(BufWriter::new(stdout.lock()));
    convert(&mut reader, &mut writer, NFRAMES)
}
