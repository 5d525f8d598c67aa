use std::error::Error;
use std::fs;
use std::path::Path;

use clap::{Parser, Subcommand};
use commands::{
    check::{self, CheckArgs},
    resume::{self, ResumeArgs},
    scan::{self, ScanArgs},
};

mod commands;
mod console;

#[derive(Parser, Debug)]
#[command(name = "ivf", about = "Interval finder: exhaustive search over pitch-class orderings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan the configured space and export every solution.
    Scan(ScanArgs),
    /// Continue a scan from a checkpoint file.
    Resume(ResumeArgs),
    /// Evaluate a single ordering.
    Check(CheckArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Command::Scan(args) => scan::run(&args),
        Command::Resume(args) => resume::run(&args),
        Command::Check(args) => check::run(&args),
    }
}

fn write_json<P: AsRef<Path>, T: serde::Serialize>(
    path: P,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
