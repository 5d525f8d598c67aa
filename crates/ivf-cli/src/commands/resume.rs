use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use ivf_scan::checkpoint::CheckpointPayload;

use crate::commands::{finish_run, REDRAW_INTERVAL};
use crate::console::{ConsoleProgress, Deadline};

#[derive(Args, Debug)]
pub struct ResumeArgs {
    /// Checkpoint written by an interrupted `ivf scan`.
    #[arg(long)]
    pub checkpoint: PathBuf,
    /// Output directory; replaces the one recorded in the checkpoint.
    #[arg(long)]
    pub out: PathBuf,
    /// CSV destination; `.csv` is appended when the path has no extension.
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// Stop again after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<u64>,
}

pub fn run(args: &ResumeArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let mut payload = CheckpointPayload::load(&args.checkpoint)?;
    payload.config.output.run_directory = Some(args.out.clone());
    let config = payload.config.clone();
    eprintln!(
        "Resuming from {} ({} orderings already scanned)",
        args.checkpoint.display(),
        crate::console::group_digits(payload.scanned())
    );

    let mut progress = ConsoleProgress::new(REDRAW_INTERVAL);
    let deadline = Deadline::after(args.time_limit.map(Duration::from_secs));
    let summary = ivf_scan::resume_from(payload, &mut progress, &deadline)?;
    progress.finish();

    finish_run(&args.out, &config, &summary, args.csv.as_deref())
}
