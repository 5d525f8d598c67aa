use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use ivf_scan::ScanConfig;

use crate::commands::{finish_run, REDRAW_INTERVAL};
use crate::console::{ConsoleProgress, Deadline};

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// YAML configuration; the full chromatic scan when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output directory for the summary, manifest, checkpoints and CSV.
    #[arg(long)]
    pub out: PathBuf,
    /// CSV destination; `.csv` is appended when the path has no extension.
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// Number of contiguous shards (overrides the configuration).
    #[arg(long)]
    pub shards: Option<usize>,
    /// Worker threads for sharded scans (overrides the configuration).
    #[arg(long)]
    pub threads: Option<usize>,
    /// Stop after this many seconds and leave a checkpoint behind.
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<u64>,
}

pub fn run(args: &ScanArgs) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(&args.out)?;
    let mut config = match &args.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::default(),
    };
    if let Some(shards) = args.shards {
        config.parallel.shards = shards;
    }
    if let Some(threads) = args.threads {
        config.parallel.threads = threads;
    }
    config.output.run_directory = Some(args.out.clone());
    config.validate()?;
    if let Some(path) = &args.config {
        keep_config_copy(path, &args.out)?;
    }

    let mut progress = ConsoleProgress::new(REDRAW_INTERVAL);
    let deadline = Deadline::after(args.time_limit.map(Duration::from_secs));
    let summary = ivf_scan::run(&config, &mut progress, &deadline)?;
    progress.finish();
    finish_run(&args.out, &config, &summary, args.csv.as_deref())
}

/// Copies the configuration into the run directory as `config.yaml`, leaving
/// it alone when it already lives there.
fn keep_config_copy(config: &Path, out: &Path) -> Result<(), Box<dyn Error>> {
    let target = out.join("config.yaml");
    if target.exists() && fs::canonicalize(config)? == fs::canonicalize(&target)? {
        return Ok(());
    }
    fs::copy(config, &target).map_err(|err| {
        format!(
            "failed to copy {} to {}: {err}",
            config.display(),
            target.display()
        )
    })?;
    Ok(())
}
