use std::path::{Path, PathBuf};

use ivf_core::errors::{ErrorInfo, IvfError};
use serde::{Deserialize, Serialize};

use crate::evaluator::PairDirection;
use crate::space::SearchSpace;

/// YAML-configurable parameters governing a scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Symbol count and required intervals (chromatic unless overridden).
    #[serde(default)]
    pub space: SearchSpace,
    /// Pair direction policy.
    #[serde(default)]
    pub direction: PairDirection,
    /// Optional sub-range of the counter; defaults to the whole space.
    #[serde(default)]
    pub range: Option<RangeConfig>,
    /// Iterations between progress notifications and stop checks.
    #[serde(default = "default_batch_size")]
    pub batch_size: u64,
    /// Sharding and thread pool settings.
    #[serde(default)]
    pub parallel: ParallelConfig,
    /// Checkpointing behaviour.
    #[serde(default)]
    pub checkpoint: CheckpointConfig,
    /// Output directory layout.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_batch_size() -> u64 {
    65_536
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            space: SearchSpace::default(),
            direction: PairDirection::default(),
            range: None,
            batch_size: default_batch_size(),
            parallel: ParallelConfig::default(),
            checkpoint: CheckpointConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Parses a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self, IvfError> {
        let config: ScanConfig = serde_yaml::from_str(contents)
            .map_err(|err| IvfError::Config(ErrorInfo::new("config-parse", err.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a YAML file.
    pub fn load(path: &Path) -> Result<Self, IvfError> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            IvfError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml(&contents).map_err(|err| match err {
            IvfError::Config(info) => {
                IvfError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Checks cross-field constraints not expressible through serde.
    pub fn validate(&self) -> Result<(), IvfError> {
        if self.batch_size == 0 {
            return Err(IvfError::config("config-batch", "batch_size must be positive"));
        }
        if self.parallel.shards == 0 {
            return Err(IvfError::config("config-shards", "shards must be positive"));
        }
        self.resolve_range()?;
        Ok(())
    }

    /// Counter range `[start, end)` covered by the scan.
    pub fn resolve_range(&self) -> Result<(u64, u64), IvfError> {
        let total = self.space.total();
        let (start, end) = match &self.range {
            Some(range) => (range.start, range.end.unwrap_or(total)),
            None => (0, total),
        };
        if start > end || end > total {
            return Err(IvfError::Config(
                ErrorInfo::new("config-range", "range must satisfy start <= end <= total")
                    .with_context("start", start.to_string())
                    .with_context("end", end.to_string())
                    .with_context("total", total.to_string()),
            ));
        }
        Ok((start, end))
    }
}

/// Sub-range of the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
    /// First counter value scanned.
    #[serde(default)]
    pub start: u64,
    /// Exclusive end; the space size when omitted.
    #[serde(default)]
    pub end: Option<u64>,
}

/// Sharding settings. One shard means a strict sequential scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Number of contiguous counter ranges scanned independently.
    #[serde(default = "default_one")]
    pub shards: usize,
    /// Worker threads in the pool used for sharded scans.
    #[serde(default = "default_one")]
    pub threads: usize,
}

fn default_one() -> usize {
    1
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            shards: default_one(),
            threads: default_one(),
        }
    }
}

/// Checkpointing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointConfig {
    /// Iterations between checkpoint writes in sequential scans (0 disables).
    #[serde(default)]
    pub interval: u64,
    /// Maximum number of checkpoints to retain.
    #[serde(default = "default_checkpoint_retention")]
    pub max_to_keep: usize,
}

fn default_checkpoint_retention() -> usize {
    4
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            interval: 0,
            max_to_keep: default_checkpoint_retention(),
        }
    }
}

/// Output directory layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for run artefacts. Nothing is written when unset.
    #[serde(default)]
    pub run_directory: Option<PathBuf>,
    /// Manifest filename relative to `run_directory`.
    #[serde(default = "default_manifest_filename")]
    pub manifest_file: PathBuf,
    /// Summary filename relative to `run_directory`.
    #[serde(default = "default_summary_filename")]
    pub summary_file: PathBuf,
    /// Subdirectory used for checkpoint files.
    #[serde(default = "default_checkpoint_dir")]
    pub checkpoint_dir: PathBuf,
    /// Solutions table relative to `run_directory`.
    #[serde(default = "default_solutions_filename")]
    pub solutions_file: PathBuf,
}

fn default_manifest_filename() -> PathBuf {
    PathBuf::from("manifest.json")
}

fn default_summary_filename() -> PathBuf {
    PathBuf::from("summary.json")
}

fn default_checkpoint_dir() -> PathBuf {
    PathBuf::from("checkpoints")
}

fn default_solutions_filename() -> PathBuf {
    PathBuf::from("solutions.csv")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            run_directory: None,
            manifest_file: default_manifest_filename(),
            summary_file: default_summary_filename(),
            checkpoint_dir: default_checkpoint_dir(),
            solutions_file: default_solutions_filename(),
        }
    }
}
