use std::path::{Path, PathBuf};

use ivf_core::errors::{ErrorInfo, IvfError};
use ivf_core::stable_hash_string;
use serde::{Deserialize, Serialize};

use crate::checkpoint::{self, CheckpointPayload};
use crate::collector::{Solution, SolutionCollector};
use crate::config::{OutputConfig, ScanConfig};
use crate::decoder::Decoder;
use crate::evaluator::{Evaluator, PairDirection};
use crate::manifest::{self, RunManifest};
use crate::ordering::Ordering;
use crate::progress::{NeverStop, Progress, ProgressSink, StopSignal};
use crate::sequencer::SelectionVector;
use crate::shard::{self, Cursor, ShardState};
use crate::space::SearchSpace;

/// The I/O-free parameters of the inner loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPlan {
    /// Space being enumerated.
    pub space: SearchSpace,
    /// Pair direction policy.
    pub direction: PairDirection,
    /// Iterations between progress notifications and stop checks.
    pub batch_size: u64,
}

impl ScanPlan {
    /// Extracts the loop parameters from a run configuration.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            space: config.space,
            direction: config.direction,
            batch_size: config.batch_size,
        }
    }
}

/// Result of an I/O-free scan over one counter range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Solutions in discovery order, all with index in `start..next_index`.
    pub solutions: Vec<Solution>,
    /// First counter value not scanned.
    pub next_index: u64,
    /// True when the scan reached the end of its range.
    pub completed: bool,
}

/// Summary returned to callers after a configured run completes or stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Space that was scanned.
    pub space: SearchSpace,
    /// Pair direction policy in force.
    pub direction: PairDirection,
    /// Size of the whole space.
    pub total: u64,
    /// Orderings scanned across all shards (including resumed progress).
    pub scanned: u64,
    /// True when every shard reached its end.
    pub completed: bool,
    /// Final per-shard cursors.
    pub cursors: Vec<Cursor>,
    /// Number of solutions found.
    pub solution_count: usize,
    /// SHA-256 digest of the canonical JSON solution list.
    pub solutions_digest: String,
    /// Solutions in counter order.
    pub solutions: Vec<Solution>,
    /// Checkpoint files still on disk.
    pub checkpoints: Vec<PathBuf>,
    /// Manifest path, if emitted.
    pub manifest_path: Option<PathBuf>,
}

/// Scans `cursor.next..until`, appending accepted orderings to `collector`.
///
/// The selection vector, decoder, ordering and evaluator are created once and
/// reused for every iteration. The stop signal is polled and progress is
/// reported once per batch. Returns false if the stop signal fired first;
/// `cursor.next` then marks exactly where scanning stopped.
pub fn scan_until(
    plan: &ScanPlan,
    cursor: &mut Cursor,
    until: u64,
    collector: &mut SolutionCollector,
    sink: &mut dyn ProgressSink,
    stop: &dyn StopSignal,
) -> bool {
    let total = plan.space.total();
    let until = until.min(cursor.end);
    let batch = plan.batch_size.max(1);
    let mut vector = SelectionVector::from_index(plan.space.symbols(), cursor.next);
    let mut decoder = Decoder::new();
    let mut evaluator = Evaluator::new(&plan.space, plan.direction);
    let mut ordering = Ordering::identity(plan.space.symbols());

    while cursor.next < until {
        if stop.should_stop(cursor.next) {
            return false;
        }
        let batch_end = cursor.next.saturating_add(batch).min(until);
        for index in cursor.next..batch_end {
            decoder.decode_into(&vector, &mut ordering);
            if evaluator.evaluate(&ordering).is_accept() {
                collector.push(index, &ordering);
            }
            vector.advance();
        }
        cursor.next = batch_end;
        sink.report(Progress {
            current_index: cursor.next,
            total,
            solutions: collector.len(),
        });
    }
    true
}

/// Sequentially scans `start..end` without touching the filesystem.
pub fn search_range(
    plan: &ScanPlan,
    start: u64,
    end: u64,
    sink: &mut dyn ProgressSink,
    stop: &dyn StopSignal,
) -> SearchOutcome {
    let mut cursor = Cursor::new(start, end.min(plan.space.total()));
    let mut collector = SolutionCollector::new();
    let until = cursor.end;
    let completed = scan_until(plan, &mut cursor, until, &mut collector, sink, stop);
    SearchOutcome {
        solutions: collector.into_vec(),
        next_index: cursor.next,
        completed,
    }
}

/// Sequentially scans the whole of `space`.
pub fn search(
    space: &SearchSpace,
    direction: PairDirection,
    sink: &mut dyn ProgressSink,
    stop: &dyn StopSignal,
) -> SearchOutcome {
    let plan = ScanPlan {
        space: *space,
        direction,
        batch_size: ScanConfig::default().batch_size,
    };
    search_range(&plan, 0, space.total(), sink, stop)
}

/// Scans all 12! orderings of the chromatic space and returns every solution.
pub fn solve(sink: &mut dyn ProgressSink) -> Vec<Solution> {
    search(
        &SearchSpace::chromatic(),
        PairDirection::Ascending,
        sink,
        &NeverStop,
    )
    .solutions
}

/// Runs a configured scan from scratch.
pub fn run(
    config: &ScanConfig,
    sink: &mut dyn ProgressSink,
    stop: &dyn StopSignal,
) -> Result<ScanSummary, IvfError> {
    config.validate()?;
    let (start, end) = config.resolve_range()?;
    let shards = shard::partition(start, end, config.parallel.shards)
        .into_iter()
        .map(ShardState::new)
        .collect();
    run_with_shards(config, shards, sink, stop)
}

/// Resumes a run from a checkpoint file.
pub fn resume(
    path: &Path,
    sink: &mut dyn ProgressSink,
    stop: &dyn StopSignal,
) -> Result<ScanSummary, IvfError> {
    let payload = CheckpointPayload::load(path)?;
    resume_from(payload, sink, stop)
}

/// Resumes a run from an already loaded (and possibly edited) payload.
pub fn resume_from(
    payload: CheckpointPayload,
    sink: &mut dyn ProgressSink,
    stop: &dyn StopSignal,
) -> Result<ScanSummary, IvfError> {
    payload.config.validate()?;
    let shards = checkpoint::restore_payload(&payload)?;
    run_with_shards(&payload.config, shards, sink, stop)
}

fn run_with_shards(
    config: &ScanConfig,
    mut shards: Vec<ShardState>,
    sink: &mut dyn ProgressSink,
    stop: &dyn StopSignal,
) -> Result<ScanSummary, IvfError> {
    let plan = ScanPlan::from_config(config);
    let layout = resolve_output_paths(&config.output);
    let mut checkpoints = Vec::new();

    let completed = match shards.as_mut_slice() {
        [single] => run_sequential(config, &plan, single, &layout, &mut checkpoints, sink, stop)?,
        many => shard::scan_shards(&plan, many, config.parallel.threads, sink, stop)?,
    };

    if !completed {
        if let Some(path) = write_checkpoint(config, &shards, &layout)? {
            record_checkpoint(&mut checkpoints, path, config.checkpoint.max_to_keep)?;
        }
    }

    let cursors: Vec<Cursor> = shards.iter().map(|shard| shard.cursor).collect();
    let scanned: u64 = cursors.iter().map(Cursor::scanned).sum();
    let mut merged = SolutionCollector::new();
    for shard in shards {
        merged.append(shard.collector);
    }
    let solutions = merged.into_vec();
    let solutions_digest = stable_hash_string(&solutions)?;

    let manifest_path = if let Some(run_dir) = layout.run_directory.as_ref() {
        let path = run_dir.join(&config.output.manifest_file);
        let manifest = RunManifest {
            schema_version: manifest::MANIFEST_SCHEMA,
            config: config.clone(),
            provenance: manifest::capture_provenance(config)?,
            total: config.space.total(),
            scanned,
            completed,
            solution_count: solutions.len(),
            solutions_digest: solutions_digest.clone(),
            checkpoints: checkpoints
                .iter()
                .filter_map(|path| path.strip_prefix(run_dir).ok().map(Path::to_path_buf))
                .collect(),
        };
        manifest.write(&path)?;
        Some(path)
    } else {
        None
    };

    Ok(ScanSummary {
        space: config.space,
        direction: config.direction,
        total: config.space.total(),
        scanned,
        completed,
        cursors,
        solution_count: solutions.len(),
        solutions_digest,
        solutions,
        checkpoints,
        manifest_path,
    })
}

fn run_sequential(
    config: &ScanConfig,
    plan: &ScanPlan,
    shard: &mut ShardState,
    layout: &ResolvedOutput,
    checkpoints: &mut Vec<PathBuf>,
    sink: &mut dyn ProgressSink,
    stop: &dyn StopSignal,
) -> Result<bool, IvfError> {
    let interval = match layout.checkpoint_dir {
        Some(_) => config.checkpoint.interval,
        None => 0,
    };
    loop {
        let until = if interval > 0 {
            shard.cursor.next.saturating_add(interval)
        } else {
            shard.cursor.end
        };
        let reached = scan_until(
            plan,
            &mut shard.cursor,
            until,
            &mut shard.collector,
            sink,
            stop,
        );
        if !reached {
            return Ok(false);
        }
        if shard.cursor.is_done() {
            return Ok(true);
        }
        if let Some(path) = write_checkpoint(config, std::slice::from_ref(shard), layout)? {
            record_checkpoint(checkpoints, path, config.checkpoint.max_to_keep)?;
        }
    }
}

fn write_checkpoint(
    config: &ScanConfig,
    shards: &[ShardState],
    layout: &ResolvedOutput,
) -> Result<Option<PathBuf>, IvfError> {
    let checkpoint_dir = match &layout.checkpoint_dir {
        Some(dir) => dir,
        None => return Ok(None),
    };
    let scanned: u64 = shards.iter().map(|shard| shard.cursor.scanned()).sum();
    let path = checkpoint::checkpoint_path(checkpoint_dir, scanned);
    let payload = checkpoint::build_payload(config, shards);
    payload.store(&path)?;
    Ok(Some(path))
}

fn record_checkpoint(
    paths: &mut Vec<PathBuf>,
    path: PathBuf,
    max_to_keep: usize,
) -> Result<(), IvfError> {
    if !paths.contains(&path) {
        paths.push(path);
    }
    enforce_checkpoint_retention(paths, max_to_keep)
}

fn enforce_checkpoint_retention(
    paths: &mut Vec<PathBuf>,
    max_to_keep: usize,
) -> Result<(), IvfError> {
    let max_to_keep = max_to_keep.max(1);
    if paths.len() <= max_to_keep {
        return Ok(());
    }
    let excess = paths.len() - max_to_keep;
    for path in paths.drain(..excess) {
        std::fs::remove_file(&path).map_err(|err| {
            IvfError::Checkpoint(
                ErrorInfo::new("checkpoint-remove", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
    }
    Ok(())
}

#[derive(Default)]
struct ResolvedOutput {
    run_directory: Option<PathBuf>,
    checkpoint_dir: Option<PathBuf>,
}

fn resolve_output_paths(config: &OutputConfig) -> ResolvedOutput {
    match &config.run_directory {
        None => ResolvedOutput::default(),
        Some(run_dir) => ResolvedOutput {
            run_directory: Some(run_dir.clone()),
            checkpoint_dir: Some(run_dir.join(&config.checkpoint_dir)),
        },
    }
}
