//! Range partitioning and the rayon-backed sharded scan.

use std::sync::{Mutex, PoisonError};

use ivf_core::errors::{ErrorInfo, IvfError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::collector::SolutionCollector;
use crate::kernel::{self, ScanPlan};
use crate::progress::{NoProgress, Progress, ProgressSink, StopSignal};

/// Progress record for one contiguous counter range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    /// First counter value of the range.
    pub start: u64,
    /// Next counter value to scan; `start..next` is done.
    pub next: u64,
    /// Exclusive end of the range.
    pub end: u64,
}

impl Cursor {
    /// A fresh cursor over `start..end`.
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start,
            next: start,
            end,
        }
    }

    /// Returns true once the whole range has been scanned.
    pub fn is_done(&self) -> bool {
        self.next >= self.end
    }

    /// Orderings scanned so far.
    pub fn scanned(&self) -> u64 {
        self.next - self.start
    }

    /// Orderings still to scan.
    pub fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.next)
    }
}

/// Splits `start..end` into `shards` contiguous cursors of near-equal size.
/// Earlier shards take the remainder, so concatenating them in order walks the
/// range in counter order. Shards may be empty when the range is tiny.
pub fn partition(start: u64, end: u64, shards: usize) -> Vec<Cursor> {
    let shards = shards.max(1) as u64;
    let len = end.saturating_sub(start);
    let base = len / shards;
    let extra = len % shards;
    let mut cursors = Vec::with_capacity(shards as usize);
    let mut offset = start;
    for shard in 0..shards {
        let size = base + u64::from(shard < extra);
        cursors.push(Cursor::new(offset, offset + size));
        offset += size;
    }
    cursors
}

/// One shard's cursor and the solutions it has found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardState {
    /// Range progress.
    pub cursor: Cursor,
    /// Solutions found inside `cursor.start..cursor.next`.
    pub collector: SolutionCollector,
}

impl ShardState {
    /// A shard that has not started.
    pub fn new(cursor: Cursor) -> Self {
        Self {
            cursor,
            collector: SolutionCollector::new(),
        }
    }
}

struct Aggregate<'a> {
    sink: &'a mut dyn ProgressSink,
    scanned: u64,
    solutions: usize,
}

/// Folds one shard's progress into the aggregate and reports the new totals.
/// A poisoned lock still holds valid counters, so the update is never dropped.
fn record_shard(aggregate: &Mutex<Aggregate<'_>>, scanned: u64, solutions: usize, total: u64) {
    let mut aggregate = aggregate.lock().unwrap_or_else(PoisonError::into_inner);
    aggregate.scanned += scanned;
    aggregate.solutions += solutions;
    let progress = Progress {
        current_index: aggregate.scanned,
        total,
        solutions: aggregate.solutions,
    };
    aggregate.sink.report(progress);
}

/// Scans every shard on a dedicated pool of `threads` workers.
///
/// Workers own their buffers; the only shared state is the progress
/// aggregate, locked once when a shard finishes or stops. Returns true when
/// every shard ran to its end.
pub fn scan_shards(
    plan: &ScanPlan,
    shards: &mut [ShardState],
    threads: usize,
    sink: &mut dyn ProgressSink,
    stop: &dyn StopSignal,
) -> Result<bool, IvfError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .map_err(|err| {
            IvfError::Scan(
                ErrorInfo::new("thread-pool", err.to_string())
                    .with_context("threads", threads.to_string()),
            )
        })?;
    let total = plan.space.total();
    let aggregate = Mutex::new(Aggregate {
        sink,
        scanned: shards.iter().map(|shard| shard.cursor.scanned()).sum(),
        solutions: shards.iter().map(|shard| shard.collector.len()).sum(),
    });

    let finished: Vec<bool> = pool.install(|| {
        shards
            .par_iter_mut()
            .map(|shard| {
                let scanned_before = shard.cursor.scanned();
                let found_before = shard.collector.len();
                let until = shard.cursor.end;
                let done = kernel::scan_until(
                    plan,
                    &mut shard.cursor,
                    until,
                    &mut shard.collector,
                    &mut NoProgress,
                    stop,
                );
                record_shard(
                    &aggregate,
                    shard.cursor.scanned() - scanned_before,
                    shard.collector.len() - found_before,
                    total,
                );
                done
            })
            .collect()
    });
    Ok(finished.into_iter().all(|done| done))
}
