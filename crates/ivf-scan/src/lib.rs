#![deny(missing_docs)]

//! Exhaustive search for orderings of the twelve pitch classes whose six
//! consecutive pairs span each of the intervals {3, 4, 5, 7, 8, 9} once.
//!
//! Every counter value in `0..12!` is turned into a [`SelectionVector`]
//! (factorial number system), decoded into an [`Ordering`] and judged by the
//! [`Evaluator`]. Accepted orderings are collected in counter order. The scan
//! can be split into contiguous shards, checkpointed and resumed without
//! changing its output.

/// Checkpoint payloads and restore validation.
pub mod checkpoint;
/// Solution records and the append-only collector.
pub mod collector;
/// YAML configuration schema and defaults.
pub mod config;
pub mod decoder;
pub mod evaluator;
/// Scan loop and the public `search`/`run`/`resume` entry points.
pub mod kernel;
/// Run manifest serialization helpers.
pub mod manifest;
pub mod ordering;
pub mod progress;
pub mod sequencer;
pub mod shard;
pub mod space;

pub use collector::{Solution, SolutionCollector};
pub use config::{CheckpointConfig, OutputConfig, ParallelConfig, RangeConfig, ScanConfig};
pub use decoder::{decode, encode, Decoder};
pub use evaluator::{evaluate, Evaluator, PairDirection, RejectReason, Verdict};
pub use kernel::{
    resume, resume_from, run, scan_until, search, search_range, solve, ScanPlan, ScanSummary,
    SearchOutcome,
};
pub use ordering::Ordering;
pub use progress::{CancelToken, NeverStop, NoProgress, Progress, ProgressSink, StopAt, StopSignal};
pub use sequencer::SelectionVector;
pub use shard::{Cursor, ShardState};
pub use space::{IntervalSet, SearchSpace, CHROMATIC_INTERVALS, CHROMATIC_TOTAL, MAX_SYMBOLS};
