use std::fs;
use std::path::{Path, PathBuf};

use ivf_core::errors::{ErrorInfo, IvfError};
use ivf_core::SchemaVersion;
use serde::{Deserialize, Serialize};

use crate::collector::{Solution, SolutionCollector};
use crate::config::ScanConfig;
use crate::shard::{Cursor, ShardState};

/// Schema written into every checkpoint.
pub const CHECKPOINT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializable state of one shard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardCheckpoint {
    /// Range progress at the time of the checkpoint.
    pub cursor: Cursor,
    /// Solutions found in `cursor.start..cursor.next`.
    pub solutions: Vec<Solution>,
}

/// Aggregated checkpoint payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointPayload {
    /// Payload schema version.
    pub schema_version: SchemaVersion,
    /// Configuration snapshot associated with the run.
    pub config: ScanConfig,
    /// Shard states in counter order.
    pub shards: Vec<ShardCheckpoint>,
}

impl CheckpointPayload {
    /// Restores the payload from disk.
    pub fn load(path: &Path) -> Result<Self, IvfError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            IvfError::Checkpoint(
                ErrorInfo::new("checkpoint-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            IvfError::Checkpoint(
                ErrorInfo::new("checkpoint-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Writes the payload to disk.
    pub fn store(&self, path: &Path) -> Result<(), IvfError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                IvfError::Checkpoint(
                    ErrorInfo::new("checkpoint-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            IvfError::Checkpoint(
                ErrorInfo::new("checkpoint-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            IvfError::Checkpoint(
                ErrorInfo::new("checkpoint-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Orderings scanned across all shards.
    pub fn scanned(&self) -> u64 {
        self.shards.iter().map(|shard| shard.cursor.scanned()).sum()
    }
}

/// Constructs a checkpoint payload from live shard states.
pub fn build_payload(config: &ScanConfig, shards: &[ShardState]) -> CheckpointPayload {
    CheckpointPayload {
        schema_version: CHECKPOINT_SCHEMA,
        config: config.clone(),
        shards: shards
            .iter()
            .map(|shard| ShardCheckpoint {
                cursor: shard.cursor,
                solutions: shard.collector.as_slice().to_vec(),
            })
            .collect(),
    }
}

/// Restores shard states, rejecting payloads that could not have been
/// produced by a scan of the recorded configuration.
pub fn restore_payload(payload: &CheckpointPayload) -> Result<Vec<ShardState>, IvfError> {
    if !CHECKPOINT_SCHEMA.is_compatible_with(&payload.schema_version) {
        return Err(IvfError::Checkpoint(
            ErrorInfo::new("checkpoint-schema", "unsupported checkpoint schema").with_context(
                "schema",
                format!(
                    "{}.{}.{}",
                    payload.schema_version.major,
                    payload.schema_version.minor,
                    payload.schema_version.patch
                ),
            ),
        ));
    }
    if payload.shards.is_empty() {
        return Err(IvfError::Checkpoint(ErrorInfo::new(
            "empty-checkpoint",
            "checkpoint contained no shards",
        )));
    }
    let total = payload.config.space.total();
    let symbols = payload.config.space.symbols();
    let mut states = Vec::with_capacity(payload.shards.len());
    for (position, shard) in payload.shards.iter().enumerate() {
        let cursor = shard.cursor;
        if cursor.start > cursor.next || cursor.next > cursor.end || cursor.end > total {
            return Err(IvfError::Checkpoint(
                ErrorInfo::new("checkpoint-cursor", "cursor out of bounds")
                    .with_context("shard", position.to_string())
                    .with_context("cursor", format!("{cursor:?}")),
            ));
        }
        let misplaced = shard.solutions.iter().find(|solution| {
            solution.index < cursor.start
                || solution.index >= cursor.next
                || solution.ordering.len() != symbols
        });
        if let Some(solution) = misplaced {
            return Err(IvfError::Checkpoint(
                ErrorInfo::new("checkpoint-solution", "solution outside its shard")
                    .with_context("shard", position.to_string())
                    .with_context("index", solution.index.to_string()),
            ));
        }
        states.push(ShardState {
            cursor,
            collector: SolutionCollector::from_solutions(shard.solutions.clone()),
        });
    }
    Ok(states)
}

/// Deterministic checkpoint file path keyed by the number of orderings scanned.
pub fn checkpoint_path(root: &Path, scanned: u64) -> PathBuf {
    root.join(format!("ckpt_{scanned:012}.json"))
}
