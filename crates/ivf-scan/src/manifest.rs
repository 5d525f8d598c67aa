use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use ivf_core::errors::{ErrorInfo, IvfError};
use ivf_core::{stable_hash_string, RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;

/// Schema written into every manifest.
pub const MANIFEST_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Structured manifest describing a completed or interrupted scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Manifest schema version.
    pub schema_version: SchemaVersion,
    /// Configuration used for the run.
    pub config: ScanConfig,
    /// Configuration hash, timestamp and tool versions.
    pub provenance: RunProvenance,
    /// Size of the whole space.
    pub total: u64,
    /// Orderings scanned.
    pub scanned: u64,
    /// True when every shard reached its end.
    pub completed: bool,
    /// Number of solutions found.
    pub solution_count: usize,
    /// SHA-256 digest of the canonical JSON solution list.
    pub solutions_digest: String,
    /// Checkpoint files retained at the end of the run (relative to the run directory).
    pub checkpoints: Vec<PathBuf>,
}

impl RunManifest {
    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), IvfError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                IvfError::Checkpoint(
                    ErrorInfo::new("manifest-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            IvfError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            IvfError::Checkpoint(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, IvfError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            IvfError::Checkpoint(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            IvfError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}

/// Captures provenance for a run of `config`.
pub fn capture_provenance(config: &ScanConfig) -> Result<RunProvenance, IvfError> {
    let mut tool_versions = BTreeMap::new();
    tool_versions.insert("ivf-scan".to_string(), env!("CARGO_PKG_VERSION").to_string());
    Ok(RunProvenance {
        config_hash: stable_hash_string(config)?,
        created_at: chrono::Utc::now().to_rfc3339(),
        tool_versions,
    })
}
