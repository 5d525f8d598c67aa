pub mod check;
pub mod resume;
pub mod scan;

use std::error::Error;
use std::path::Path;
use std::time::Duration;

use ivf_export::write_solutions_to_path;
use ivf_scan::{ScanConfig, ScanSummary};
use serde_json::json;

use crate::console::{group_digits, saving_reporter};
use crate::write_json;

pub(crate) const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

/// Writes `summary.json` and, for completed runs, the solutions CSV.
pub(crate) fn finish_run(
    out: &Path,
    config: &ScanConfig,
    summary: &ScanSummary,
    csv: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let csv_path = csv
        .map(Path::to_path_buf)
        .unwrap_or_else(|| out.join(&config.output.solutions_file));
    let written = if summary.completed {
        let mut saving = saving_reporter(REDRAW_INTERVAL);
        Some(write_solutions_to_path(
            &csv_path,
            &summary.solutions,
            config.space.symbols(),
            &mut saving,
        )?)
    } else {
        None
    };

    let payload = json!({
        "space": summary.space,
        "direction": summary.direction,
        "total": summary.total,
        "scanned": summary.scanned,
        "completed": summary.completed,
        "cursors": summary.cursors,
        "solution_count": summary.solution_count,
        "solutions_digest": summary.solutions_digest,
        "solutions_file": written,
        "checkpoints": summary.checkpoints,
        "manifest": summary.manifest_path,
    });
    write_json(out.join(&config.output.summary_file), &payload)?;

    match (&written, summary.checkpoints.last()) {
        (Some(path), _) => println!(
            "Done! {} solutions written to {}",
            group_digits(summary.solution_count as u64),
            path.display()
        ),
        (None, Some(checkpoint)) => println!(
            "Stopped after {} of {} orderings ({} solutions so far); resume with `ivf resume --checkpoint {}`",
            group_digits(summary.scanned),
            group_digits(summary.total),
            group_digits(summary.solution_count as u64),
            checkpoint.display()
        ),
        (None, None) => println!(
            "Stopped after {} of {} orderings; no checkpoint was written",
            group_digits(summary.scanned),
            group_digits(summary.total)
        ),
    }
    Ok(())
}
