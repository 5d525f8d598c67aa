use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use ivf_core::errors::{ErrorInfo, IvfError};
use ivf_scan::Solution;

use crate::table::{header, SolutionRecord};

fn export_error(err: impl ToString) -> IvfError {
    IvfError::Export(ErrorInfo::new("csv-write", err.to_string()))
}

/// Appends `.csv` to paths that carry no extension.
pub fn with_csv_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("csv")
    }
}

/// Writes the header and one row per solution to `output`.
///
/// `saving` is called with `(written, total)` after every row. Orderings
/// must all have `symbols` symbols; mixing widths would leave the table
/// ragged and is rejected.
pub fn write_solutions<W: Write>(
    output: W,
    solutions: &[Solution],
    symbols: usize,
    saving: &mut dyn FnMut(usize, usize),
) -> Result<(), IvfError> {
    let mut wtr = csv::Writer::from_writer(output);
    wtr.write_record(header(symbols)).map_err(export_error)?;
    let total = solutions.len();
    saving(0, total);
    for (written, solution) in solutions.iter().enumerate() {
        if solution.ordering.len() != symbols {
            return Err(IvfError::Export(
                ErrorInfo::new("csv-width", "ordering width differs from the header")
                    .with_context("index", solution.index.to_string())
                    .with_context("symbols", symbols.to_string()),
            ));
        }
        let record = SolutionRecord::from_solution(solution);
        wtr.write_record(record.fields()).map_err(export_error)?;
        saving(written + 1, total);
    }
    wtr.flush().map_err(export_error)
}

/// Creates (or truncates) the file at `path`, with `.csv` appended when the
/// path has no extension, and writes the solutions to it. Returns the path
/// actually written.
pub fn write_solutions_to_path(
    path: &Path,
    solutions: &[Solution],
    symbols: usize,
    saving: &mut dyn FnMut(usize, usize),
) -> Result<PathBuf, IvfError> {
    let path = with_csv_extension(path);
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| {
            IvfError::Export(
                ErrorInfo::new("csv-mkdir", err.to_string())
                    .with_context("path", parent.display().to_string()),
            )
        })?;
    }
    let file = File::create(&path).map_err(|err| {
        IvfError::Export(
            ErrorInfo::new("csv-create", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    write_solutions(file, solutions, symbols, saving).map_err(|err| match err {
        IvfError::Export(info) => {
            IvfError::Export(info.with_context("path", path.display().to_string()))
        }
        other => other,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_added_only_when_missing() {
        assert_eq!(with_csv_extension(Path::new("out/solutions")), Path::new("out/solutions.csv"));
        assert_eq!(with_csv_extension(Path::new("solutions.txt")), Path::new("solutions.txt"));
        assert_eq!(with_csv_extension(Path::new("a.csv")), Path::new("a.csv"));
    }
}
