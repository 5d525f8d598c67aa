//! Tabular export of scan results: symbol ids, pair intervals and their
//! musical names, one CSV row per solution.

pub mod names;
pub mod table;
pub mod writer;

pub use names::{interval_name, note_name, INVALID_NAME, NOTE_NAMES};
pub use table::{header, SolutionRecord};
pub use writer::{with_csv_extension, write_solutions, write_solutions_to_path};
