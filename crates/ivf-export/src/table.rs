use ivf_scan::Solution;

use crate::names::{interval_name, note_name};

/// One exported row, laid out in the column order of [`header`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionRecord {
    /// Symbol ids in order.
    pub notes: Vec<u8>,
    /// Signed pair intervals.
    pub intervals: Vec<i8>,
    /// Pitch-class names in order.
    pub note_names: Vec<&'static str>,
    /// Interval names in pair order.
    pub interval_names: Vec<&'static str>,
}

impl SolutionRecord {
    /// Builds the row for `solution`.
    pub fn from_solution(solution: &Solution) -> Self {
        let notes = solution.ordering.as_slice().to_vec();
        let intervals: Vec<i8> = solution.ordering.pair_intervals().collect();
        Self {
            note_names: notes.iter().map(|&symbol| note_name(symbol)).collect(),
            interval_names: intervals.iter().map(|&value| interval_name(value)).collect(),
            notes,
            intervals,
        }
    }

    /// CSV fields in header order.
    pub fn fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(self.notes.len() * 3);
        fields.extend(self.notes.iter().map(u8::to_string));
        fields.extend(self.intervals.iter().map(i8::to_string));
        fields.extend(self.note_names.iter().map(|name| name.to_string()));
        fields.extend(self.interval_names.iter().map(|name| name.to_string()));
        fields
    }
}

/// Column names for orderings of `symbols` symbols.
pub fn header(symbols: usize) -> Vec<String> {
    let pairs = symbols / 2;
    let mut columns = Vec::with_capacity(symbols * 3);
    columns.extend((1..=symbols).map(|i| format!("Note {i}")));
    columns.extend((1..=pairs).map(|i| format!("Interval {i}")));
    columns.extend((1..=symbols).map(|i| format!("Note Name {i}")));
    columns.extend((1..=pairs).map(|i| format!("Interval Name {i}")));
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivf_scan::Ordering;

    #[test]
    fn record_matches_header_width() {
        let solution = Solution {
            index: 93_444_724,
            ordering: Ordering::from_slice(&[4, 7, 5, 9, 1, 6, 3, 10, 0, 8, 2, 11]).unwrap(),
        };
        let record = SolutionRecord::from_solution(&solution);
        let fields = record.fields();
        assert_eq!(fields.len(), header(12).len());
        assert_eq!(&fields[..3], &["4", "7", "5"]);
        assert_eq!(fields[12], "3");
        assert_eq!(fields[18], "E");
        assert_eq!(fields[30], "Minor 3rd");
        assert_eq!(fields[35], "Major 6th");
        assert!(!fields.iter().any(|field| field == "93444724"));
    }

    #[test]
    fn reduced_record_matches_reduced_header() {
        let solution = Solution {
            index: 164,
            ordering: Ordering::from_slice(&[2, 3, 1, 4, 0, 5]).unwrap(),
        };
        let fields = SolutionRecord::from_solution(&solution).fields();
        assert_eq!(fields.len(), header(6).len());
        assert_eq!(fields[0], "2");
        assert_eq!(&fields[6..9], &["1", "3", "5"]);
    }

    #[test]
    fn header_layout() {
        let columns = header(4);
        assert_eq!(
            columns,
            vec![
                "Note 1",
                "Note 2",
                "Note 3",
                "Note 4",
                "Interval 1",
                "Interval 2",
                "Note Name 1",
                "Note Name 2",
                "Note Name 3",
                "Note Name 4",
                "Interval Name 1",
                "Interval Name 2",
            ]
        );
    }
}
