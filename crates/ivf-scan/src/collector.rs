use serde::{Deserialize, Serialize};

use crate::ordering::Ordering;

/// An accepted ordering and the counter value at which it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Solution {
    /// Counter value (position in the enumeration) of the ordering.
    pub index: u64,
    /// The accepted ordering.
    pub ordering: Ordering,
}

/// Append-only solution list preserving discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionCollector {
    solutions: Vec<Solution>,
}

impl SolutionCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a collector with solutions restored from a checkpoint.
    pub fn from_solutions(solutions: Vec<Solution>) -> Self {
        Self { solutions }
    }

    /// Records an accepted ordering.
    #[inline]
    pub fn push(&mut self, index: u64, ordering: &Ordering) {
        self.solutions.push(Solution {
            index,
            ordering: *ordering,
        });
    }

    /// Appends another collector's solutions after this one's.
    pub fn append(&mut self, other: SolutionCollector) {
        self.solutions.extend(other.solutions);
    }

    /// Number of solutions found so far.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Returns true when nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Collected solutions in discovery order.
    pub fn as_slice(&self) -> &[Solution] {
        &self.solutions
    }

    /// Hands the solutions over to the caller.
    pub fn into_vec(self) -> Vec<Solution> {
        self.solutions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_discovery_order() {
        let mut first = SolutionCollector::new();
        first.push(8, &Ordering::from_slice(&[0, 3, 1, 2]).unwrap());
        let mut second = SolutionCollector::new();
        second.push(5, &Ordering::from_slice(&[1, 2, 0, 3]).unwrap());
        second.append(first);
        let indices: Vec<u64> = second.as_slice().iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![5, 8]);
    }
}
