//! Pair-interval constraint evaluation.

use serde::{Deserialize, Serialize};

use crate::ordering::Ordering;
use crate::space::{IntervalSet, SearchSpace};

/// How a pair's interval is measured.
///
/// `Ascending` discards any pair whose second symbol is lower than its first.
/// Without it every solution would reappear with each of its pairs reversed
/// (about 2^6 times as many rows carrying no new musical information).
/// `Either` measures the absolute difference and keeps those reversals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PairDirection {
    /// Only non-negative differences are considered.
    #[default]
    Ascending,
    /// Pairs are measured by absolute difference.
    Either,
}

/// Why an ordering was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    /// The pair descends while only ascending pairs are allowed.
    Descending,
    /// The pair's interval is not in the required set.
    NotAllowed,
    /// The pair repeats an interval used by an earlier pair.
    Repeated,
    /// Every pair passed but some required interval is missing.
    Incomplete,
}

/// Result of evaluating one ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "kebab-case")]
pub enum Verdict {
    /// The ordering is a solution.
    Accept,
    /// The ordering fails; `pair` names the offending pair when there is one.
    Reject {
        /// Index of the pair that failed, `None` for [`RejectReason::Incomplete`].
        pair: Option<usize>,
        /// Failure category.
        reason: RejectReason,
    },
}

impl Verdict {
    /// Returns true for [`Verdict::Accept`].
    #[inline]
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }
}

/// Reusable evaluator owning the used-interval tracker.
#[derive(Debug, Clone)]
pub struct Evaluator {
    required: IntervalSet,
    direction: PairDirection,
    used: IntervalSet,
}

impl Evaluator {
    /// Creates an evaluator for `space`.
    pub fn new(space: &SearchSpace, direction: PairDirection) -> Self {
        Self {
            required: space.intervals(),
            direction,
            used: IntervalSet::empty(),
        }
    }

    /// Judges one ordering, stopping at the first failing pair.
    #[inline]
    pub fn evaluate(&mut self, ordering: &Ordering) -> Verdict {
        self.used.clear();
        for (pair, difference) in ordering.pair_intervals().enumerate() {
            let interval = match self.direction {
                PairDirection::Ascending if difference < 0 => {
                    return reject(pair, RejectReason::Descending)
                }
                PairDirection::Ascending => difference as u8,
                PairDirection::Either => difference.unsigned_abs(),
            };
            if !self.required.contains(interval) {
                return reject(pair, RejectReason::NotAllowed);
            }
            if !self.used.insert(interval) {
                return reject(pair, RejectReason::Repeated);
            }
        }
        // Coverage pass: every required interval must have been used.
        if !self.used.is_superset(&self.required) {
            return Verdict::Reject {
                pair: None,
                reason: RejectReason::Incomplete,
            };
        }
        Verdict::Accept
    }
}

fn reject(pair: usize, reason: RejectReason) -> Verdict {
    Verdict::Reject {
        pair: Some(pair),
        reason,
    }
}

/// Evaluates a single ordering against the chromatic space.
pub fn evaluate(ordering: &Ordering) -> Verdict {
    Evaluator::new(&SearchSpace::chromatic(), PairDirection::Ascending).evaluate(ordering)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordering(symbols: &[u8]) -> Ordering {
        Ordering::from_slice(symbols).unwrap()
    }

    #[test]
    fn accepts_fixture() {
        let fixture = ordering(&[4, 7, 5, 9, 1, 6, 3, 10, 0, 8, 2, 11]);
        assert_eq!(evaluate(&fixture), Verdict::Accept);
    }

    #[test]
    fn swap_into_tritone_rejects() {
        let swapped = ordering(&[4, 10, 5, 9, 1, 6, 3, 7, 0, 8, 2, 11]);
        assert_eq!(
            evaluate(&swapped),
            Verdict::Reject {
                pair: Some(0),
                reason: RejectReason::NotAllowed
            }
        );
    }

    #[test]
    fn descending_pair_rejects_first() {
        let reversed = ordering(&[7, 4, 5, 9, 1, 6, 3, 10, 0, 8, 2, 11]);
        assert_eq!(
            evaluate(&reversed),
            Verdict::Reject {
                pair: Some(0),
                reason: RejectReason::Descending
            }
        );
    }

    #[test]
    fn either_direction_accepts_reversed_pairs() {
        let space = SearchSpace::chromatic();
        let mut evaluator = Evaluator::new(&space, PairDirection::Either);
        let reversed = ordering(&[7, 4, 9, 5, 1, 6, 10, 3, 0, 8, 11, 2]);
        assert!(evaluator.evaluate(&reversed).is_accept());
    }

    #[test]
    fn repeated_interval_rejects() {
        let repeated = ordering(&[0, 3, 1, 4, 2, 7, 5, 10, 6, 11, 8, 9]);
        assert_eq!(
            evaluate(&repeated),
            Verdict::Reject {
                pair: Some(1),
                reason: RejectReason::Repeated
            }
        );
    }

    #[test]
    fn tracker_resets_between_calls() {
        let mut evaluator = Evaluator::new(&SearchSpace::chromatic(), PairDirection::Ascending);
        let fixture = ordering(&[4, 7, 5, 9, 1, 6, 3, 10, 0, 8, 2, 11]);
        for _ in 0..3 {
            assert!(evaluator.evaluate(&fixture).is_accept());
        }
    }
}
