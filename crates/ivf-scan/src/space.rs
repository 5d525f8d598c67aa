//! Search space description: symbol count and the required interval set.

use std::fmt;

use ivf_core::errors::{ErrorInfo, IvfError};
use serde::{Deserialize, Serialize};

/// Largest supported symbol count (the twelve chromatic pitch classes).
pub const MAX_SYMBOLS: usize = 12;

/// Symbols in the chromatic search space.
pub const CHROMATIC_SYMBOLS: usize = 12;

/// Intervals every chromatic solution uses exactly once, in semitones.
pub const CHROMATIC_INTERVALS: [u8; 6] = [3, 4, 5, 7, 8, 9];

/// Returns `n!` for the supported symbol counts.
pub const fn factorial(n: usize) -> u64 {
    let mut acc = 1u64;
    let mut k = 2u64;
    while k <= n as u64 {
        acc *= k;
        k += 1;
    }
    acc
}

/// Number of orderings of the chromatic space (12! = 479,001,600).
pub const CHROMATIC_TOTAL: u64 = factorial(CHROMATIC_SYMBOLS);

/// Set of interval sizes stored as a bitmask over `0..16`.
///
/// Doubles as the evaluator's used-interval tracker, so clearing it is a
/// single store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct IntervalSet(u16);

impl IntervalSet {
    /// Creates an empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Builds a set from interval values. Values of 16 or more are ignored.
    pub fn from_slice(values: &[u8]) -> Self {
        let mut set = Self::empty();
        for &value in values {
            set.insert(value);
        }
        set
    }

    /// Returns true when `interval` is a member.
    #[inline]
    pub fn contains(&self, interval: u8) -> bool {
        interval < 16 && self.0 & (1 << interval) != 0
    }

    /// Inserts `interval`, returning false if it was already present.
    #[inline]
    pub fn insert(&mut self, interval: u8) -> bool {
        if interval >= 16 {
            return false;
        }
        let bit = 1u16 << interval;
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    /// Removes every member.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true when the set has no members.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns true when every member of `other` is also in `self`.
    #[inline]
    pub fn is_superset(&self, other: &IntervalSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Iterates over members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..16).filter(move |&value| self.contains(value))
    }

    /// Largest member, if any.
    pub fn max(&self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(15 - self.0.leading_zeros() as u8)
        }
    }
}

impl fmt::Debug for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl From<IntervalSet> for Vec<u8> {
    fn from(set: IntervalSet) -> Self {
        set.iter().collect()
    }
}

impl TryFrom<Vec<u8>> for IntervalSet {
    type Error = IvfError;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        let mut set = IntervalSet::empty();
        for value in values {
            if value as usize >= MAX_SYMBOLS {
                return Err(IvfError::Config(
                    ErrorInfo::new("interval-range", "interval exceeds the symbol range")
                        .with_context("interval", value.to_string()),
                ));
            }
            if !set.insert(value) {
                return Err(IvfError::Config(
                    ErrorInfo::new("interval-duplicate", "interval listed twice")
                        .with_context("interval", value.to_string()),
                ));
            }
        }
        Ok(set)
    }
}

/// Validated search space: `symbols` distinct symbols split into
/// `symbols / 2` consecutive pairs whose intervals must cover `intervals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSpace", into = "RawSpace")]
pub struct SearchSpace {
    symbols: usize,
    intervals: IntervalSet,
}

#[derive(Serialize, Deserialize)]
struct RawSpace {
    symbols: usize,
    intervals: IntervalSet,
}

impl From<SearchSpace> for RawSpace {
    fn from(space: SearchSpace) -> Self {
        Self {
            symbols: space.symbols,
            intervals: space.intervals,
        }
    }
}

impl TryFrom<RawSpace> for SearchSpace {
    type Error = IvfError;

    fn try_from(raw: RawSpace) -> Result<Self, Self::Error> {
        SearchSpace::new(raw.symbols, raw.intervals)
    }
}

impl SearchSpace {
    /// The twelve pitch classes with intervals {3, 4, 5, 7, 8, 9}.
    pub fn chromatic() -> Self {
        Self {
            symbols: CHROMATIC_SYMBOLS,
            intervals: IntervalSet::from_slice(&CHROMATIC_INTERVALS),
        }
    }

    /// Builds a reduced space, validating that it is a well-formed analog of
    /// the chromatic one.
    pub fn new(symbols: usize, intervals: IntervalSet) -> Result<Self, IvfError> {
        if symbols == 0 || symbols > MAX_SYMBOLS || symbols % 2 != 0 {
            return Err(IvfError::Config(
                ErrorInfo::new("space-symbols", "symbol count must be even and within 2..=12")
                    .with_context("symbols", symbols.to_string()),
            ));
        }
        if intervals.contains(0) || intervals.max().map_or(true, |max| max as usize >= symbols) {
            return Err(IvfError::Config(
                ErrorInfo::new("space-intervals", "intervals must lie within 1..symbols")
                    .with_context("symbols", symbols.to_string())
                    .with_context("intervals", format!("{intervals:?}")),
            ));
        }
        if intervals.len() != symbols / 2 {
            return Err(IvfError::Config(
                ErrorInfo::new("space-cardinality", "one interval is required per pair")
                    .with_context("pairs", (symbols / 2).to_string())
                    .with_context("intervals", intervals.len().to_string())
                    .with_hint("list exactly symbols / 2 distinct intervals"),
            ));
        }
        Ok(Self { symbols, intervals })
    }

    /// Number of symbols per ordering.
    pub fn symbols(&self) -> usize {
        self.symbols
    }

    /// Number of consecutive pairs per ordering.
    pub fn pairs(&self) -> usize {
        self.symbols / 2
    }

    /// The required interval set.
    pub fn intervals(&self) -> IntervalSet {
        self.intervals
    }

    /// Number of orderings in the space (`symbols!`).
    pub fn total(&self) -> u64 {
        factorial(self.symbols)
    }
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self::chromatic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chromatic_constants() {
        let space = SearchSpace::chromatic();
        assert_eq!(space.total(), 479_001_600);
        assert_eq!(CHROMATIC_TOTAL, 479_001_600);
        assert_eq!(space.pairs(), 6);
        assert_eq!(space.intervals().iter().collect::<Vec<_>>(), vec![3, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn interval_set_tracks_membership() {
        let mut set = IntervalSet::empty();
        assert!(set.insert(5));
        assert!(!set.insert(5));
        assert!(set.contains(5));
        assert!(!set.contains(6));
        assert_eq!(set.max(), Some(5));
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.max(), None);
    }

    #[test]
    fn rejects_malformed_spaces() {
        let odd = SearchSpace::new(5, IntervalSet::from_slice(&[1, 2]));
        assert_eq!(odd.unwrap_err().info().code, "space-symbols");
        let wide = SearchSpace::new(4, IntervalSet::from_slice(&[1, 4]));
        assert_eq!(wide.unwrap_err().info().code, "space-intervals");
        let short = SearchSpace::new(6, IntervalSet::from_slice(&[1, 2]));
        assert_eq!(short.unwrap_err().info().code, "space-cardinality");
    }

    #[test]
    fn space_deserializes_with_validation() {
        let space: SearchSpace = serde_yaml::from_str("symbols: 4\nintervals: [1, 3]\n").unwrap();
        assert_eq!(space.total(), 24);
        assert!(serde_yaml::from_str::<SearchSpace>("symbols: 4\nintervals: [1, 1]\n").is_err());
        assert!(serde_yaml::from_str::<SearchSpace>("symbols: 3\nintervals: [1]\n").is_err());
    }
}
