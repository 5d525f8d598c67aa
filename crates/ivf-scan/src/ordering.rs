//! Orderings of the symbol space and their consecutive pairs.

use std::fmt;
use std::hash::{Hash, Hasher};

use ivf_core::errors::{ErrorInfo, IvfError};
use serde::{Deserialize, Serialize};

use crate::space::MAX_SYMBOLS;

/// A sequence of distinct symbols, stored inline.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct Ordering {
    symbols: [u8; MAX_SYMBOLS],
    len: usize,
}

impl Ordering {
    /// The ordering `0, 1, .., len - 1`.
    pub fn identity(len: usize) -> Self {
        debug_assert!(len <= MAX_SYMBOLS);
        let mut symbols = [0u8; MAX_SYMBOLS];
        for (position, slot) in symbols.iter_mut().enumerate() {
            *slot = position as u8;
        }
        Self {
            symbols,
            len: len.min(MAX_SYMBOLS),
        }
    }

    /// Builds an ordering from explicit symbols, checking that they form a
    /// permutation of `0..symbols.len()`.
    pub fn from_slice(symbols: &[u8]) -> Result<Self, IvfError> {
        if symbols.len() > MAX_SYMBOLS {
            return Err(IvfError::Config(
                ErrorInfo::new("ordering-length", "too many symbols")
                    .with_context("len", symbols.len().to_string()),
            ));
        }
        let mut seen = [false; MAX_SYMBOLS];
        for &symbol in symbols {
            let index = symbol as usize;
            if index >= symbols.len() || seen[index] {
                return Err(IvfError::Config(
                    ErrorInfo::new("ordering-permutation", "symbols must be a permutation")
                        .with_context("symbol", symbol.to_string())
                        .with_context("len", symbols.len().to_string()),
                ));
            }
            seen[index] = true;
        }
        let mut ordering = Self::identity(symbols.len());
        ordering.symbols[..symbols.len()].copy_from_slice(symbols);
        Ok(ordering)
    }

    /// The symbols in order.
    pub fn as_slice(&self) -> &[u8] {
        &self.symbols[..self.len]
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true for the empty ordering.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Consecutive non-overlapping pairs `(0,1), (2,3), ..`.
    pub fn pairs(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.as_slice().chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Signed differences `second - first` of each pair.
    pub fn pair_intervals(&self) -> impl Iterator<Item = i8> + '_ {
        self.pairs().map(|(first, second)| second as i8 - first as i8)
    }

    /// Returns true when every symbol in `0..len` appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; MAX_SYMBOLS];
        self.as_slice().iter().all(|&symbol| {
            let index = symbol as usize;
            index < self.len && !std::mem::replace(&mut seen[index], true)
        })
    }

    pub(crate) fn set(&mut self, position: usize, symbol: u8) {
        self.symbols[position] = symbol;
    }

    pub(crate) fn resize(&mut self, len: usize) {
        self.len = len.min(MAX_SYMBOLS);
    }
}

// Slots past `len` are scratch space and take no part in equality.
impl PartialEq for Ordering {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Ordering {}

impl Hash for Ordering {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Debug for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl From<Ordering> for Vec<u8> {
    fn from(ordering: Ordering) -> Self {
        ordering.as_slice().to_vec()
    }
}

impl TryFrom<Vec<u8>> for Ordering {
    type Error = IvfError;

    fn try_from(symbols: Vec<u8>) -> Result<Self, Self::Error> {
        Ordering::from_slice(&symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_requires_permutation() {
        assert!(Ordering::from_slice(&[1, 0, 3, 2]).is_ok());
        assert!(Ordering::from_slice(&[1, 1, 3, 2]).is_err());
        assert!(Ordering::from_slice(&[0, 1, 2, 4]).is_err());
    }

    #[test]
    fn pair_intervals_are_signed() {
        let ordering = Ordering::from_slice(&[1, 3, 2, 0]).unwrap();
        assert_eq!(ordering.pair_intervals().collect::<Vec<_>>(), vec![2, -2]);

        let reversed_first = Ordering::from_slice(&[7, 4, 5, 9, 1, 6, 3, 10, 0, 8, 2, 11]).unwrap();
        assert_eq!(
            reversed_first.pair_intervals().collect::<Vec<_>>(),
            vec![-3, 4, 5, 7, 8, 9]
        );
    }

    #[test]
    fn serde_uses_plain_symbol_list() {
        let ordering = Ordering::from_slice(&[2, 0, 1, 3]).unwrap();
        let json = serde_json::to_string(&ordering).unwrap();
        assert_eq!(json, "[2,0,1,3]");
        let restored: Ordering = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ordering);
        assert!(serde_json::from_str::<Ordering>("[0,0]").is_err());
    }
}
