//! Mixed-radix selection vectors (factorial number system).
//!
//! Position `i` of a vector of length `n` has radix `n - i`, so position 0 is
//! the least significant digit and the last position is always zero. Together
//! with [`crate::decoder`] this gives a bijection between `0..n!` and the
//! orderings of `n` symbols.

use crate::space::MAX_SYMBOLS;

/// Digit sequence encoding one counter value as a decoding recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionVector {
    digits: [u8; MAX_SYMBOLS],
    len: usize,
}

impl SelectionVector {
    /// The vector for counter value zero.
    pub fn zero(len: usize) -> Self {
        debug_assert!(len <= MAX_SYMBOLS);
        Self {
            digits: [0; MAX_SYMBOLS],
            len: len.min(MAX_SYMBOLS),
        }
    }

    /// The vector for counter value `index`, reduced modulo `len!`.
    pub fn from_index(len: usize, mut index: u64) -> Self {
        let mut vector = Self::zero(len);
        for position in 0..vector.len {
            let radix = (vector.len - position) as u64;
            vector.digits[position] = (index % radix) as u8;
            index /= radix;
        }
        vector
    }

    /// Counter value represented by this vector.
    pub fn to_index(&self) -> u64 {
        let mut index = 0u64;
        for position in (0..self.len).rev() {
            index = index * (self.len - position) as u64 + self.digits[position] as u64;
        }
        index
    }

    /// Steps to the next counter value, carrying from position 0 rightwards.
    /// The maximal vector wraps around to zero.
    #[inline]
    pub fn advance(&mut self) {
        for position in 0..self.len {
            self.digits[position] += 1;
            if self.digits[position] as usize >= self.len - position {
                self.digits[position] = 0;
                continue;
            }
            break;
        }
    }

    /// The digits, least significant first.
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true for the zero-length vector.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exclusive upper bound for the digit at `position`.
    pub fn radix(&self, position: usize) -> usize {
        self.len - position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::factorial;

    #[test]
    fn advance_carries_left_to_right() {
        let mut vector = SelectionVector::zero(4);
        vector.advance();
        assert_eq!(vector.digits(), &[1, 0, 0, 0]);
        for _ in 0..3 {
            vector.advance();
        }
        assert_eq!(vector.digits(), &[0, 1, 0, 0]);
        assert_eq!(vector.to_index(), 4);
    }

    #[test]
    fn maximal_vector_wraps_to_zero() {
        let mut vector = SelectionVector::from_index(12, factorial(12) - 1);
        assert_eq!(vector.digits(), &[11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
        vector.advance();
        assert_eq!(vector, SelectionVector::zero(12));
    }

    #[test]
    fn index_round_trips_at_chromatic_length() {
        for index in [0, 1, 11, 12, 131, 93_444_724, factorial(12) - 1] {
            assert_eq!(SelectionVector::from_index(12, index).to_index(), index);
        }
    }

    #[test]
    fn digits_respect_radix() {
        let vector = SelectionVector::from_index(12, 400_000_000);
        for (position, &digit) in vector.digits().iter().enumerate() {
            assert!((digit as usize) < vector.radix(position));
        }
    }
}
