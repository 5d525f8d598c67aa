//! Lehmer-code decoding of selection vectors into orderings.

use crate::ordering::Ordering;
use crate::sequencer::SelectionVector;
use crate::space::MAX_SYMBOLS;

/// Reusable decoder owning the picked-symbol tracker.
///
/// The tracker is cleared at the start of every decode, so one decoder can be
/// reused across the whole scan of a shard.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    picked: [bool; MAX_SYMBOLS],
}

impl Decoder {
    /// Creates a decoder with a cleared tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `vector` into `out`, overwriting every position.
    ///
    /// Position `k` takes the `vector[k]`-th symbol not yet picked, found by
    /// walking the symbols upward and skipping picked ones. For position 0
    /// nothing is picked yet, so the walk lands on `vector[0]` itself.
    #[inline]
    pub fn decode_into(&mut self, vector: &SelectionVector, out: &mut Ordering) {
        let len = vector.len();
        self.picked = [false; MAX_SYMBOLS];
        out.resize(len);
        for (position, &digit) in vector.digits().iter().enumerate() {
            let mut candidate = 0usize;
            let mut remaining = digit;
            loop {
                if !self.picked[candidate] {
                    if remaining == 0 {
                        break;
                    }
                    remaining -= 1;
                }
                candidate += 1;
            }
            self.picked[candidate] = true;
            out.set(position, candidate as u8);
        }
    }

    /// Decodes `vector` into a fresh ordering.
    pub fn decode(&mut self, vector: &SelectionVector) -> Ordering {
        let mut out = Ordering::identity(vector.len());
        self.decode_into(vector, &mut out);
        out
    }
}

/// Decodes a single vector with a throwaway decoder.
pub fn decode(vector: &SelectionVector) -> Ordering {
    Decoder::new().decode(vector)
}

/// Inverse of [`decode`]: the selection vector that produces `ordering`.
pub fn encode(ordering: &Ordering) -> SelectionVector {
    let symbols = ordering.as_slice();
    let mut index = 0u64;
    let mut picked = [false; MAX_SYMBOLS];
    let mut digits = [0u8; MAX_SYMBOLS];
    for (position, &symbol) in symbols.iter().enumerate() {
        digits[position] = picked[..symbol as usize]
            .iter()
            .filter(|taken| !**taken)
            .count() as u8;
        picked[symbol as usize] = true;
    }
    for position in (0..symbols.len()).rev() {
        index = index * (symbols.len() - position) as u64 + digits[position] as u64;
    }
    SelectionVector::from_index(symbols.len(), index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_vector_decodes_to_identity() {
        let ordering = decode(&SelectionVector::zero(12));
        assert_eq!(ordering.as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn maximal_vector_decodes_to_reverse() {
        let vector = SelectionVector::from_index(12, crate::space::CHROMATIC_TOTAL - 1);
        let ordering = decode(&vector);
        assert_eq!(ordering.as_slice(), &[11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn first_orderings_of_four_symbols() {
        let mut decoder = Decoder::new();
        let decoded: Vec<Vec<u8>> = (0..6)
            .map(|index| {
                decoder
                    .decode(&SelectionVector::from_index(4, index))
                    .as_slice()
                    .to_vec()
            })
            .collect();
        assert_eq!(
            decoded,
            vec![
                vec![0, 1, 2, 3],
                vec![1, 0, 2, 3],
                vec![2, 0, 1, 3],
                vec![3, 0, 1, 2],
                vec![0, 2, 1, 3],
                vec![1, 2, 0, 3],
            ]
        );
    }

    #[test]
    fn reused_decoder_matches_fresh_decoder() {
        let mut reused = Decoder::new();
        let mut out = Ordering::identity(12);
        for index in [5u64, 93_444_724, 17, 400_000_000] {
            let vector = SelectionVector::from_index(12, index);
            reused.decode_into(&vector, &mut out);
            assert_eq!(out, decode(&vector));
        }
    }

    #[test]
    fn encode_inverts_decode() {
        let fixture = Ordering::from_slice(&[4, 7, 5, 9, 1, 6, 3, 10, 0, 8, 2, 11]).unwrap();
        let vector = encode(&fixture);
        assert_eq!(vector.to_index(), 93_444_724);
        assert_eq!(decode(&vector), fixture);
    }
}
