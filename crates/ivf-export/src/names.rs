/// Pitch-class names indexed by symbol.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Name used for symbols and intervals that have no musical label.
pub const INVALID_NAME: &str = "INVALID";

/// Name of the pitch class `symbol`.
pub fn note_name(symbol: u8) -> &'static str {
    NOTE_NAMES
        .get(symbol as usize)
        .copied()
        .unwrap_or(INVALID_NAME)
}

/// Name of an interval measured in semitones.
pub fn interval_name(semitones: i8) -> &'static str {
    match semitones {
        3 => "Minor 3rd",
        4 => "Major 3rd",
        5 => "Perfect 4th",
        7 => "Perfect 5th",
        8 => "Minor 6th",
        9 => "Major 6th",
        _ => INVALID_NAME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_cover_the_chromatic_set() {
        assert_eq!(note_name(0), "C");
        assert_eq!(note_name(11), "B");
        assert_eq!(note_name(12), INVALID_NAME);
        let named: Vec<&str> = [3, 4, 5, 7, 8, 9].into_iter().map(interval_name).collect();
        assert!(named.iter().all(|name| *name != INVALID_NAME));
        assert_eq!(interval_name(6), INVALID_NAME);
        assert_eq!(interval_name(-3), INVALID_NAME);
    }
}
