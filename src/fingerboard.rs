//! First-position fingerboard data: which note sits under which finger on
//! which string, and the frequency of each note.

/// Strings low to high, as they appear left to right on the grid.
pub const STRINGS: [&str; 4] = ["G", "D", "A", "E"];

pub struct FingerRow {
    pub label: &'static str,
    /// One slot per string in [`STRINGS`] order; `None` where the position
    /// is not used in first position.
    pub notes: [Option<&'static str>; 4],
}

pub const LAYOUT: [FingerRow; 7] = [
    FingerRow {
        label: "Open string",
        notes: [Some("G3"), Some("D4"), Some("A4"), Some("E5")],
    },
    FingerRow {
        label: "1st finger",
        notes: [Some("A3"), Some("E4"), Some("B4"), Some("F5")],
    },
    FingerRow {
        label: "1st finger high",
        notes: [None, None, None, Some("F#5")],
    },
    FingerRow {
        label: "2nd finger",
        notes: [Some("B3"), None, Some("C5"), Some("G5")],
    },
    FingerRow {
        label: "2nd finger high",
        notes: [None, Some("F#4"), Some("C#5"), Some("G#5")],
    },
    FingerRow {
        label: "3rd finger",
        notes: [Some("C4"), Some("G4"), Some("D5"), Some("A5")],
    },
    FingerRow {
        label: "4th finger",
        notes: [Some("D4"), Some("A4"), Some("E5"), Some("B5")],
    },
];

/// Every distinct note on the board, first-seen order. The 4th-finger notes
/// double the next open string, so this is shorter than the cell count.
pub fn catalog() -> Vec<&'static str> {
    let mut notes = Vec::new();
    for row in &LAYOUT {
        for note in row.notes.iter().flatten() {
            if !notes.contains(note) {
                notes.push(*note);
            }
        }
    }
    notes
}

/// Equal-temperament frequency (A4 = 440 Hz) for notes on the board.
pub fn frequency(note: &str) -> Option<f32> {
    let hz = match note {
        "G3" => 196.00,
        "A3" => 220.00,
        "B3" => 246.94,
        "C4" => 261.63,
        "D4" => 293.66,
        "E4" => 329.63,
        "F#4" => 369.99,
        "G4" => 392.00,
        "A4" => 440.00,
        "B4" => 493.88,
        "C5" => 523.25,
        "C#5" => 554.37,
        "D5" => 587.33,
        "E5" => 659.25,
        "F5" => 698.46,
        "F#5" => 739.99,
        "G5" => 783.99,
        "G#5" => 830.61,
        "A5" => 880.00,
        "B5" => 987.77,
        _ => return None,
    };
    Some(hz)
}

/// File name a recorded sample would live under: lower-cased identifier with
/// `#` spelled `s`, e.g. "C#5" -> "violin-cs5.wav".
pub fn sample_filename(note: &str) -> String {
    format!("violin-{}.wav", note.to_lowercase().replace('#', "s"))
}

/// Marker label: the identifier without octave digit or sharp sign.
pub fn letter(note: &str) -> &str {
    &note[..1]
}

/// All (row, string) cells holding `note`. A pitch can sit in two places
/// (open string and 4th finger), and every one of them lights up on answer.
pub fn positions_of(note: &str) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for (row, finger) in LAYOUT.iter().enumerate() {
        for (col, cell) in finger.notes.iter().enumerate() {
            if *cell == Some(note) {
                cells.push((row, col));
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_twenty_unique_notes() {
        let notes = catalog();
        assert_eq!(notes.len(), 20);
        for (i, note) in notes.iter().enumerate() {
            assert!(!notes[i + 1..].contains(note), "duplicate {note}");
        }
    }

    #[test]
    fn every_board_note_has_a_frequency() {
        for note in catalog() {
            assert!(frequency(note).is_some(), "no frequency for {note}");
        }
        assert_eq!(frequency("A4"), Some(440.0));
        assert_eq!(frequency("Z9"), None);
    }

    #[test]
    fn sample_filenames_fold_sharps() {
        assert_eq!(sample_filename("C#5"), "violin-cs5.wav");
        assert_eq!(sample_filename("G3"), "violin-g3.wav");
    }

    #[test]
    fn doubled_pitches_have_two_positions() {
        assert_eq!(positions_of("D4"), vec![(0, 1), (6, 0)]);
        assert_eq!(positions_of("F#5"), vec![(2, 3)]);
        assert!(positions_of("C3").is_empty());
    }

    #[test]
    fn marker_letters_drop_accidentals_and_octaves() {
        assert_eq!(letter("F#5"), "F");
        assert_eq!(letter("G3"), "G");
    }
}
