use crate::error::{ChordsError, Result};

/*
Note Names to MIDI Numbers
==========================

Middle C (C4) = MIDI note 60.

    note_number = 12 * (octave + 1) + semitone

where semitone: C=0, D=2, E=4, F=5, G=7, A=9, B=11, shifted by each
accidental ('#'/'♯' up, 'b'/'♭' down).

Chord tables list bare note names ("C", "Eb", "F#"); those take the
reference octave passed by the caller. A name that carries its own octave
("Bb3") keeps it.
*/

/// MIDI number of middle C.
pub const MIDDLE_C: u8 = 60;

fn semitone(letter: char) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Parse a note name into a MIDI number, placing bare names in
/// `default_octave`.
///
/// ```
/// use chords_ai::theory::note_to_midi;
///
/// assert_eq!(note_to_midi("C", 4).unwrap(), 60);
/// assert_eq!(note_to_midi("Bb", 4).unwrap(), 70);
/// assert_eq!(note_to_midi("F#2", 4).unwrap(), 42);
/// ```
pub fn note_to_midi(name: &str, default_octave: i8) -> Result<u8> {
    let invalid = || ChordsError::InvalidNote(name.to_string());

    let mut chars = name.trim().chars().peekable();
    let letter = chars.next().ok_or_else(invalid)?;
    let mut value = semitone(letter).ok_or_else(invalid)?;

    while let Some(&c) = chars.peek() {
        match c {
            '#' | '♯' => value += 1,
            'b' | '♭' => value -= 1,
            _ => break,
        }
        chars.next();
    }

    let rest: String = chars.collect();
    let octave = if rest.is_empty() {
        default_octave as i32
    } else {
        rest.parse::<i32>().map_err(|_| invalid())?
    };

    let midi = octave
        .checked_add(1)
        .and_then(|o| o.checked_mul(12))
        .and_then(|base| base.checked_add(value))
        .ok_or_else(invalid)?;
    u8::try_from(midi)
        .ok()
        .filter(|n| *n <= 127)
        .ok_or_else(invalid)
}
