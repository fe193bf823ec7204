use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::{
    error::{ChordsError, Result},
    resources,
    theory::notes::note_to_midi,
};

/// Chord name → ordered component notes, read once from YAML.
///
/// ```yaml
/// C: [C, E, G]
/// Am: [A, C, E]
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ChordTable {
    components: HashMap<String, Vec<String>>,
}

impl ChordTable {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let table: Self = serde_yaml::from_str(source)?;
        tracing::debug!(chords = table.len(), "loaded chord components");
        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_yaml_str(&fs::read_to_string(path)?)
    }

    /// The table shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_yaml_str(resources::CHORD_COMPONENTS)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn contains(&self, chord: &str) -> bool {
        self.components.contains_key(chord)
    }

    pub fn components(&self, chord: &str) -> Result<&[String]> {
        self.components
            .get(chord)
            .map(Vec::as_slice)
            .ok_or_else(|| ChordsError::UnknownChord(chord.to_string()))
    }

    /// MIDI pitches of `chord` with bare note names placed in `octave`.
    pub fn pitches(&self, chord: &str, octave: i8) -> Result<Vec<u8>> {
        self.components(chord)?
            .iter()
            .map(|note| note_to_midi(note, octave))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "C: [C, E, G]\nDm7: [D, F, A, C5]\nBroken: [C, Q]\n";

    #[test]
    fn resolves_pitches_at_reference_octave() {
        let table = ChordTable::from_yaml_str(TABLE).unwrap();
        assert_eq!(table.pitches("C", 4).unwrap(), vec![60, 64, 67]);
        assert_eq!(table.pitches("C", 3).unwrap(), vec![48, 52, 55]);
    }

    #[test]
    fn explicit_octaves_are_kept() {
        let table = ChordTable::from_yaml_str(TABLE).unwrap();
        assert_eq!(table.pitches("Dm7", 4).unwrap(), vec![62, 65, 69, 72]);
    }

    #[test]
    fn unknown_chord_is_a_lookup_error() {
        let table = ChordTable::from_yaml_str(TABLE).unwrap();
        let err = table.pitches("Xmaj13", 4).unwrap_err();
        assert!(matches!(err, ChordsError::UnknownChord(name) if name == "Xmaj13"));
    }

    #[test]
    fn bad_note_in_table_surfaces() {
        let table = ChordTable::from_yaml_str(TABLE).unwrap();
        assert!(matches!(
            table.pitches("Broken", 4),
            Err(ChordsError::InvalidNote(_))
        ));
    }

    #[test]
    fn bundled_table_parses() {
        let table = ChordTable::bundled().unwrap();
        assert!(!table.is_empty());
        for chord in ["C", "Am", "G7"] {
            assert!(table.pitches(chord, 4).is_ok(), "{chord} missing");
        }
    }
}
