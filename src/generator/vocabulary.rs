use std::{collections::HashMap, fs, path::Path};

use crate::{
    error::{ChordsError, Result},
    resources,
};

/// Chord names with a fixed index assignment.
///
/// Names are sorted lexicographically and deduplicated on construction so the
/// same resource always yields the same indices, whatever its order on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    chords: Vec<String>,
    mapping: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn new<I, S>(chords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut chords: Vec<String> = chords.into_iter().map(Into::into).collect();
        chords.sort();
        chords.dedup();

        let mapping = chords
            .iter()
            .enumerate()
            .map(|(idx, chord)| (chord.clone(), idx))
            .collect();

        Self { chords, mapping }
    }

    /// Parse a JSON array of chord names.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let chords: Vec<String> = serde_json::from_str(source)?;
        let vocabulary = Self::new(chords);
        tracing::debug!(size = vocabulary.len(), "loaded vocabulary");
        Ok(vocabulary)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json_str(resources::VOCABULARY)
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn contains(&self, chord: &str) -> bool {
        self.mapping.contains_key(chord)
    }

    /// All chords in index order.
    pub fn chords(&self) -> &[String] {
        &self.chords
    }

    /// Chord → index.
    pub fn mapping(&self) -> &HashMap<String, usize> {
        &self.mapping
    }

    /// Index → chord; position `i` holds the chord with index `i`.
    pub fn inverse_mapping(&self) -> &[String] {
        &self.chords
    }

    pub fn encode(&self, chord: &str) -> Result<usize> {
        self.mapping
            .get(chord)
            .copied()
            .ok_or_else(|| ChordsError::UnknownChord(chord.to_string()))
    }

    pub fn decode(&self, index: usize) -> Option<&str> {
        self.chords.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_sorted_order() {
        let vocabulary = Vocabulary::new(["G", "Am", "C", "F"]);
        assert_eq!(vocabulary.chords(), ["Am", "C", "F", "G"]);
        assert_eq!(vocabulary.encode("Am").unwrap(), 0);
        assert_eq!(vocabulary.encode("G").unwrap(), 3);
    }

    #[test]
    fn duplicates_collapse() {
        let vocabulary = Vocabulary::from_json_str(r#"["C", "G", "C"]"#).unwrap();
        assert_eq!(vocabulary.len(), 2);
    }

    #[test]
    fn mapping_round_trips() {
        let vocabulary = Vocabulary::bundled().unwrap();
        for chord in vocabulary.chords() {
            let index = vocabulary.mapping()[chord];
            assert_eq!(&vocabulary.inverse_mapping()[index], chord);
            assert_eq!(vocabulary.decode(index), Some(chord.as_str()));
        }
    }

    #[test]
    fn unknown_chord_does_not_encode() {
        let vocabulary = Vocabulary::new(["C"]);
        assert!(matches!(
            vocabulary.encode("H7"),
            Err(ChordsError::UnknownChord(name)) if name == "H7"
        ));
        assert_eq!(vocabulary.decode(1), None);
    }
}
