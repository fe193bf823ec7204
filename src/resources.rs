//! Resources bundled into the library.
//!
//! Loaders fall back to these when no path is configured, so the default
//! generator and player work without any files on disk.

/// Sorted-at-load chord vocabulary, a JSON array of chord names.
pub const VOCABULARY: &str = include_str!("../data/vocabulary.json");

/// Default chord transition model.
pub const CHORD_MODEL: &str = include_str!("../data/chord_model.json");

/// Chord name → component notes.
pub const CHORD_COMPONENTS: &str = include_str!("../data/chord_components.yml");

/// Default instrument patch.
pub const PIANO_PATCH: &str = include_str!("../data/piano.yml");
