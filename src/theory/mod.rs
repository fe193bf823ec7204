//! Musical vocabulary: note names and chord spellings.

pub mod chords;
pub mod notes;

pub use chords::ChordTable;
pub use notes::note_to_midi;
