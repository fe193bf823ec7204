//! Chord progression generation and rendering.
//!
//! [`ChordGenerator`] continues a seed progression by sampling from a chord
//! transition model. [`ChordPlayer`] turns a progression into mono audio, one
//! second per chord, through a [`Synthesizer`].
//!
//! ```no_run
//! use chords_ai::{ChordGenerator, ChordPlayer};
//!
//! # fn main() -> chords_ai::Result<()> {
//! let generator = ChordGenerator::bundled()?;
//! let progression = generator.generate("C Am F G", 8)?;
//!
//! let mut player = ChordPlayer::bundled()?;
//! let waveform = player.render(&progression, None)?;
//! assert_eq!(waveform.len(), 8 * 44_100);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dsp;
pub mod error;
pub mod generator; // Vocabulary, model and sampling loop
pub mod graph; // Composable audio graph nodes
pub mod io;
pub mod patch; // Serializable instrument definitions
pub mod player;
pub mod resources;
pub mod synth; // Voice management and polyphony
pub mod theory; // Note names and chord components

pub use config::{GeneratorConfig, PlayerConfig};
pub use error::{ChordsError, Result};
pub use generator::{ChordGenerator, ChordModel, TransitionModel, Vocabulary};
pub use patch::Patch;
pub use player::{ChordPlayer, Waveform};
pub use synth::{Instrument, OfflineSynth, Synthesizer};
pub use theory::ChordTable;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
