// Purpose: voice management, polyphony, and the synthesizer seam the chord
// player renders through

pub mod factory;
pub mod instrument;
pub mod message;
pub mod offline;
pub mod poly;
pub mod voice;

pub use factory::VoiceFactory;
pub use instrument::Instrument;
pub use message::SynthMessage;
pub use offline::{OfflineSynth, Synthesizer};
pub use poly::PolySynth;
