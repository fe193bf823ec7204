//! Signal primitives behind every patch voice.
//!
//! Each one renders into a caller-owned block and allocates nothing after
//! construction. Note handling and mixing live one layer up, in `graph`.

pub mod envelope;
/// Lowpass, highpass, bandpass and notch responses from one SVF core.
pub mod filter;
pub mod oscillator;

pub use envelope::EnvelopeState;
