//! Error type shared by the generator and the player.
//!
//! Every fallible operation returns `Result<T, ChordsError>`. Nothing is
//! retried: a precondition violation, an unknown chord or a failing
//! model/synthesizer aborts the whole call and no partial result is kept.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordsError {
    /// A user-supplied model path does not exist.
    #[error("model file {} does not exist", .0.display())]
    ModelNotFound(PathBuf),

    /// The seed does not have exactly one chord per slot of the model window.
    ///
    /// ```
    /// # use chords_ai::ChordsError;
    /// let err = ChordsError::SeedLength { expected: 4, actual: 3 };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "seed must contain exactly 4 chords, got 3"
    /// );
    /// ```
    #[error("seed must contain exactly {expected} chords, got {actual}")]
    SeedLength { expected: usize, actual: usize },

    /// A chord missing from the vocabulary or from the components table.
    #[error("unknown chord '{0}'")]
    UnknownChord(String),

    #[error("invalid note '{0}'")]
    InvalidNote(String),

    /// Malformed model artifact or a score vector the model should never
    /// have produced.
    #[error("model error: {0}")]
    Model(String),

    #[error("cannot sample from distribution: {0}")]
    Sampling(String),

    #[error("synthesizer error: {0}")]
    Synth(String),

    #[error("instrument error: {0}")]
    Instrument(String),

    #[error("playback error: {0}")]
    Playback(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid JSON resource: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML resource: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[cfg(feature = "wav")]
    #[error("WAV export failed: {0}")]
    Wav(#[from] hound::Error),
}

pub type Result<T> = std::result::Result<T, ChordsError>;
