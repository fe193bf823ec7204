//! Chord sequence generation.
//!
//! A `ChordGenerator` owns a model, the vocabulary the model was trained on
//! and the model's window length. Generation is a plain sampling loop: score
//! the trailing window, draw one chord from the distribution, append, repeat.

pub mod model;
pub mod sampling;
pub mod vocabulary;

use std::{collections::HashMap, path::Path};

use rand::Rng;

use crate::{
    config::GeneratorConfig,
    error::{ChordsError, Result},
};

pub use model::{ChordModel, ModelSummary, TransitionModel};
pub use sampling::sample_categorical;
pub use vocabulary::Vocabulary;

pub struct ChordGenerator<M: ChordModel = TransitionModel> {
    model: M,
    vocabulary: Vocabulary,
    window_length: usize,
}

impl ChordGenerator<TransitionModel> {
    /// Bundled model and vocabulary.
    pub fn bundled() -> Result<Self> {
        Self::new(TransitionModel::bundled()?, Vocabulary::bundled()?)
    }

    /// Load a user-supplied model, or the bundled one when `model_path` is
    /// `None`, paired with the bundled vocabulary.
    pub fn load(model_path: Option<&Path>) -> Result<Self> {
        Self::from_config(&GeneratorConfig {
            model: model_path.map(Path::to_path_buf),
            vocabulary: None,
        })
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        let model = match &config.model {
            Some(path) if !path.exists() => return Err(ChordsError::ModelNotFound(path.clone())),
            Some(path) => TransitionModel::load(path)?,
            None => TransitionModel::bundled()?,
        };
        let vocabulary = match &config.vocabulary {
            Some(path) => Vocabulary::load(path)?,
            None => Vocabulary::bundled()?,
        };
        Self::new(model, vocabulary)
    }
}

impl<M: ChordModel> ChordGenerator<M> {
    pub fn new(model: M, vocabulary: Vocabulary) -> Result<Self> {
        let window_length = model.window_length();
        if window_length == 0 {
            return Err(ChordsError::Model("window length must be positive".to_string()));
        }
        if model.vocabulary_size() != vocabulary.len() {
            return Err(ChordsError::Model(format!(
                "model predicts {} chords but the vocabulary has {}",
                model.vocabulary_size(),
                vocabulary.len()
            )));
        }

        tracing::debug!(window_length, vocabulary = vocabulary.len(), "chord generator ready");
        Ok(Self {
            model,
            vocabulary,
            window_length,
        })
    }

    /// Continue `seed` by `count` chords using the thread RNG.
    ///
    /// `seed` must hold exactly `length_of_sequences()` whitespace-separated
    /// chords. Returns only the generated chords, space-joined.
    pub fn generate(&self, seed: &str, count: usize) -> Result<String> {
        self.generate_with_rng(seed, count, &mut rand::rng())
    }

    /// `generate` with a caller-supplied RNG, for reproducible sequences.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        seed: &str,
        count: usize,
        rng: &mut R,
    ) -> Result<String> {
        let tokens: Vec<&str> = seed.split_whitespace().collect();
        if tokens.len() != self.window_length {
            return Err(ChordsError::SeedLength {
                expected: self.window_length,
                actual: tokens.len(),
            });
        }

        let mut sequence = tokens
            .iter()
            .map(|chord| self.vocabulary.encode(chord))
            .collect::<Result<Vec<usize>>>()?;
        sequence.reserve(count);

        for _ in 0..count {
            let window = &sequence[sequence.len() - self.window_length..];
            let probabilities = self.model.score(window)?;
            if probabilities.len() != self.vocabulary.len() {
                return Err(ChordsError::Model(format!(
                    "score has {} entries, vocabulary has {}",
                    probabilities.len(),
                    self.vocabulary.len()
                )));
            }

            let next = sample_categorical(&probabilities, rng)?;
            tracing::trace!(chord = ?self.vocabulary.decode(next), "sampled");
            sequence.push(next);
        }

        let generated = sequence[self.window_length..]
            .iter()
            .map(|&index| {
                self.vocabulary
                    .decode(index)
                    .ok_or_else(|| ChordsError::Model(format!("index {index} outside vocabulary")))
            })
            .collect::<Result<Vec<&str>>>()?;

        Ok(generated.join(" "))
    }

    pub fn vocabulary(&self) -> &[String] {
        self.vocabulary.chords()
    }

    pub fn mapping(&self) -> &HashMap<String, usize> {
        self.vocabulary.mapping()
    }

    pub fn inverse_mapping(&self) -> &[String] {
        self.vocabulary.inverse_mapping()
    }

    /// Number of chords the model conditions on, and the required seed length.
    pub fn length_of_sequences(&self) -> usize {
        self.window_length
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_summary(&self) -> ModelSummary {
        self.model.summary()
    }
}
