use std::{collections::HashMap, fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ChordsError, Result},
    resources,
};

/// A trained next-chord predictor.
///
/// `score` maps a window of `window_length()` encoded chords, oldest first,
/// to one probability per vocabulary entry. Implementations are stateless
/// between calls.
pub trait ChordModel {
    fn window_length(&self) -> usize;

    fn vocabulary_size(&self) -> usize;

    fn score(&self, window: &[usize]) -> Result<Vec<f32>>;

    fn summary(&self) -> ModelSummary {
        ModelSummary {
            kind: std::any::type_name::<Self>()
                .rsplit("::")
                .next()
                .unwrap_or("model")
                .to_string(),
            name: String::new(),
            window_length: self.window_length(),
            vocabulary_size: self.vocabulary_size(),
            parameters: 0,
        }
    }
}

/// Shape of a model, as printed by `ChordGenerator::model_summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub kind: String,
    pub name: String,
    pub window_length: usize,
    pub vocabulary_size: usize,
    pub parameters: usize,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: \"{}\" ({})", self.name, self.kind)?;
        writeln!(f, "  input shape:      (None, {})", self.window_length)?;
        writeln!(f, "  output shape:     (None, {})", self.vocabulary_size)?;
        write!(f, "  parameters:       {}", self.parameters)
    }
}

/// On-disk layout of a transition model.
#[derive(Debug, Deserialize)]
struct TransitionModelFile {
    #[serde(default)]
    name: String,
    /// Keras-style declared input shape, `[null, window_length]`.
    input_shape: Vec<Option<usize>>,
    vocabulary_size: usize,
    prior: Vec<f32>,
    /// Distributions keyed by a space-joined suffix of the encoded window.
    #[serde(default)]
    contexts: HashMap<String, Vec<f32>>,
}

/// Context-conditioned chord distributions with suffix backoff.
///
/// Scoring looks up the longest stored suffix of the window, down to the
/// last chord alone, and falls back to the prior when no suffix is stored.
#[derive(Debug, Clone)]
pub struct TransitionModel {
    name: String,
    window_length: usize,
    prior: Vec<f32>,
    contexts: HashMap<Vec<usize>, Vec<f32>>,
    longest_context: usize,
}

impl TransitionModel {
    pub fn from_json_str(source: &str) -> Result<Self> {
        let file: TransitionModelFile = serde_json::from_str(source)?;
        let model = Self::from_file(file)?;
        tracing::debug!(
            name = %model.name,
            window_length = model.window_length,
            vocabulary_size = model.prior.len(),
            contexts = model.contexts.len(),
            "loaded transition model"
        );
        Ok(model)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json_str(resources::CHORD_MODEL)
    }

    fn from_file(file: TransitionModelFile) -> Result<Self> {
        let window_length = match file.input_shape.as_slice() {
            [_, Some(length)] if *length > 0 => *length,
            other => {
                return Err(ChordsError::Model(format!(
                    "input_shape must be [null, window_length], got {other:?}"
                )))
            }
        };

        let size = file.vocabulary_size;
        if file.prior.len() != size {
            return Err(ChordsError::Model(format!(
                "prior has {} entries, vocabulary has {size}",
                file.prior.len()
            )));
        }

        let mut contexts = HashMap::with_capacity(file.contexts.len());
        let mut longest_context = 0;
        for (key, distribution) in file.contexts {
            let context = key
                .split_whitespace()
                .map(|token| token.parse::<usize>().ok().filter(|idx| *idx < size))
                .collect::<Option<Vec<usize>>>()
                .filter(|ctx| !ctx.is_empty() && ctx.len() <= window_length)
                .ok_or_else(|| ChordsError::Model(format!("invalid context key '{key}'")))?;

            if distribution.len() != size {
                return Err(ChordsError::Model(format!(
                    "context '{key}' has {} entries, vocabulary has {size}",
                    distribution.len()
                )));
            }

            longest_context = longest_context.max(context.len());
            contexts.insert(context, distribution);
        }

        Ok(Self {
            name: file.name,
            window_length,
            prior: file.prior,
            contexts,
            longest_context,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ChordModel for TransitionModel {
    fn window_length(&self) -> usize {
        self.window_length
    }

    fn vocabulary_size(&self) -> usize {
        self.prior.len()
    }

    fn score(&self, window: &[usize]) -> Result<Vec<f32>> {
        if window.len() != self.window_length {
            return Err(ChordsError::Model(format!(
                "expected a window of {} chords, got {}",
                self.window_length,
                window.len()
            )));
        }

        for length in (1..=self.longest_context).rev() {
            let suffix = &window[window.len() - length..];
            if let Some(distribution) = self.contexts.get(suffix) {
                return Ok(distribution.clone());
            }
        }
        Ok(self.prior.clone())
    }

    fn summary(&self) -> ModelSummary {
        ModelSummary {
            kind: "TransitionModel".to_string(),
            name: self.name.clone(),
            window_length: self.window_length,
            vocabulary_size: self.prior.len(),
            parameters: self.prior.len() * (self.contexts.len() + 1),
        }
    }
}
