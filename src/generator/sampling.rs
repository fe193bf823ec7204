use rand::{
    distr::{weighted::WeightedIndex, Distribution},
    Rng,
};

use crate::error::{ChordsError, Result};

/// Draw one index from a categorical distribution.
///
/// Weights need not sum to one. Zero weights are never drawn; negative,
/// non-finite or all-zero weights are an error.
pub fn sample_categorical<R: Rng + ?Sized>(probabilities: &[f32], rng: &mut R) -> Result<usize> {
    if let Some(bad) = probabilities.iter().find(|p| !p.is_finite()) {
        return Err(ChordsError::Sampling(format!("non-finite probability {bad}")));
    }

    let distribution =
        WeightedIndex::new(probabilities).map_err(|e| ChordsError::Sampling(e.to_string()))?;
    Ok(distribution.sample(rng))
}
