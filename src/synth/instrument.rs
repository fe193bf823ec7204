use std::{fmt, fs, path::Path};

#[cfg(feature = "soundfont")]
use std::sync::Arc;

use crate::{
    error::{ChordsError, Result},
    patch::Patch,
    resources,
};

/// Timbre used to render chords.
#[derive(Clone)]
pub enum Instrument {
    /// A synthesized patch rendered by the crate's own voices.
    Patch(Patch),
    /// A General MIDI SoundFont, preset 0 of bank 0.
    #[cfg(feature = "soundfont")]
    SoundFont(Arc<rustysynth::SoundFont>),
}

impl Instrument {
    /// The bundled piano patch.
    pub fn bundled() -> Result<Self> {
        Ok(Self::Patch(Patch::from_yaml_str(resources::PIANO_PATCH)?))
    }

    /// Load an instrument resource, picking the format by extension:
    /// `.yml`/`.yaml`/`.json` patches, `.sf2` SoundFonts.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let instrument = match extension.as_str() {
            "yml" | "yaml" => Self::Patch(Patch::from_yaml_str(&fs::read_to_string(path)?)?),
            "json" => Self::Patch(Patch::from_json_str(&fs::read_to_string(path)?)?),
            #[cfg(feature = "soundfont")]
            "sf2" => {
                let mut file = fs::File::open(path)?;
                let sound_font = rustysynth::SoundFont::new(&mut file).map_err(|e| {
                    ChordsError::Instrument(format!("{}: {e:?}", path.display()))
                })?;
                Self::SoundFont(Arc::new(sound_font))
            }
            _ => {
                return Err(ChordsError::Instrument(format!(
                    "unsupported instrument format: {}",
                    path.display()
                )))
            }
        };

        tracing::debug!(path = %path.display(), instrument = ?instrument, "loaded instrument");
        Ok(instrument)
    }
}

impl From<Patch> for Instrument {
    fn from(patch: Patch) -> Self {
        Self::Patch(patch)
    }
}

impl fmt::Debug for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patch(patch) => f.debug_tuple("Patch").field(&patch.name).finish(),
            #[cfg(feature = "soundfont")]
            Self::SoundFont(_) => f.write_str("SoundFont"),
        }
    }
}
