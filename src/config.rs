//! Generator and player settings.
//!
//! Both structs deserialize from YAML with every field optional; a missing
//! resource path means the resource bundled with the crate.
//!
//! ```yaml
//! sample_rate: 48000
//! octave: 3
//! instrument: sounds/GrandPiano.sf2
//! ```

use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Transition model JSON; must exist when set.
    pub model: Option<PathBuf>,
    /// JSON array of chord names.
    pub vocabulary: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub sample_rate: u32,
    /// Octave bare note names are placed in; 4 puts "C" on middle C.
    pub octave: i8,
    pub velocity: u8,
    /// Lower bound on the voice pool; wider chords get one voice per note.
    pub max_voices: usize,
    /// Chord components YAML.
    pub chords: Option<PathBuf>,
    /// Default instrument for `render` calls that do not pass one.
    pub instrument: Option<PathBuf>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            octave: 4,
            velocity: 60,
            max_voices: 8,
            chords: None,
            instrument: None,
        }
    }
}

macro_rules! yaml_loaders {
    ($($config:ty),*) => {$(
        impl $config {
            pub fn from_yaml_str(source: &str) -> Result<Self> {
                Ok(serde_yaml::from_str(source)?)
            }

            pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
                Self::from_yaml_str(&fs::read_to_string(path)?)
            }
        }
    )*};
}

yaml_loaders!(GeneratorConfig, PlayerConfig);
