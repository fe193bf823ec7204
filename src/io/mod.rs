// Purpose - format conversions between pitches, frequencies and PCM

pub mod converter;
