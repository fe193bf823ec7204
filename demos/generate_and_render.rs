//! Generate a progression from a seed and bounce it to a WAV file.
//!
//! cargo run --example generate_and_render -- "C Am F G" 8 progression.wav

use std::env;

use chords_ai::{ChordGenerator, ChordPlayer};
use color_eyre::eyre::{eyre, Result, WrapErr};

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = env::args().skip(1);
    let seed = args.next().unwrap_or_else(|| "C Am F G".to_string());
    let count: usize = match args.next() {
        Some(count) => count.parse().wrap_err("count must be a number")?,
        None => 8,
    };
    let out = args.next().unwrap_or_else(|| "progression.wav".to_string());

    let generator = ChordGenerator::bundled()?;
    tracing::info!(model = %generator.model_summary(), "loaded generator");

    let progression = generator.generate(&seed, count)?;
    if progression.is_empty() {
        return Err(eyre!("nothing generated"));
    }
    println!("{seed} | {progression}");

    let mut player = ChordPlayer::bundled()?;
    let waveform = player.render(&format!("{seed} {progression}"), None)?;
    waveform
        .write_wav(&out)
        .wrap_err_with(|| format!("writing {out}"))?;

    tracing::info!(path = %out, duration = ?waveform.duration(), "done");
    Ok(())
}
