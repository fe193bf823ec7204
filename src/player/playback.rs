use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::{
    error::{ChordsError, Result},
    player::waveform::Waveform,
};

fn playback_error(err: impl std::fmt::Display) -> ChordsError {
    ChordsError::Playback(err.to_string())
}

/// Linear-interpolation resample to the device rate.
fn resample(samples: &[f32], from: u32, to: u32) -> Vec<f32> {
    if from == to || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = from as f64 / to as f64;
    let frames = (samples.len() as u64 * to as u64 / from as u64) as usize;
    (0..frames)
        .map(|i| {
            let position = i as f64 * ratio;
            let index = position as usize;
            let frac = (position - index as f64) as f32;
            let a = samples[index.min(samples.len() - 1)];
            let b = samples.get(index + 1).copied().unwrap_or(a);
            a + (b - a) * frac
        })
        .collect()
}

/// Play a waveform on the default output device, blocking until it ends.
pub fn play(waveform: &Waveform) -> Result<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| ChordsError::Playback("no default output device available".to_string()))?;
    let config = device.default_output_config().map_err(playback_error)?;

    let device_rate = config.sample_rate().0;
    let channels = config.channels() as usize;
    let samples = resample(waveform.samples(), waveform.sample_rate(), device_rate);

    tracing::info!(
        device_rate,
        channels,
        duration = ?waveform.duration(),
        "starting playback"
    );

    let finished = Arc::new(AtomicBool::new(false));
    let failure = Arc::new(Mutex::new(None::<String>));
    let done = finished.clone();
    let mut position = 0usize;

    let stream = device
        .build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                for frame in data.chunks_mut(channels) {
                    let sample = samples.get(position).copied().unwrap_or(0.0);
                    frame.fill(sample);
                    position += 1;
                }
                if position >= samples.len() {
                    done.store(true, Ordering::Release);
                }
            },
            stream_error_handler(finished.clone(), failure.clone()),
            None,
        )
        .map_err(playback_error)?;

    stream.play().map_err(playback_error)?;

    while !finished.load(Ordering::Acquire) {
        std::thread::sleep(Duration::from_millis(20));
    }
    if let Some(err) = take_failure(&failure) {
        return Err(ChordsError::Playback(err));
    }
    // Let the device drain its last buffer
    std::thread::sleep(Duration::from_millis(100));
    Ok(())
}

/// Stream error callback: record the first error and stop waiting.
fn stream_error_handler<E: std::fmt::Display + 'static>(
    finished: Arc<AtomicBool>,
    failure: Arc<Mutex<Option<String>>>,
) -> impl FnMut(E) + Send + 'static {
    move |err| {
        tracing::error!(%err, "audio stream error");
        if let Ok(mut slot) = failure.lock() {
            slot.get_or_insert_with(|| err.to_string());
        }
        finished.store(true, Ordering::Release);
    }
}

fn take_failure(failure: &Mutex<Option<String>>) -> Option<String> {
    match failure.lock() {
        Ok(mut slot) => slot.take(),
        Err(_) => Some("audio stream error handler panicked".to_string()),
    }
}
