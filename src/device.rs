//! Tone device abstraction and the cpal-backed square wave output.
//!
//! The sequencer only needs a single-voice tone generator (`set_frequency` /
//! `silence`) and a blocking sleep. Both are traits so playback can be tested
//! against recording mocks; [`SquareWave`] is the real device, a square wave
//! on the default audio output.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("failed to get default output config: {0}")]
    StreamConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("unsupported sample format {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

/// A single-voice tone generator: one frequency at a time, or silence.
pub trait ToneDevice {
    fn set_frequency(&mut self, hz: f64) -> Result<(), DeviceError>;
    fn silence(&mut self) -> Result<(), DeviceError>;
}

/// Monotonic blocking sleep, injectable so playback timing is assertable.
pub trait Clock {
    fn sleep_micros(&mut self, micros: u64);
}

/// Wall-clock [`Clock`] backed by `std::thread::sleep`.
pub struct StdClock;

impl Clock for StdClock {
    fn sleep_micros(&mut self, micros: u64) {
        thread::sleep(Duration::from_micros(micros));
    }
}

/// Peak level of the generated wave (full scale is +/-1.0).
const AMPLITUDE: f32 = 0.25;

/// Square wave generator on the default audio output.
///
/// The playback thread publishes the requested frequency through an atomic
/// (f32 bits, zero meaning silence); the audio callback reads it each buffer
/// and advances a phase accumulator. No locks touch the audio path.
pub struct SquareWave {
    frequency_bits: Arc<AtomicU32>,
    _stream: cpal::Stream,
}

impl SquareWave {
    /// Open the default output device and start a silent stream.
    pub fn open() -> Result<Self, DeviceError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(DeviceError::NoOutputDevice)?;
        let supported = device.default_output_config()?;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.into();

        let frequency_bits = Arc::new(AtomicU32::new(0.0_f32.to_bits()));
        let shared = Arc::clone(&frequency_bits);

        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, shared)?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, shared)?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, shared)?,
            other => return Err(DeviceError::UnsupportedSampleFormat(other)),
        };
        stream.play()?;

        Ok(SquareWave {
            frequency_bits,
            _stream: stream,
        })
    }
}

impl ToneDevice for SquareWave {
    fn set_frequency(&mut self, hz: f64) -> Result<(), DeviceError> {
        self.frequency_bits
            .store((hz as f32).to_bits(), Ordering::Relaxed);
        Ok(())
    }

    fn silence(&mut self) -> Result<(), DeviceError> {
        self.frequency_bits.store(0.0_f32.to_bits(), Ordering::Relaxed);
        Ok(())
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    shared: Arc<AtomicU32>,
) -> Result<cpal::Stream, DeviceError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let sample_rate = config.sample_rate.0 as f32;
    let channels = config.channels as usize;
    let mut phase = 0.0_f32;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let hz = f32::from_bits(shared.load(Ordering::Relaxed));
            for frame in data.chunks_mut(channels) {
                let value = if hz > 0.0 {
                    phase = (phase + hz / sample_rate).fract();
                    if phase < 0.5 {
                        AMPLITUDE
                    } else {
                        -AMPLITUDE
                    }
                } else {
                    phase = 0.0;
                    0.0
                };
                frame.fill(T::from_sample(value));
            }
        },
        |err| eprintln!("audio stream error: {err}"),
        None,
    )?;
    Ok(stream)
}
