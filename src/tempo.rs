//! Tempo state and duration arithmetic.

use crate::error::{Error, Result};

/// Tempo used until the notation's first `BPM` line.
pub const DEFAULT_BPM: u32 = 120;

/// Current tempo in beats per minute.
///
/// Owned by the line runner and passed explicitly to every duration
/// computation; `BPM` lines mutate it in place. No history is kept.
#[derive(Debug, Clone)]
pub struct TempoState {
    bpm: u32,
}

impl Default for TempoState {
    fn default() -> Self {
        TempoState { bpm: DEFAULT_BPM }
    }
}

impl TempoState {
    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    pub fn set_bpm(&mut self, bpm: u32) {
        self.bpm = bpm;
    }

    /// Playback time in microseconds for a note of the given duration
    /// denominator (4 = quarter note, 2 = half, 8 = eighth).
    ///
    /// `4_000_000 / denominator` is how long the note lasts when a whole note
    /// is four beats at 60 BPM; `60 / bpm` rescales to the actual tempo. The
    /// whole expression is evaluated in floating point and rounded once at
    /// the end, so rounding error does not compound across the divisions.
    pub fn duration_micros(&self, denominator: u32) -> Result<u64> {
        if denominator == 0 {
            return Err(Error::InvalidDuration(
                "duration denominator must be positive".to_string(),
            ));
        }
        if self.bpm == 0 {
            return Err(Error::InvalidDuration("BPM must be positive".to_string()));
        }
        let micros = 4_000_000.0 / denominator as f64 * 60.0 / self.bpm as f64;
        Ok(micros.round() as u64)
    }
}
