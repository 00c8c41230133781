//! The blocking sequencer: one event at a time, in notation order.

use crate::ast::Event;
use crate::device::{Clock, ToneDevice};
use crate::error::{Error, Result};
use crate::tempo::TempoState;

/// Slice length for round-robining chord tones, in microseconds.
///
/// Short enough that the alternation blends into one perceived chord, long
/// enough that each tone still speaks on the device.
pub const SWING_MICROS: u64 = 35_000;

/// Plays events on a tone device, blocking for each event's full duration.
pub struct Player<D, C> {
    device: D,
    clock: C,
}

impl<D: ToneDevice, C: Clock> Player<D, C> {
    pub fn new(device: D, clock: C) -> Self {
        Player { device, clock }
    }

    /// Play one event for its full notated duration.
    ///
    /// Tempo changes are applied by the caller and have no device effect
    /// here. A trace of what is being played goes to stdout before the
    /// device is actuated. On any device failure the output is silenced
    /// before the error is returned, so no error path leaves the device
    /// sounding.
    pub fn play(&mut self, event: &Event, tempo: &TempoState) -> Result<()> {
        let played = self.drive(event, tempo);
        if played.is_err() {
            let _ = self.device.silence();
        }
        played
    }

    fn drive(&mut self, event: &Event, tempo: &TempoState) -> Result<()> {
        match event {
            Event::TempoChange { .. } => Ok(()),
            Event::Rest { denominator } => {
                let micros = tempo.duration_micros(*denominator)?;
                println!("rest");
                self.device.silence()?;
                self.clock.sleep_micros(micros);
                Ok(())
            }
            Event::Note { tone, denominator } => {
                let micros = tempo.duration_micros(*denominator)?;
                println!("pitch: {tone}");
                self.device.set_frequency(tone.frequency())?;
                self.clock.sleep_micros(micros);
                self.device.silence()?;
                Ok(())
            }
            Event::Chord { tones, denominator } => {
                if tones.is_empty() {
                    return Err(Error::MalformedLine("chord has no tones".to_string()));
                }
                let total = tempo.duration_micros(*denominator)?;
                let names: Vec<String> = tones.iter().map(|t| t.to_string()).collect();
                println!("chord: {}", names.join(" "));
                // One tone per slice, cycling in notation order.
                for i in 0..total / SWING_MICROS {
                    let tone = &tones[i as usize % tones.len()];
                    self.device.set_frequency(tone.frequency())?;
                    self.clock.sleep_micros(SWING_MICROS);
                    self.device.silence()?;
                }
                Ok(())
            }
        }
    }
}
