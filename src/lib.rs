pub mod ast;
pub mod device;
pub mod error;
pub mod parser;
pub mod playback;
pub mod tempo;

pub use ast::{Accidental, Event, Letter, Tone};
pub use device::{Clock, DeviceError, SquareWave, StdClock, ToneDevice};
pub use error::{Error, Result};
pub use parser::{parse_line, MAX_CHORD_TONES};
pub use playback::{Player, SWING_MICROS};
pub use tempo::{TempoState, DEFAULT_BPM};

/// Everything after this marker on a line is a comment.
pub const COMMENT_MARKER: char = '%';

/// Play a whole notation source on the given player.
/// This is the main entry point for the library.
///
/// Lines are processed strictly in file order; a `BPM` line retargets the
/// tempo for every later line. The first parse or device error stops the run,
/// wrapped with its 1-based line number.
pub fn play_source<D: ToneDevice, C: Clock>(
    source: &str,
    player: &mut Player<D, C>,
) -> Result<()> {
    let mut tempo = TempoState::default();
    for (number, raw) in source.lines().enumerate() {
        let Some(line) = strip_line(raw) else {
            continue;
        };
        let line_number = number + 1;
        let event = parse_line(&line).map_err(|e| e.at_line(line_number))?;
        match event {
            Event::TempoChange { bpm } => tempo.set_bpm(bpm),
            event => player
                .play(&event, &tempo)
                .map_err(|e| e.at_line(line_number))?,
        }
    }
    Ok(())
}

/// Parse a whole notation source without touching any device.
///
/// Useful for validating a file before playing it; the CLI's `--check` mode
/// dumps the result.
pub fn check_source(source: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (number, raw) in source.lines().enumerate() {
        let Some(line) = strip_line(raw) else {
            continue;
        };
        events.push(parse_line(&line).map_err(|e| e.at_line(number + 1))?);
    }
    Ok(events)
}

/// Cut the comment part of a line and normalize delimiter noise.
/// Returns `None` when nothing playable is left.
fn strip_line(raw: &str) -> Option<String> {
    let content = match raw.find(COMMENT_MARKER) {
        Some(at) => &raw[..at],
        None => raw,
    };
    let cleaned = content.replace([';', '\r'], " ");
    let trimmed = cleaned.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
