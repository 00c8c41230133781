//! Line parser for the notation language.
//!
//! Each non-blank, comment-stripped line is a whitespace-delimited record:
//! `BPM <n>` changes tempo, `R <n>` rests, and one or more tone tokens
//! followed by a trailing duration denominator play a note or chord.
//! Parsing is pure; the runner owns all state.

use crate::ast::{Event, Tone};
use crate::error::{Error, Result};

/// Upper bound on the number of tones in one chord.
pub const MAX_CHORD_TONES: usize = 16;

/// Parse one trimmed, comment-stripped, non-empty notation line.
pub fn parse_line(line: &str) -> Result<Event> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Err(Error::MalformedLine("empty line".to_string())),
        ["BPM", args @ ..] => parse_tempo_change(args),
        ["R", args @ ..] => parse_rest(args),
        [tone_tokens @ .., duration] => parse_note_or_chord(tone_tokens, duration),
    }
}

fn parse_tempo_change(args: &[&str]) -> Result<Event> {
    let [value] = args else {
        return Err(Error::MalformedLine(
            "BPM takes exactly one value".to_string(),
        ));
    };
    Ok(Event::TempoChange {
        bpm: parse_positive(value, "BPM")?,
    })
}

fn parse_rest(args: &[&str]) -> Result<Event> {
    let [value] = args else {
        return Err(Error::MalformedLine(
            "R takes exactly one duration".to_string(),
        ));
    };
    Ok(Event::Rest {
        denominator: parse_positive(value, "duration")?,
    })
}

fn parse_note_or_chord(tone_tokens: &[&str], duration: &str) -> Result<Event> {
    let denominator = parse_positive(duration, "duration")?;
    if tone_tokens.is_empty() {
        return Err(Error::MalformedLine(
            "expected at least one tone before the duration".to_string(),
        ));
    }
    if tone_tokens.len() > MAX_CHORD_TONES {
        return Err(Error::TooManyTones {
            count: tone_tokens.len(),
            limit: MAX_CHORD_TONES,
        });
    }

    let mut tones = Vec::with_capacity(tone_tokens.len());
    for &token in tone_tokens {
        if !token.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(Error::MalformedLine(format!("unexpected token '{token}'")));
        }
        tones.push(token.parse::<Tone>()?);
    }

    match tones.as_slice() {
        [tone] => Ok(Event::Note {
            tone: *tone,
            denominator,
        }),
        _ => Ok(Event::Chord { tones, denominator }),
    }
}

fn parse_positive(token: &str, what: &str) -> Result<u32> {
    let value = token
        .parse::<u32>()
        .map_err(|_| Error::MalformedLine(format!("'{token}' is not a valid {what}")))?;
    if value == 0 {
        return Err(Error::InvalidDuration(format!("{what} must be positive")));
    }
    Ok(value)
}
