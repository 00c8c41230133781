//! Tone and event definitions for the notation language.
//!
//! A [`Tone`] is a notated pitch (letter + octave digit + optional
//! accidental); an [`Event`] is one parsed notation line. Pitch math lives
//! here: semitone numbering follows the MIDI convention (C4 = 60, A4 = 69)
//! and frequencies come from 12-tone equal temperament around A440.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// Pitch letters of the diatonic scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Semitone offset above C within one octave (12-TET chromatic scale).
    pub fn semitone(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    fn from_char(c: char) -> Option<Letter> {
        match c {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

/// Pitch modifier: one semitone up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Sharp,
    Flat,
}

/// A notated pitch, e.g. `A4`, `C5#`, `B3b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tone {
    pub letter: Letter,
    pub octave: u8,
    pub accidental: Option<Accidental>,
}

impl Tone {
    /// Absolute semitone number in the MIDI convention (C4 = 60, A4 = 69).
    pub fn semitone(&self) -> i32 {
        let accidental = match self.accidental {
            Some(Accidental::Sharp) => 1,
            Some(Accidental::Flat) => -1,
            None => 0,
        };
        self.letter.semitone() + (self.octave as i32 + 1) * 12 + accidental
    }

    /// Frequency in Hz using 12-tone equal temperament (A4 = 440 Hz).
    ///
    /// The base is the frequency of semitone 0, derived from the A440
    /// convention as `220 * ratio^3 * 0.5^5`, so no lookup table is needed.
    pub fn frequency(&self) -> f64 {
        let ratio = 2.0_f64.powf(1.0 / 12.0);
        let base = 220.0 * ratio.powi(3) * 0.5_f64.powi(5);
        base * ratio.powi(self.semitone())
    }
}

impl FromStr for Tone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidNote(s.to_string());
        let mut chars = s.chars();
        let letter = chars
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(invalid)?;
        let octave = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(invalid)? as u8;
        let accidental = match chars.next() {
            None => None,
            Some('#') => Some(Accidental::Sharp),
            Some('b') => Some(Accidental::Flat),
            Some(_) => return Err(invalid()),
        };
        if chars.next().is_some() {
            return Err(invalid());
        }
        Ok(Tone {
            letter,
            octave,
            accidental,
        })
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.as_char(), self.octave)?;
        match self.accidental {
            Some(Accidental::Sharp) => write!(f, "#"),
            Some(Accidental::Flat) => write!(f, "b"),
            None => Ok(()),
        }
    }
}

/// One parsed notation line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Event {
    /// `BPM <n>` — retargets the tempo for every later line.
    TempoChange { bpm: u32 },
    /// `R <n>` — silence for the denominator's duration.
    Rest { denominator: u32 },
    /// A single tone held for its full duration.
    Note { tone: Tone, denominator: u32 },
    /// Two or more tones, round-robined on the device in notation order.
    Chord { tones: Vec<Tone>, denominator: u32 },
}
