//! Integration tests for the chime interpreter.
//!
//! Drives the public API end to end with a recording device, asserting the
//! exact sequence of device actuations a notation source produces.

use std::cell::RefCell;
use std::rc::Rc;

use chime::{
    check_source, play_source, Clock, DeviceError, Event, Player, Tone, ToneDevice, SWING_MICROS,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Frequency(f64),
    Silence,
    Sleep(u64),
}

#[derive(Clone, Default)]
struct Log(Rc<RefCell<Vec<Call>>>);

impl Log {
    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    fn frequencies(&self) -> Vec<f64> {
        self.0
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Frequency(hz) => Some(*hz),
                _ => None,
            })
            .collect()
    }

    fn sleeps(&self) -> Vec<u64> {
        self.0
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Sleep(micros) => Some(*micros),
                _ => None,
            })
            .collect()
    }
}

struct RecordingDevice(Log);

impl ToneDevice for RecordingDevice {
    fn set_frequency(&mut self, hz: f64) -> Result<(), DeviceError> {
        self.0.push(Call::Frequency(hz));
        Ok(())
    }

    fn silence(&mut self) -> Result<(), DeviceError> {
        self.0.push(Call::Silence);
        Ok(())
    }
}

struct RecordingClock(Log);

impl Clock for RecordingClock {
    fn sleep_micros(&mut self, micros: u64) {
        self.0.push(Call::Sleep(micros));
    }
}

fn recording_player() -> (Player<RecordingDevice, RecordingClock>, Log) {
    let log = Log::default();
    let player = Player::new(RecordingDevice(log.clone()), RecordingClock(log.clone()));
    (player, log)
}

fn tone(s: &str) -> Tone {
    s.parse().unwrap()
}

#[test]
fn test_end_to_end_note_rest_chord() {
    let source = "BPM 120\nC4 4\nR 4\n% comment\nC4 E4 4";

    let events = check_source(source).unwrap();
    assert_eq!(events.len(), 4, "the comment line should produce no event");
    assert_eq!(events[0], Event::TempoChange { bpm: 120 });
    assert!(matches!(events[1], Event::Note { .. }));
    assert!(matches!(events[2], Event::Rest { .. }));
    assert!(matches!(events[3], Event::Chord { .. }));

    let (mut player, log) = recording_player();
    play_source(source, &mut player).unwrap();

    // Note: one hold of a quarter at 120 BPM.
    let calls = log.calls();
    assert_eq!(
        calls[..3],
        [
            Call::Frequency(tone("C4").frequency()),
            Call::Sleep(500_000),
            Call::Silence,
        ]
    );

    // Rest: silence only.
    assert_eq!(calls[3..5], [Call::Silence, Call::Sleep(500_000)]);

    // Chord: 500_000 us of 35 ms slices, alternating C4 and E4 in order.
    let chord_frequencies = &log.frequencies()[1..];
    assert_eq!(chord_frequencies.len() as u64, 500_000 / SWING_MICROS);
    for (i, hz) in chord_frequencies.iter().enumerate() {
        let expected = if i % 2 == 0 { tone("C4") } else { tone("E4") };
        assert_eq!(*hz, expected.frequency(), "chord slice {}", i);
    }
}

#[test]
fn test_tempo_change_retargets_later_durations() {
    let (mut player, log) = recording_player();
    play_source("C4 4\nBPM 60\nC4 4", &mut player).unwrap();

    // Same quarter note: half a second at the default 120, a full second at 60.
    assert_eq!(log.sleeps(), vec![500_000, 1_000_000]);
}

#[test]
fn test_run_stops_at_the_first_bad_line() {
    let (mut player, log) = recording_player();
    let err = play_source("C4 4\nH4 4\nE4 4", &mut player).unwrap_err();

    assert!(err.to_string().starts_with("line 2:"));
    // Only the first note played; line 3 was never reached.
    assert_eq!(
        log.calls(),
        vec![
            Call::Frequency(tone("C4").frequency()),
            Call::Sleep(500_000),
            Call::Silence,
        ]
    );
}

#[test]
fn test_delimiter_noise_is_tolerated() {
    let events = check_source("  C4 4;\r\n\n;\nR 8 % tail comment").unwrap();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], Event::Note { .. }));
    assert_eq!(events[1], Event::Rest { denominator: 8 });
}

#[test]
fn test_chord_tone_order_is_preserved() {
    let events = check_source("G4 E4 C4 4").unwrap();
    assert_eq!(
        events[0],
        Event::Chord {
            tones: vec![tone("G4"), tone("E4"), tone("C4")],
            denominator: 4
        }
    );
}

#[test]
fn test_demo_score_plays() {
    let source = include_str!("../scores/scale.txt");

    let events = check_source(source).unwrap();
    // One tempo change, eight scale notes, a rest, three chords.
    assert_eq!(events.len(), 13);

    let (mut player, log) = recording_player();
    play_source(source, &mut player).unwrap();
    assert!(!log.calls().is_empty());
}

#[test]
fn test_rest_duration_follows_tempo() {
    let (mut player, log) = recording_player();
    play_source("BPM 60\nR 8", &mut player).unwrap();

    assert_eq!(log.calls(), vec![Call::Silence, Call::Sleep(500_000)]);
    assert!(log.frequencies().is_empty());
}
