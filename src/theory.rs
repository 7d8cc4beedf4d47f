//! Pitch model — note names, named octaves, and equal-tempered frequencies.
//!
//! Semitone indices are offset so that A in the `1-line` octave lands on
//! index 49, the reference pitch of 440 Hz.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainRangeError, SynthError};

/// Semitone index of the reference pitch (A, `1-line`).
pub const REFERENCE_INDEX: i32 = 49;
/// Frequency of the reference pitch in Hz.
pub const REFERENCE_HZ: f64 = 440.0;

const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const OCTAVE_NAMES: [&str; 9] = [
    "sub-contra", "contra", "great", "small", "1-line", "2-line", "3-line", "4-line", "5-line",
];

/// One of the twelve chromatic pitch classes, in ascending order from C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Position within the octave, C = 0 .. B = 11.
    pub fn chroma(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        PITCH_CLASS_NAMES[self as usize]
    }
}

impl FromStr for PitchClass {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PITCH_CLASS_NAMES
            .iter()
            .position(|&n| n == s)
            .map(|i| PitchClass::ALL[i])
            .ok_or_else(|| SynthError::InvalidConfig(format!("unknown note name '{s}'")))
    }
}

/// A named octave, stored as its ordinal (`sub-contra` = 0 .. `5-line` = 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Octave(u8);

impl Octave {
    pub const MAX: u8 = 8;
    pub const GREAT: Octave = Octave(2);
    pub const SMALL: Octave = Octave(3);
    pub const ONE_LINE: Octave = Octave(4);

    pub fn new(ordinal: u8) -> Result<Self, SynthError> {
        if ordinal > Self::MAX {
            return Err(SynthError::InvalidConfig(format!(
                "octave {ordinal} is outside 0..={}",
                Self::MAX
            )));
        }
        Ok(Octave(ordinal))
    }

    pub fn ordinal(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        OCTAVE_NAMES[self.0 as usize]
    }
}

impl FromStr for Octave {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(i) = OCTAVE_NAMES.iter().position(|&n| n == s) {
            return Ok(Octave(i as u8));
        }
        match s.parse::<u8>() {
            Ok(n) => Octave::new(n),
            Err(_) => Err(SynthError::InvalidConfig(format!("unknown octave '{s}'"))),
        }
    }
}

/// A pitch class in a specific octave. Serialized as `["E", "1-line"]`;
/// the octave may also be given as its ordinal, e.g. `["E", 4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "NoteRepr", into = "NoteRepr")]
pub struct Note {
    pub pitch_class: PitchClass,
    pub octave: Octave,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum OctaveRepr {
    Ordinal(u8),
    Name(String),
}

#[derive(Serialize, Deserialize)]
struct NoteRepr(String, OctaveRepr);

impl TryFrom<NoteRepr> for Note {
    type Error = SynthError;

    fn try_from(repr: NoteRepr) -> Result<Self, Self::Error> {
        let pitch_class = repr.0.parse()?;
        let octave = match repr.1 {
            OctaveRepr::Ordinal(n) => Octave::new(n)?,
            OctaveRepr::Name(name) => name.parse()?,
        };
        Ok(Note { pitch_class, octave })
    }
}

impl From<Note> for NoteRepr {
    fn from(note: Note) -> Self {
        NoteRepr(
            note.pitch_class.name().to_string(),
            OctaveRepr::Name(note.octave.name().to_string()),
        )
    }
}

impl Note {
    pub const fn new(pitch_class: PitchClass, octave: Octave) -> Self {
        Note { pitch_class, octave }
    }

    /// Build a note from its textual parts, e.g. `Note::named("A", "1-line")`.
    pub fn named(pitch_class: &str, octave: &str) -> Result<Self, SynthError> {
        Ok(Note {
            pitch_class: pitch_class.parse()?,
            octave: octave.parse()?,
        })
    }

    /// Linear semitone index (`octave * 12 + chroma - 8`).
    pub fn index(self) -> i32 {
        self.octave.0 as i32 * 12 + self.pitch_class.chroma() as i32 - 8
    }

    /// Equal-tempered frequency in Hz.
    pub fn frequency(self) -> f64 {
        REFERENCE_HZ * 2.0_f64.powf((self.index() - REFERENCE_INDEX) as f64 / 12.0)
    }

    /// The note `steps` semitones higher, rolling the chroma over into
    /// the next octave. Fails when that would pass the `5-line` octave.
    pub fn step_up(self, steps: u32) -> Result<Self, SynthError> {
        let chroma = self.pitch_class.chroma() as u32 + steps;
        let octave = self.octave.0 as u32 + chroma / 12;
        if octave > Octave::MAX as u32 {
            return Err(DomainRangeError::OctaveOverflow {
                base: self.to_string(),
                steps,
            }
            .into());
        }
        Ok(Note {
            pitch_class: PitchClass::ALL[(chroma % 12) as usize],
            octave: Octave(octave as u8),
        })
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.pitch_class.name(), self.octave.name())
    }
}

/// Semitone index of `note`.
pub fn note_index(note: Note) -> i32 {
    note.index()
}

/// `note` raised by `steps` semitones.
pub fn next_note(note: Note, steps: u32) -> Result<Note, SynthError> {
    note.step_up(steps)
}

/// Fundamental frequency of `note` in Hz.
pub fn pitch_hz(note: Note) -> f64 {
    note.frequency()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(name: &str, octave: &str) -> Note {
        Note::named(name, octave).unwrap()
    }

    #[test]
    fn reference_pitch_is_a440() {
        let a = note("A", "1-line");
        assert_eq!(note_index(a), 49);
        assert!((pitch_hz(a) - 440.0).abs() < 1e-9);
    }

    #[test]
    fn octave_ordinal_and_name_agree() {
        assert_eq!(note("E", "great"), note("E", "2"));
    }

    #[test]
    fn standard_guitar_pitches() {
        assert!((pitch_hz(note("E", "great")) - 82.4069).abs() < 1e-3);
        assert!((pitch_hz(note("E", "1-line")) - 329.6276).abs() < 1e-3);
        assert!((pitch_hz(note("B", "1-line")) - 493.8833).abs() < 1e-3);
    }

    #[test]
    fn pitch_increases_with_index() {
        let mut prev = 0.0;
        for octave in 0..=Octave::MAX {
            for pc in PitchClass::ALL {
                let hz = pitch_hz(Note::new(pc, Octave::new(octave).unwrap()));
                assert!(hz > prev, "pitch should rise: {hz} after {prev}");
                prev = hz;
            }
        }
    }

    #[test]
    fn step_rolls_into_next_octave() {
        let b = note("B", "small");
        assert_eq!(next_note(b, 1).unwrap(), note("C", "1-line"));
        assert_eq!(next_note(note("E", "great"), 12).unwrap(), note("E", "small"));
        assert_eq!(next_note(b, 0).unwrap(), b);
    }

    #[test]
    fn step_index_matches_semitones() {
        let e = note("E", "great");
        for steps in 0..30 {
            assert_eq!(next_note(e, steps).unwrap().index(), e.index() + steps as i32);
        }
    }

    #[test]
    fn step_past_last_octave_fails() {
        let top = note("B", "5-line");
        let err = next_note(top, 1).unwrap_err();
        assert!(matches!(
            err,
            SynthError::DomainRange(DomainRangeError::OctaveOverflow { steps: 1, .. })
        ));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(Note::named("H", "small").is_err());
        assert!(Note::named("C", "6-line").is_err());
        assert!(Note::named("C", "9").is_err());
    }

    #[test]
    fn note_json_forms() {
        let n: Note = serde_json::from_str(r#"["G", "small"]"#).unwrap();
        assert_eq!(n, note("G", "small"));
        let n: Note = serde_json::from_str(r#"["G", 3]"#).unwrap();
        assert_eq!(n, note("G", "small"));
        assert_eq!(serde_json::to_string(&n).unwrap(), r#"["G","small"]"#);
        assert!(serde_json::from_str::<Note>(r#"["G", 12]"#).is_err());
    }
}
