//! Articulations and the named chord table.
//!
//! An articulation lists what each of the six strings does, string 0
//! being the high E: a fret number, or muted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SynthError;

pub const STRING_COUNT: usize = 6;

/// Per-string fret numbers; `None` keeps the string silent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<serde_json::Value>", into = "Vec<Option<u32>>")]
pub struct Articulation([Option<u32>; STRING_COUNT]);

impl Articulation {
    pub const fn new(frets: [Option<u32>; STRING_COUNT]) -> Self {
        Articulation(frets)
    }

    /// Only `string` sounds, at `fret`.
    pub fn single(string: usize, fret: u32) -> Result<Self, SynthError> {
        if string >= STRING_COUNT {
            return Err(SynthError::InvalidArticulation(format!(
                "string {string} is out of 0..{STRING_COUNT}"
            )));
        }
        let mut frets = [None; STRING_COUNT];
        frets[string] = Some(fret);
        Ok(Articulation(frets))
    }

    pub fn frets(&self) -> &[Option<u32>; STRING_COUNT] {
        &self.0
    }

    pub fn fret(&self, string: usize) -> Option<u32> {
        self.0.get(string).copied().flatten()
    }

    /// Strings that sound, as `(string, fret)` in string order.
    pub fn sounding(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.map(|fret| (i, fret)))
    }
}

impl TryFrom<&[Option<u32>]> for Articulation {
    type Error = SynthError;

    fn try_from(frets: &[Option<u32>]) -> Result<Self, Self::Error> {
        let frets: [Option<u32>; STRING_COUNT] = frets.try_into().map_err(|_| {
            SynthError::InvalidArticulation(format!(
                "expected {STRING_COUNT} strings, got {}",
                frets.len()
            ))
        })?;
        Ok(Articulation(frets))
    }
}

impl TryFrom<Vec<serde_json::Value>> for Articulation {
    type Error = SynthError;

    /// Accepts non-negative integers, `null`, or `"x"` for a muted string.
    fn try_from(values: Vec<serde_json::Value>) -> Result<Self, Self::Error> {
        use serde_json::Value;

        let frets = values
            .iter()
            .map(|v| match v {
                Value::Null => Ok(None),
                Value::String(s) if s.eq_ignore_ascii_case("x") => Ok(None),
                Value::Number(n) => n
                    .as_u64()
                    .and_then(|f| u32::try_from(f).ok())
                    .map(Some)
                    .ok_or_else(|| {
                        SynthError::InvalidArticulation(format!("fret {n} is not a valid fret"))
                    }),
                other => Err(SynthError::InvalidArticulation(format!(
                    "{other} is neither a fret nor muted"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Articulation::try_from(frets.as_slice())
    }
}

impl From<Articulation> for Vec<Option<u32>> {
    fn from(a: Articulation) -> Self {
        a.0.to_vec()
    }
}

impl fmt::Display for Articulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fret) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            match fret {
                Some(n) => write!(f, "{n}")?,
                None => write!(f, "x")?,
            }
        }
        Ok(())
    }
}

const X: i8 = -1;

const fn shape(frets: [i8; STRING_COUNT]) -> Articulation {
    let mut out = [None; STRING_COUNT];
    let mut i = 0;
    while i < STRING_COUNT {
        if frets[i] >= 0 {
            out[i] = Some(frets[i] as u32);
        }
        i += 1;
    }
    Articulation(out)
}

/// Named major and minor chords.
pub const CHORD_ARTICULATIONS: [(&str, Articulation); 24] = [
    ("C", shape([0, 1, 0, 2, 3, 0])),
    ("Cm", shape([3, 4, 5, 5, 3, X])),
    ("C#", shape([4, 6, 6, 6, 4, X])),
    ("C#m", shape([4, 5, 6, 6, 4, X])),
    ("D", shape([2, 3, 2, 0, X, X])),
    ("Dm", shape([1, 3, 2, 0, X, X])),
    ("D#", shape([5, 7, 7, 7, 5, X])),
    ("D#m", shape([5, 6, 7, 7, 5, X])),
    ("E", shape([0, 0, 1, 2, 2, 0])),
    ("Em", shape([0, 0, 0, 2, 2, 0])),
    ("F", shape([1, 1, 2, 3, 3, 1])),
    ("Fm", shape([1, 1, 1, 3, 3, 1])),
    ("F#", shape([2, 2, 3, 4, 4, 2])),
    ("F#m", shape([2, 2, 2, 4, 4, 2])),
    ("G", shape([3, 0, 0, 0, 2, 3])),
    ("Gm", shape([3, 3, 3, 5, 5, 3])),
    ("G#", shape([4, 4, 5, 6, 6, 4])),
    ("G#m", shape([4, 4, 4, 6, 6, 4])),
    ("A", shape([0, 2, 2, 2, 0, X])),
    ("Am", shape([0, 1, 2, 2, 0, X])),
    ("A#", shape([1, 3, 3, 3, 1, X])),
    ("A#m", shape([1, 2, 3, 3, 1, X])),
    ("B", shape([2, 4, 4, 4, 2, X])),
    ("Bm", shape([2, 3, 4, 4, 2, X])),
];

/// Look up a named chord.
pub fn chord_articulation(name: &str) -> Result<Articulation, SynthError> {
    CHORD_ARTICULATIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, a)| *a)
        .ok_or_else(|| SynthError::UnknownChord(name.to_string()))
}

pub fn chord_names() -> impl Iterator<Item = &'static str> {
    CHORD_ARTICULATIONS.iter().map(|(n, _)| *n)
}

/// A chord given either by name or as an explicit articulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChordSpec {
    Named(String),
    Shape(Articulation),
}

impl ChordSpec {
    pub fn resolve(&self) -> Result<Articulation, SynthError> {
        match self {
            ChordSpec::Named(name) => chord_articulation(name),
            ChordSpec::Shape(a) => Ok(*a),
        }
    }
}

impl From<&str> for ChordSpec {
    fn from(name: &str) -> Self {
        ChordSpec::Named(name.to_string())
    }
}

impl From<Articulation> for ChordSpec {
    fn from(a: Articulation) -> Self {
        ChordSpec::Shape(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_chords() {
        let c = chord_articulation("C").unwrap();
        assert_eq!(c.frets(), &[Some(0), Some(1), Some(0), Some(2), Some(3), Some(0)]);
        let d = chord_articulation("D").unwrap();
        assert_eq!(d.fret(4), None);
        assert_eq!(d.sounding().count(), 4);
    }

    #[test]
    fn unknown_chord_is_a_lookup_error() {
        assert!(matches!(
            chord_articulation("Cmaj13"),
            Err(SynthError::UnknownChord(name)) if name == "Cmaj13"
        ));
    }

    #[test]
    fn table_names_are_unique() {
        let names: Vec<_> = chord_names().collect();
        assert_eq!(names.len(), 24);
        for (i, a) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(a), "duplicate chord {a}");
        }
    }

    #[test]
    fn slice_must_have_six_strings() {
        let five = [Some(0); 5];
        assert!(matches!(
            Articulation::try_from(&five[..]),
            Err(SynthError::InvalidArticulation(_))
        ));
        let six = [Some(1), None, Some(0), None, None, None];
        assert_eq!(Articulation::try_from(&six[..]).unwrap().sounding().count(), 2);
    }

    #[test]
    fn json_accepts_muted_markers() {
        let a: Articulation = serde_json::from_str(r#"[0, 1, null, "x", 3, 0]"#).unwrap();
        assert_eq!(a.frets(), &[Some(0), Some(1), None, None, Some(3), Some(0)]);
        assert_eq!(serde_json::to_string(&a).unwrap(), "[0,1,null,null,3,0]");
        assert_eq!(a.to_string(), "0-1-x-x-3-0");
    }

    #[test]
    fn json_rejects_bad_entries() {
        assert!(serde_json::from_str::<Articulation>(r#"[0, 1, 2]"#).is_err());
        assert!(serde_json::from_str::<Articulation>(r#"[0, 1, -2, 0, 0, 0]"#).is_err());
        assert!(serde_json::from_str::<Articulation>(r#"[0, 1.5, 2, 0, 0, 0]"#).is_err());
        assert!(serde_json::from_str::<Articulation>(r#"[0, "y", 2, 0, 0, 0]"#).is_err());
    }

    #[test]
    fn chord_spec_from_json() {
        let named: ChordSpec = serde_json::from_str(r#""Am""#).unwrap();
        assert_eq!(named.resolve().unwrap(), chord_articulation("Am").unwrap());
        let shape: ChordSpec = serde_json::from_str(r#"[null, null, null, null, null, 5]"#).unwrap();
        assert_eq!(shape.resolve().unwrap(), Articulation::single(5, 5).unwrap());
    }

    #[test]
    fn single_string_bounds() {
        assert!(Articulation::single(6, 0).is_err());
    }
}
