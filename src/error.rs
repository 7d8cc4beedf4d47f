use std::fmt;

#[derive(Debug)]
pub enum SynthError {
    DomainRange(DomainRangeError),
    /// Chord name missing from the articulation table.
    UnknownChord(String),
    InvalidArticulation(String),
    /// `next_sample` was called before the source was (re)started.
    UninitializedGenerator,
    PatternLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    InvalidConfig(String),
    Json(serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomainRangeError {
    /// The fretted length would reach or pass the end of the string.
    FretTooHigh {
        fret: u32,
        fret_length: f64,
        string_length: f64,
    },
    /// Stepping up from `base` would leave the highest named octave.
    OctaveOverflow { base: String, steps: u32 },
    StringIndex { index: usize },
    Duration { seconds: f64 },
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthError::DomainRange(e) => write!(f, "Out of range: {e}"),
            SynthError::UnknownChord(name) => write!(f, "Unknown chord '{name}'"),
            SynthError::InvalidArticulation(msg) => write!(f, "Invalid articulation: {msg}"),
            SynthError::UninitializedGenerator => {
                write!(f, "Sample requested before the generator was restarted")
            }
            SynthError::PatternLength { field, expected, found } => {
                write!(f, "Pattern '{field}' has {found} entries, expected {expected}")
            }
            SynthError::InvalidConfig(msg) => write!(f, "Invalid config: {msg}"),
            SynthError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for SynthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SynthError::DomainRange(e) => Some(e),
            SynthError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for DomainRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainRangeError::FretTooHigh { fret, fret_length, string_length } => write!(
                f,
                "fret {fret} spans {fret_length:.3} of a {string_length} string"
            ),
            DomainRangeError::OctaveOverflow { base, steps } => {
                write!(f, "{steps} semitones above {base} is past the last octave")
            }
            DomainRangeError::StringIndex { index } => {
                write!(f, "string {index} does not exist (0..=5)")
            }
            DomainRangeError::Duration { seconds } => {
                write!(f, "duration {seconds} is not a finite, non-negative number of seconds")
            }
        }
    }
}

impl std::error::Error for DomainRangeError {}

impl From<DomainRangeError> for SynthError {
    fn from(e: DomainRangeError) -> Self {
        SynthError::DomainRange(e)
    }
}

impl From<serde_json::Error> for SynthError {
    fn from(e: serde_json::Error) -> Self {
        SynthError::Json(e)
    }
}
