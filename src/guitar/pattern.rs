//! Strum settings and rhythmic strum patterns.

use serde::{Deserialize, Serialize};

use super::chords::{Articulation, ChordSpec};
use crate::error::SynthError;

/// Order in which the strings of a strum are struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrumDirection {
    /// String 0 (high E) first.
    Up,
    /// String 5 (low E) first.
    Down,
}

impl StrumDirection {
    /// String indices in strike order.
    pub fn order(self) -> [usize; 6] {
        match self {
            StrumDirection::Up => [0, 1, 2, 3, 4, 5],
            StrumDirection::Down => [5, 4, 3, 2, 1, 0],
        }
    }
}

/// How a single chord is strummed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrumOptions {
    /// Peak level of the first string struck.
    pub power: f64,
    /// Seconds between consecutive sounding strings.
    pub interval: f64,
    /// Each later string is this fraction as loud as the one before.
    pub power_decay: f64,
    pub direction: StrumDirection,
}

impl Default for StrumOptions {
    fn default() -> Self {
        StrumOptions {
            power: 1.0,
            interval: 0.005,
            power_decay: 0.95,
            direction: StrumDirection::Up,
        }
    }
}

impl StrumOptions {
    pub(crate) fn validate(&self) -> Result<(), SynthError> {
        if !(self.interval >= 0.0 && self.interval.is_finite()) {
            return Err(SynthError::InvalidConfig(format!(
                "strum interval {} must be a finite value >= 0",
                self.interval
            )));
        }
        if !(self.power.is_finite() && self.power_decay.is_finite()) {
            return Err(SynthError::InvalidConfig("strum power must be finite".into()));
        }
        Ok(())
    }
}

/// One resolved step of a pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrumStep {
    pub articulation: Articulation,
    /// Seconds, tempo already applied.
    pub duration: f64,
    pub direction: StrumDirection,
    pub power: f64,
}

fn default_tempo() -> f64 {
    1.0
}

/// A sequence of strummed chords played back to back.
///
/// Missing `durations`, `directions`, or `powers` default to one second,
/// a down strum, and full power for every chord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrumPattern {
    pub chords: Vec<ChordSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durations: Option<Vec<f64>>,
    /// Multiplier on every duration.
    #[serde(default = "default_tempo")]
    pub tempo: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directions: Option<Vec<StrumDirection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub powers: Option<Vec<f64>>,
}

impl StrumPattern {
    pub fn new(chords: Vec<ChordSpec>) -> Self {
        StrumPattern {
            chords,
            durations: None,
            tempo: 1.0,
            directions: None,
            powers: None,
        }
    }

    pub fn with_durations(mut self, durations: Vec<f64>) -> Self {
        self.durations = Some(durations);
        self
    }

    pub fn with_tempo(mut self, tempo: f64) -> Self {
        self.tempo = tempo;
        self
    }

    pub fn with_directions(mut self, directions: Vec<StrumDirection>) -> Self {
        self.directions = Some(directions);
        self
    }

    pub fn with_powers(mut self, powers: Vec<f64>) -> Self {
        self.powers = Some(powers);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, SynthError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve chord names and fill in defaults.
    pub fn steps(&self) -> Result<Vec<StrumStep>, SynthError> {
        let n = self.chords.len();
        check_len("durations", self.durations.as_deref(), n)?;
        check_len("directions", self.directions.as_deref(), n)?;
        check_len("powers", self.powers.as_deref(), n)?;

        self.chords
            .iter()
            .enumerate()
            .map(|(i, chord)| {
                let duration = self.durations.as_ref().map_or(1.0, |d| d[i]);
                Ok(StrumStep {
                    articulation: chord.resolve()?,
                    duration: duration * self.tempo,
                    direction: self
                        .directions
                        .as_ref()
                        .map_or(StrumDirection::Down, |d| d[i]),
                    power: self.powers.as_ref().map_or(1.0, |p| p[i]),
                })
            })
            .collect()
    }
}

fn check_len<T>(field: &'static str, values: Option<&[T]>, expected: usize) -> Result<(), SynthError> {
    match values {
        Some(v) if v.len() != expected => Err(SynthError::PatternLength {
            field,
            expected,
            found: v.len(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guitar::chords::chord_articulation;

    #[test]
    fn defaults_fill_every_step() {
        let steps = StrumPattern::new(vec!["G".into(), "C".into()]).steps().unwrap();
        assert_eq!(steps.len(), 2);
        for step in &steps {
            assert_eq!(step.duration, 1.0);
            assert_eq!(step.direction, StrumDirection::Down);
            assert_eq!(step.power, 1.0);
        }
        assert_eq!(steps[1].articulation, chord_articulation("C").unwrap());
    }

    #[test]
    fn tempo_scales_durations() {
        let steps = StrumPattern::new(vec!["Em".into(), "Am".into()])
            .with_durations(vec![0.5, 0.25])
            .with_tempo(2.0)
            .steps()
            .unwrap();
        assert_eq!(steps[0].duration, 1.0);
        assert_eq!(steps[1].duration, 0.5);
    }

    #[test]
    fn mismatched_lists_are_rejected() {
        let err = StrumPattern::new(vec!["Em".into(), "Am".into()])
            .with_powers(vec![1.0])
            .steps()
            .unwrap_err();
        assert!(matches!(
            err,
            SynthError::PatternLength { field: "powers", expected: 2, found: 1 }
        ));
    }

    #[test]
    fn unknown_chord_surfaces() {
        let err = StrumPattern::new(vec!["Q".into()]).steps().unwrap_err();
        assert!(matches!(err, SynthError::UnknownChord(_)));
    }

    #[test]
    fn parses_from_json() {
        let p = StrumPattern::from_json(
            r#"{
                "chords": ["C", [null, 3, 2, 0, 1, 0]],
                "durations": [0.5, 0.5],
                "directions": ["up", "down"]
            }"#,
        )
        .unwrap();
        assert_eq!(p.tempo, 1.0);
        assert!(p.powers.is_none());
        let steps = p.steps().unwrap();
        assert_eq!(steps[0].direction, StrumDirection::Up);
        assert_eq!(steps[1].articulation.fret(0), None);
    }

    #[test]
    fn direction_orders() {
        assert_eq!(StrumDirection::Up.order()[0], 0);
        assert_eq!(StrumDirection::Down.order()[0], 5);
    }
}
