//! Guitar configuration — tuning, string stiffness, neck geometry, and
//! strum defaults. Loadable from JSON; every field is optional.

use serde::{Deserialize, Serialize};

use crate::error::SynthError;
use crate::guitar::fret::FretGeometry;
use crate::guitar::pattern::StrumOptions;
use crate::theory::{Note, Octave, PitchClass};

/// Standard tuning, high E (string 0) down to low E (string 5).
pub const STANDARD_TUNING: [Note; 6] = [
    Note::new(PitchClass::E, Octave::ONE_LINE),
    Note::new(PitchClass::B, Octave::ONE_LINE),
    Note::new(PitchClass::G, Octave::SMALL),
    Note::new(PitchClass::D, Octave::SMALL),
    Note::new(PitchClass::A, Octave::GREAT),
    Note::new(PitchClass::E, Octave::GREAT),
];

/// Base stretch factors, thin strings ringing longest.
pub const STANDARD_STRETCH_FACTORS: [f64; 6] = [4.0, 3.75, 3.5, 2.5, 2.25, 2.0];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuitarConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    pub tuning: [Note; 6],
    pub stretch_factors: [f64; 6],
    pub geometry: FretGeometry,
    /// Defaults for `strum_chord`; patterns use its interval and decay.
    pub strum: StrumOptions,
}

impl Default for GuitarConfig {
    fn default() -> Self {
        GuitarConfig {
            sample_rate: 44100,
            tuning: STANDARD_TUNING,
            stretch_factors: STANDARD_STRETCH_FACTORS,
            geometry: FretGeometry::default(),
            strum: StrumOptions::default(),
        }
    }
}

impl GuitarConfig {
    pub fn with_sample_rate(sample_rate: u32) -> Self {
        GuitarConfig {
            sample_rate,
            ..GuitarConfig::default()
        }
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, SynthError> {
        let config: GuitarConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SynthError> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidConfig("sample_rate must be positive".into()));
        }
        if let Some(s) = self
            .stretch_factors
            .iter()
            .find(|s| !(**s >= 1.0 && s.is_finite()))
        {
            return Err(SynthError::InvalidConfig(format!(
                "stretch factor {s} must be a finite value >= 1"
            )));
        }
        self.geometry.validate()?;
        self.strum.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guitar::pattern::StrumDirection;

    #[test]
    fn default_is_standard_tuning() {
        let c = GuitarConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.tuning[0], Note::named("E", "1-line").unwrap());
        assert_eq!(c.tuning[5], Note::named("E", "great").unwrap());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = GuitarConfig::from_json(
            r#"{ "sample_rate": 22050, "strum": { "direction": "down" } }"#,
        )
        .unwrap();
        assert_eq!(c.sample_rate, 22050);
        assert_eq!(c.strum.direction, StrumDirection::Down);
        assert_eq!(c.strum.interval, 0.005);
        assert_eq!(c.stretch_factors, STANDARD_STRETCH_FACTORS);
    }

    #[test]
    fn drop_d_tuning_from_json() {
        let c = GuitarConfig::from_json(
            r#"{ "tuning": [["E", "1-line"], ["B", "1-line"], ["G", "small"],
                            ["D", "small"], ["A", "great"], ["D", 2]] }"#,
        )
        .unwrap();
        assert_eq!(c.tuning[5], Note::named("D", "great").unwrap());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(GuitarConfig::from_json(r#"{ "sample_rate": 0 }"#).is_err());
        assert!(GuitarConfig::from_json(r#"{ "stretch_factors": [4, 3, 2, 1, 0.5, 2] }"#).is_err());
        assert!(GuitarConfig::from_json(r#"{ "geometry": { "fret_ratio": 0 } }"#).is_err());
        assert!(matches!(
            GuitarConfig::from_json("{ not json"),
            Err(SynthError::Json(_))
        ));
    }

    #[test]
    fn round_trips_through_json() {
        let c = GuitarConfig::with_sample_rate(48000);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(GuitarConfig::from_json(&json).unwrap(), c);
    }
}
