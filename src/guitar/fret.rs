//! Fret geometry — how fretting shortens the string and stretches its decay.

use serde::{Deserialize, Serialize};

use crate::error::{DomainRangeError, SynthError};

/// Physical layout of the neck. Fret spacing shrinks geometrically:
/// fret `i` is `first_fret_length * fret_ratio^i` long.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FretGeometry {
    /// Open vibrating length of the string.
    pub string_length: f64,
    /// Ratio between consecutive fret spacings.
    pub fret_ratio: f64,
    /// Length of the first fret.
    pub first_fret_length: f64,
}

impl Default for FretGeometry {
    fn default() -> Self {
        FretGeometry {
            string_length: 63.0,
            fret_ratio: 0.947,
            first_fret_length: 3.5,
        }
    }
}

impl FretGeometry {
    /// Distance from the nut to `fret` (zero for the open string).
    pub fn fret_length(&self, fret: u32) -> f64 {
        let mut total = 0.0;
        let mut spacing = self.first_fret_length;
        for _ in 0..fret {
            total += spacing;
            spacing *= self.fret_ratio;
        }
        total
    }

    /// Stretch factor for a string with `base` stretch fretted at `fret`:
    /// `base * L / (L - fret_length)`.
    pub fn stretch_factor(&self, base: f64, fret: u32) -> Result<f64, SynthError> {
        let fret_length = self.fret_length(fret);
        if fret_length >= self.string_length {
            return Err(DomainRangeError::FretTooHigh {
                fret,
                fret_length,
                string_length: self.string_length,
            }
            .into());
        }
        Ok(base * self.string_length / (self.string_length - fret_length))
    }

    /// Highest fret that still leaves some string to vibrate, if the
    /// spacing series ever reaches the end of the string.
    pub fn max_fret(&self) -> Option<u32> {
        let mut total = 0.0;
        let mut spacing = self.first_fret_length;
        for fret in 0..=u16::MAX as u32 {
            if total + spacing >= self.string_length {
                return Some(fret);
            }
            total += spacing;
            spacing *= self.fret_ratio;
        }
        None
    }

    pub(crate) fn validate(&self) -> Result<(), SynthError> {
        if !(self.string_length > 0.0 && self.string_length.is_finite()) {
            return Err(SynthError::InvalidConfig("string_length must be positive".into()));
        }
        if !(self.first_fret_length > 0.0 && self.first_fret_length.is_finite()) {
            return Err(SynthError::InvalidConfig("first_fret_length must be positive".into()));
        }
        if !(self.fret_ratio > 0.0 && self.fret_ratio <= 1.0) {
            return Err(SynthError::InvalidConfig("fret_ratio must be in (0, 1]".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_string_keeps_base_stretch() {
        let g = FretGeometry::default();
        assert_eq!(g.fret_length(0), 0.0);
        assert_eq!(g.stretch_factor(2.5, 0).unwrap(), 2.5);
    }

    #[test]
    fn fret_length_is_geometric_series() {
        let g = FretGeometry::default();
        assert!((g.fret_length(1) - 3.5).abs() < 1e-12);
        assert!((g.fret_length(2) - (3.5 + 3.5 * 0.947)).abs() < 1e-12);
        let closed = 3.5 * (1.0 - 0.947_f64.powi(12)) / (1.0 - 0.947);
        assert!((g.fret_length(12) - closed).abs() < 1e-9);
    }

    #[test]
    fn fretting_strictly_increases_stretch() {
        let g = FretGeometry::default();
        let max = g.max_fret().unwrap();
        let mut prev = g.stretch_factor(2.0, 0).unwrap();
        for fret in 1..=max {
            let s = g.stretch_factor(2.0, fret).unwrap();
            assert!(s > prev, "fret {fret}: {s} <= {prev}");
            prev = s;
        }
    }

    #[test]
    fn fret_past_string_end_is_a_domain_error() {
        let g = FretGeometry::default();
        let max = g.max_fret().unwrap();
        assert_eq!(max, 56);
        let err = g.stretch_factor(2.0, max + 1).unwrap_err();
        assert!(matches!(
            err,
            SynthError::DomainRange(DomainRangeError::FretTooHigh { fret: 57, .. })
        ));
    }

    #[test]
    fn validation() {
        assert!(FretGeometry::default().validate().is_ok());
        let bad = FretGeometry { fret_ratio: 1.5, ..FretGeometry::default() };
        assert!(bad.validate().is_err());
    }
}
