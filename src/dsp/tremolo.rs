//! Tremolo effect — amplitude modulation by a raised-cosine LFO.

use std::f64::consts::PI;

use super::Effect;
use super::waveform::Waveform;
use crate::error::SynthError;

/// Amplitude tremolo swinging the gain between `min_amp` and `max_amp`.
#[derive(Debug, Clone)]
pub struct Tremolo {
    /// LFO rate in Hz.
    pub frequency: f64,
    /// Gain at the bottom of the LFO swing.
    pub min_amp: f64,
    /// Gain at the top of the LFO swing.
    pub max_amp: f64,
    sample_rate: f64,
    iteration: f64,
}

impl Tremolo {
    pub fn new(sample_rate: f64) -> Self {
        Tremolo {
            frequency: 10.0,
            min_amp: 0.5,
            max_amp: 1.0,
            sample_rate,
            iteration: 0.0,
        }
    }

    /// `frequency` must be non-negative and `min_amp` within `[0, max_amp]`.
    pub fn with_params(sample_rate: f64, frequency: f64, min_amp: f64) -> Result<Self, SynthError> {
        if !(sample_rate > 0.0 && sample_rate.is_finite()) {
            return Err(SynthError::InvalidConfig(format!(
                "tremolo sample rate {sample_rate} must be positive"
            )));
        }
        if !(frequency >= 0.0 && frequency.is_finite()) {
            return Err(SynthError::InvalidConfig(format!(
                "tremolo frequency {frequency} must be a finite value >= 0"
            )));
        }
        let mut t = Self::new(sample_rate);
        if !(min_amp >= 0.0 && min_amp <= t.max_amp) {
            return Err(SynthError::InvalidConfig(format!(
                "tremolo min_amp {min_amp} must lie in [0, {}]",
                t.max_amp
            )));
        }
        t.frequency = frequency;
        t.min_amp = min_amp;
        Ok(t)
    }

    #[inline]
    fn next_gain(&mut self) -> f64 {
        let lfo = (self.iteration.cos() + 1.0) / 2.0;
        self.iteration += 2.0 * PI * self.frequency / self.sample_rate;
        lfo * (self.max_amp - self.min_amp) + self.min_amp
    }

    /// The next `n` gain values of the LFO.
    pub fn tremolo_wave(&mut self, n: usize) -> Waveform {
        Waveform::from_samples((0..n).map(|_| self.next_gain()).collect())
    }
}

impl Effect for Tremolo {
    fn process(&mut self, input: f64) -> f64 {
        input * self.next_gain()
    }

    /// Peak-normalizes the signal, then modulates it.
    fn apply(&mut self, signal: &[f64]) -> Waveform {
        let mut normalized = Waveform::from_samples(signal.to_vec());
        normalized.normalize_to(1.0);
        let out = normalized
            .samples()
            .iter()
            .map(|&s| s * self.next_gain())
            .collect();
        Waveform::from_samples(out)
    }

    fn reset(&mut self) {
        self.iteration = 0.0;
    }
}
