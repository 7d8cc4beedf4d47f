//! Periodic oscillators — sine and thresholded square.

use std::f64::consts::PI;

use rand::RngCore;

use super::SampleSource;
use crate::error::SynthError;

/// Initial settings shared by the periodic oscillators. A restart always
/// returns to these values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorParams {
    pub frequency: f64,
    /// Starting phase in degrees.
    pub phase: f64,
    pub amplitude: f64,
    pub sample_rate: f64,
}

impl Default for OscillatorParams {
    fn default() -> Self {
        OscillatorParams {
            frequency: 440.0,
            phase: 0.0,
            amplitude: 1.0,
            sample_rate: 44100.0,
        }
    }
}

/// A naive (non band-limited) sine oscillator.
#[derive(Debug, Clone)]
pub struct SineOscillator {
    pub params: OscillatorParams,
    amplitude: f64,
    phase: f64,
    iteration: f64,
    step: f64,
    started: bool,
}

impl SineOscillator {
    pub fn new(params: OscillatorParams) -> Self {
        SineOscillator {
            params,
            amplitude: params.amplitude,
            phase: 0.0,
            iteration: 0.0,
            step: 0.0,
            started: false,
        }
    }

    /// Convenience constructor with zero phase and unit amplitude.
    pub fn with_frequency(frequency: f64, sample_rate: f64) -> Self {
        Self::new(OscillatorParams {
            frequency,
            sample_rate,
            ..OscillatorParams::default()
        })
    }

    /// Raw sine value at the current position, then advance.
    fn advance(&mut self) -> Result<f64, SynthError> {
        if !self.started {
            return Err(SynthError::UninitializedGenerator);
        }
        let value = (self.iteration + self.phase).sin();
        self.iteration += self.step;
        Ok(value)
    }

    fn reset(&mut self) {
        self.amplitude = self.params.amplitude;
        self.iteration = 0.0;
        self.step = 2.0 * PI * self.params.frequency / self.params.sample_rate;
        self.phase = self.params.phase / 360.0 * 2.0 * PI;
        self.started = true;
    }
}

impl SampleSource for SineOscillator {
    fn restart(&mut self, _rng: &mut dyn RngCore) {
        self.reset();
    }

    fn next_sample(&mut self, _rng: &mut dyn RngCore) -> Result<f64, SynthError> {
        Ok(self.advance()? * self.amplitude)
    }
}

/// A square wave derived from the sine core: `+amplitude` while the sine
/// is at or above `threshold`, `-amplitude` below it.
#[derive(Debug, Clone)]
pub struct SquareOscillator {
    core: SineOscillator,
    pub threshold: f64,
}

impl SquareOscillator {
    pub fn new(params: OscillatorParams, threshold: f64) -> Self {
        SquareOscillator {
            core: SineOscillator::new(params),
            threshold,
        }
    }

    pub fn with_frequency(frequency: f64, sample_rate: f64) -> Self {
        SquareOscillator {
            core: SineOscillator::with_frequency(frequency, sample_rate),
            threshold: 0.0,
        }
    }
}

impl SampleSource for SquareOscillator {
    fn restart(&mut self, _rng: &mut dyn RngCore) {
        self.core.reset();
    }

    fn next_sample(&mut self, _rng: &mut dyn RngCore) -> Result<f64, SynthError> {
        let value = self.core.advance()?;
        let level = if value < self.threshold { -1.0 } else { 1.0 };
        Ok(level * self.core.amplitude)
    }
}
