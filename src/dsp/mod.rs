//! DSP building blocks — sample sources, effects, and waveform buffers.
//!
//! Everything here is pull-based and offline: a source hands out one
//! sample per call and effects transform samples one at a time or a
//! whole buffer at once.

pub mod chain;
pub mod oscillator;
pub mod reverb;
pub mod tremolo;
pub mod waveform;

use rand::RngCore;

use crate::error::SynthError;
use waveform::Waveform;

/// Anything that yields one sample per call after an explicit restart.
///
/// Randomness is passed in rather than owned so callers can seed it.
pub trait SampleSource {
    /// Reset to the initial state and prime for playback.
    fn restart(&mut self, rng: &mut dyn RngCore);

    /// Produce the next sample. Errors with
    /// [`SynthError::UninitializedGenerator`] before the first `restart`.
    fn next_sample(&mut self, rng: &mut dyn RngCore) -> Result<f64, SynthError>;

    /// Restart and pull `count` samples into a buffer.
    fn render(&mut self, count: usize, rng: &mut dyn RngCore) -> Result<Waveform, SynthError> {
        self.restart(rng);
        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            samples.push(self.next_sample(rng)?);
        }
        Ok(Waveform::from_samples(samples))
    }
}

/// A per-sample audio effect.
pub trait Effect {
    /// Process one sample, advancing internal state.
    fn process(&mut self, input: f64) -> f64;

    /// Process a whole buffer.
    fn apply(&mut self, signal: &[f64]) -> Waveform {
        Waveform::from_samples(signal.iter().map(|&s| self.process(s)).collect())
    }

    /// Clear internal state.
    fn reset(&mut self);
}
