//! Six-string guitar — plucks, chords, strums, and rhythmic patterns.
//!
//! Every call returns a fresh [`Waveform`] of `round(duration * sample_rate)`
//! samples. Plucking leaves the string fretted where it was played, so a
//! guitar carries state from one call to the next.

pub mod chords;
pub mod fret;
pub mod pattern;
pub mod string;

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GuitarConfig;
use crate::dsp::SampleSource;
use crate::dsp::waveform::Waveform;
use crate::error::{DomainRangeError, SynthError};
use chords::{Articulation, ChordSpec};
use pattern::{StrumOptions, StrumPattern};
use string::GuitarString;

/// Longest buffer a single call may render.
pub const MAX_DURATION_SECONDS: f64 = 3600.0;

pub struct Guitar {
    config: GuitarConfig,
    strings: Vec<GuitarString>,
    rng: StdRng,
}

impl Guitar {
    /// Standard-tuned guitar seeded from the OS.
    pub fn new(sample_rate: u32) -> Result<Self, SynthError> {
        Self::with_rng(GuitarConfig::with_sample_rate(sample_rate), StdRng::from_os_rng())
    }

    /// Deterministic guitar: the same seed and calls give the same audio.
    pub fn seeded(config: GuitarConfig, seed: u64) -> Result<Self, SynthError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GuitarConfig, rng: StdRng) -> Result<Self, SynthError> {
        config.validate()?;
        let sample_rate = config.sample_rate as f64;
        let strings = config
            .tuning
            .iter()
            .zip(config.stretch_factors)
            .map(|(&note, stretch)| GuitarString::new(note, sample_rate, stretch, config.geometry))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Guitar {
            config,
            strings,
            rng,
        })
    }

    pub fn config(&self) -> &GuitarConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    pub fn string(&self, index: usize) -> Option<&GuitarString> {
        self.strings.get(index)
    }

    /// Number of samples in `duration` seconds, up to [`MAX_DURATION_SECONDS`].
    pub fn duration_samples(&self, duration: f64) -> Result<usize, SynthError> {
        if !(duration >= 0.0 && duration <= MAX_DURATION_SECONDS) {
            return Err(DomainRangeError::Duration { seconds: duration }.into());
        }
        Ok((duration * self.config.sample_rate as f64).round() as usize)
    }

    /// Fret one string, pluck it, and scale the result so its peak is `power`.
    pub fn pluck_string(
        &mut self,
        string: usize,
        fret: u32,
        duration: f64,
        power: f64,
    ) -> Result<Waveform, SynthError> {
        let samples = self.duration_samples(duration)?;
        let guitar_string = self
            .strings
            .get_mut(string)
            .ok_or(DomainRangeError::StringIndex { index: string })?;
        guitar_string.fret(fret)?;
        let mut out = guitar_string.render(samples, &mut self.rng)?;
        out.normalize_to(power);
        Ok(out)
    }

    /// All sounding strings plucked together. Each string is normalized on
    /// its own before summing; the sum is not renormalized.
    pub fn pluck_chord(
        &mut self,
        articulation: &Articulation,
        duration: f64,
        power: f64,
    ) -> Result<Waveform, SynthError> {
        let mut out = Waveform::silence(self.duration_samples(duration)?);
        for (string, fret) in articulation.sounding() {
            let plucked = self.pluck_string(string, fret, duration, power)?;
            out.mix_at(0, &plucked);
        }
        Ok(out)
    }

    /// Strum with the configured defaults.
    pub fn strum(
        &mut self,
        chord: impl Into<ChordSpec>,
        duration: f64,
    ) -> Result<Waveform, SynthError> {
        let options = self.config.strum;
        self.strum_chord(chord, duration, &options)
    }

    /// Strike the sounding strings one after another. The k-th sounding
    /// string starts `k * interval` seconds in at `power * power_decay^k`;
    /// anything running past `duration` is cut off.
    pub fn strum_chord(
        &mut self,
        chord: impl Into<ChordSpec>,
        duration: f64,
        options: &StrumOptions,
    ) -> Result<Waveform, SynthError> {
        options.validate()?;
        let articulation = chord.into().resolve()?;
        let mut out = Waveform::silence(self.duration_samples(duration)?);
        let sample_rate = self.config.sample_rate as f64;

        let mut power = options.power;
        let mut struck = 0usize;
        for string in options.direction.order() {
            let Some(fret) = articulation.fret(string) else {
                continue;
            };
            let offset = (struck as f64 * options.interval * sample_rate).round() as usize;
            debug!("strum {articulation}: string {string} fret {fret} at +{offset} power {power:.3}");
            let plucked = self.pluck_string(string, fret, duration, power)?;
            out.mix_at(offset, &plucked);
            struck += 1;
            power *= options.power_decay;
        }
        Ok(out)
    }

    /// The same chord plucked once per duration, back to back.
    pub fn pluck_pattern(
        &mut self,
        articulation: &Articulation,
        durations: &[f64],
    ) -> Result<Waveform, SynthError> {
        let mut out = Waveform::default();
        for &duration in durations {
            out.append(self.pluck_chord(articulation, duration, 1.0)?);
        }
        Ok(out)
    }

    /// Strum each chord of the pattern in turn, back to back.
    pub fn strum_pattern(&mut self, pattern: &StrumPattern) -> Result<Waveform, SynthError> {
        let steps = pattern.steps()?;
        let mut out = Waveform::default();
        for (i, step) in steps.iter().enumerate() {
            debug!(
                "pattern step {i}: {} for {:.3}s {:?}",
                step.articulation, step.duration, step.direction
            );
            let options = StrumOptions {
                power: step.power,
                direction: step.direction,
                ..self.config.strum
            };
            out.append(self.strum_chord(step.articulation, step.duration, &options)?);
        }
        Ok(out)
    }
}

impl std::fmt::Debug for Guitar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guitar")
            .field("config", &self.config)
            .field("strings", &self.strings.len())
            .finish()
    }
}
