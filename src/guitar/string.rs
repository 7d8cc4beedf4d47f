//! Guitar string — a Karplus-Strong digital waveguide.
//!
//! A wavetable one period long is filled with random ±1 values on every
//! pluck. Each sample either passes through unchanged or is averaged with
//! the previously emitted sample; the chance of averaging is
//! `1 / stretch_factor`, so a larger stretch factor decays more slowly.

use log::trace;
use rand::{Rng, RngCore};

use super::fret::FretGeometry;
use crate::dsp::SampleSource;
use crate::error::SynthError;
use crate::theory::Note;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Parameters changed since the last pluck.
    Idle,
    Sounding,
}

#[derive(Debug, Clone)]
pub struct GuitarString {
    base_note: Note,
    note: Note,
    pitch: f64,
    sample_rate: f64,
    base_stretch_factor: f64,
    stretch_factor: f64,
    geometry: FretGeometry,
    wavetable: Vec<f64>,
    current_sample: usize,
    previous_value: f64,
    state: State,
}

impl GuitarString {
    /// An open string tuned to `tuning`. `stretch_factor` must be at least 1.
    pub fn new(
        tuning: Note,
        sample_rate: f64,
        stretch_factor: f64,
        geometry: FretGeometry,
    ) -> Result<Self, SynthError> {
        if !(stretch_factor >= 1.0 && stretch_factor.is_finite()) {
            return Err(SynthError::InvalidConfig(format!(
                "stretch factor {stretch_factor} must be a finite value >= 1"
            )));
        }
        if !(sample_rate > 0.0 && sample_rate.is_finite()) {
            return Err(SynthError::InvalidConfig(format!(
                "sample rate {sample_rate} must be positive"
            )));
        }
        Ok(GuitarString {
            base_note: tuning,
            note: tuning,
            pitch: tuning.frequency(),
            sample_rate,
            base_stretch_factor: stretch_factor,
            stretch_factor,
            geometry,
            wavetable: Vec::new(),
            current_sample: 0,
            previous_value: 0.0,
            state: State::Idle,
        })
    }

    /// Press the string at `fret`. Only the pitch and stretch factor
    /// change; the next [`SampleSource::restart`] plucks the new note.
    /// On error the string is left untouched.
    pub fn fret(&mut self, fret: u32) -> Result<(), SynthError> {
        let note = self.base_note.step_up(fret)?;
        let stretch_factor = self.geometry.stretch_factor(self.base_stretch_factor, fret)?;
        self.note = note;
        self.pitch = note.frequency();
        self.stretch_factor = stretch_factor;
        self.state = State::Idle;
        trace!(
            "fretted {} at {fret}: {note} {:.2} Hz, stretch {:.3}",
            self.base_note, self.pitch, self.stretch_factor
        );
        Ok(())
    }

    pub fn base_note(&self) -> Note {
        self.base_note
    }

    /// Currently fretted note.
    pub fn note(&self) -> Note {
        self.note
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn base_stretch_factor(&self) -> f64 {
        self.base_stretch_factor
    }

    pub fn stretch_factor(&self) -> f64 {
        self.stretch_factor
    }

    /// Wavetable length for the current pitch: one period, at least one sample.
    pub fn period_samples(&self) -> usize {
        ((self.sample_rate / self.pitch).round() as usize).max(1)
    }

    pub fn wavetable(&self) -> &[f64] {
        &self.wavetable
    }

    pub fn is_sounding(&self) -> bool {
        self.state == State::Sounding
    }
}

impl SampleSource for GuitarString {
    fn restart(&mut self, rng: &mut dyn RngCore) {
        let size = self.period_samples();
        self.wavetable = (0..size)
            .map(|_| if rng.random_bool(0.5) { 1.0 } else { -1.0 })
            .collect();
        self.current_sample = 0;
        self.previous_value = 0.0;
        self.state = State::Sounding;
    }

    fn next_sample(&mut self, rng: &mut dyn RngCore) -> Result<f64, SynthError> {
        if self.state != State::Sounding {
            return Err(SynthError::UninitializedGenerator);
        }
        let i = self.current_sample % self.wavetable.len();
        if !rng.random_bool(1.0 - 1.0 / self.stretch_factor) {
            self.wavetable[i] = 0.5 * (self.wavetable[i] + self.previous_value);
        }
        let sample = self.wavetable[i];
        self.previous_value = sample;
        self.current_sample += 1;
        Ok(sample)
    }
}
