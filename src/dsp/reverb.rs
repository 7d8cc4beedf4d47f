//! Reverb effect — convolution with a room impulse response.
//!
//! The impulse response comes from an [`ImpulseResponseSource`]. Geometric
//! room simulations (image-source models and the like) live outside this
//! crate and are plugged in through [`RecordedResponse`]; [`SchroederRoom`]
//! renders a response locally from a comb/allpass network.

use super::Effect;
use super::waveform::Waveform;
use crate::error::SynthError;

/// Something that can produce a room impulse response.
pub trait ImpulseResponseSource {
    /// Impulse response lasting roughly `reverb_time` seconds.
    fn impulse_response(&self, reverb_time: f64, sample_rate: f64) -> Vec<f64>;
}

/// An impulse response computed elsewhere, used as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedResponse(pub Vec<f64>);

impl ImpulseResponseSource for RecordedResponse {
    fn impulse_response(&self, _reverb_time: f64, _sample_rate: f64) -> Vec<f64> {
        self.0.clone()
    }
}

/// A comb filter delay line with damped feedback.
#[derive(Debug, Clone)]
struct CombFilter {
    buffer: Vec<f64>,
    index: usize,
    feedback: f64,
    damp: f64,
    filterstore: f64,
}

impl CombFilter {
    fn new(size: usize, feedback: f64, damp: f64) -> Self {
        Self {
            buffer: vec![0.0; size.max(1)],
            index: 0,
            feedback,
            damp,
            filterstore: 0.0,
        }
    }

    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        let output = self.buffer[self.index];
        self.filterstore = output * (1.0 - self.damp) + self.filterstore * self.damp;
        self.buffer[self.index] = input + self.filterstore * self.feedback;
        self.index = (self.index + 1) % self.buffer.len();
        output
    }
}

/// An allpass filter delay line.
#[derive(Debug, Clone)]
struct AllpassFilter {
    buffer: Vec<f64>,
    index: usize,
}

impl AllpassFilter {
    fn new(size: usize) -> Self {
        Self {
            buffer: vec![0.0; size.max(1)],
            index: 0,
        }
    }

    #[inline]
    fn process(&mut self, input: f64) -> f64 {
        let bufout = self.buffer[self.index];
        self.buffer[self.index] = input + bufout * 0.5;
        self.index = (self.index + 1) % self.buffer.len();
        bufout - input
    }
}

// Tuning constants (scaled for 44100 Hz sample rate)
const COMB_TUNING: [usize; 8] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];
const ALLPASS_TUNING: [usize; 4] = [556, 441, 341, 225];
/// Peak of the reverberant tail relative to the direct sound.
const TAIL_LEVEL: f64 = 0.5;

/// A synthetic room: direct sound followed by a Schroeder reverb tail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchroederRoom {
    /// Room size (0.0 to 1.0). Longer feedback for larger rooms.
    pub room_size: f64,
    /// Damping (0.0 to 1.0). Higher = darker tail.
    pub damping: f64,
}

pub const SMALL_ROOM: SchroederRoom = SchroederRoom { room_size: 0.2, damping: 0.6 };
pub const MEDIUM_ROOM: SchroederRoom = SchroederRoom { room_size: 0.5, damping: 0.5 };
pub const LARGE_ROOM: SchroederRoom = SchroederRoom { room_size: 0.75, damping: 0.4 };
pub const ARENA: SchroederRoom = SchroederRoom { room_size: 0.95, damping: 0.25 };

impl ImpulseResponseSource for SchroederRoom {
    fn impulse_response(&self, reverb_time: f64, sample_rate: f64) -> Vec<f64> {
        let scale = sample_rate / 44100.0;
        let feedback = self.room_size.clamp(0.0, 1.0) * 0.28 + 0.7;
        let damp = self.damping.clamp(0.0, 1.0);

        let mut combs: Vec<_> = COMB_TUNING
            .iter()
            .map(|&t| CombFilter::new((t as f64 * scale) as usize, feedback, damp))
            .collect();
        let mut allpasses: Vec<_> = ALLPASS_TUNING
            .iter()
            .map(|&t| AllpassFilter::new((t as f64 * scale) as usize))
            .collect();

        let len = ((reverb_time.max(0.0) * sample_rate).round() as usize).max(1);
        let mut tail = Vec::with_capacity(len);
        for i in 0..len {
            let input = if i == 0 { 1.0 } else { 0.0 };
            let mut out: f64 = combs.iter_mut().map(|c| c.process(input)).sum();
            for allpass in &mut allpasses {
                out = allpass.process(out);
            }
            tail.push(out);
        }

        let mut tail = Waveform::from_samples(tail);
        tail.normalize_to(TAIL_LEVEL);
        let mut ir = tail.into_samples();
        ir[0] += 1.0;
        ir
    }
}

/// Fully wet convolution reverb.
#[derive(Debug, Clone)]
pub struct Reverb {
    impulse_response: Vec<f64>,
    history: Vec<f64>,
    pos: usize,
}

impl Reverb {
    pub fn new(
        source: &dyn ImpulseResponseSource,
        sample_rate: f64,
        reverb_time: f64,
    ) -> Result<Self, SynthError> {
        let impulse_response = source.impulse_response(reverb_time, sample_rate);
        if impulse_response.is_empty() {
            return Err(SynthError::InvalidConfig("empty impulse response".to_string()));
        }
        let history = vec![0.0; impulse_response.len()];
        Ok(Reverb {
            impulse_response,
            history,
            pos: 0,
        })
    }

    pub fn impulse_response(&self) -> &[f64] {
        &self.impulse_response
    }
}

impl Effect for Reverb {
    fn process(&mut self, input: f64) -> f64 {
        let len = self.history.len();
        self.history[self.pos] = input;
        let mut out = 0.0;
        for (k, &h) in self.impulse_response.iter().enumerate() {
            out += h * self.history[(self.pos + len - k) % len];
        }
        self.pos = (self.pos + 1) % len;
        out
    }

    /// Full convolution (`signal + ir - 1` samples), peak-normalized.
    fn apply(&mut self, signal: &[f64]) -> Waveform {
        if signal.is_empty() {
            return Waveform::default();
        }
        let ir = &self.impulse_response;
        let mut out = vec![0.0; signal.len() + ir.len() - 1];
        for (i, &s) in signal.iter().enumerate() {
            if s == 0.0 {
                continue;
            }
            for (k, &h) in ir.iter().enumerate() {
                out[i + k] += s * h;
            }
        }
        let mut out = Waveform::from_samples(out);
        out.normalize_to(1.0);
        out
    }

    fn reset(&mut self) {
        self.history.fill(0.0);
        self.pos = 0;
    }
}
