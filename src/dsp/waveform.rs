//! Waveform — a fixed-length, time-ordered buffer of mono samples.

use log::warn;

/// Owned mono sample buffer produced by every synthesis call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Waveform {
    samples: Vec<f64>,
}

impl Waveform {
    /// A buffer of `len` zeros.
    pub fn silence(len: usize) -> Self {
        Waveform {
            samples: vec![0.0; len],
        }
    }

    pub fn from_samples(samples: Vec<f64>) -> Self {
        Waveform { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0_f64, |m, &s| m.max(s.abs()))
    }

    /// Sum of squared samples.
    pub fn energy(&self) -> f64 {
        self.samples.iter().map(|s| s * s).sum()
    }

    /// Scale so the peak equals `power`. A silent buffer stays silent.
    pub fn normalize_to(&mut self, power: f64) {
        let peak = self.peak();
        if peak == 0.0 {
            if !self.samples.is_empty() {
                warn!("normalizing a silent buffer of {} samples", self.samples.len());
            }
            return;
        }
        let gain = power / peak;
        for s in &mut self.samples {
            *s *= gain;
        }
    }

    /// Add `other` starting at `offset`. Anything past the end is dropped.
    pub fn mix_at(&mut self, offset: usize, other: &Waveform) {
        if offset >= self.samples.len() {
            return;
        }
        for (dst, &src) in self.samples[offset..].iter_mut().zip(&other.samples) {
            *dst += src;
        }
    }

    /// Append `other` directly after the last sample.
    pub fn append(&mut self, other: Waveform) {
        self.samples.extend(other.samples);
    }

    /// Samples narrowed to `f32` for audio APIs.
    pub fn to_f32(&self) -> Vec<f32> {
        self.samples.iter().map(|&s| s as f32).collect()
    }
}

impl From<Vec<f64>> for Waveform {
    fn from(samples: Vec<f64>) -> Self {
        Waveform::from_samples(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_buffer() {
        let w = Waveform::silence(128);
        assert_eq!(w.len(), 128);
        assert!(w.samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn normalize_scales_peak_to_power() {
        let mut w = Waveform::from_samples(vec![0.25, -0.5, 0.1]);
        w.normalize_to(0.8);
        assert!((w.peak() - 0.8).abs() < 1e-12);
        assert!((w.samples()[1] + 0.8).abs() < 1e-12);
    }

    #[test]
    fn normalize_leaves_silence_alone() {
        let mut w = Waveform::silence(16);
        w.normalize_to(1.0);
        assert!(w.samples().iter().all(|&s| s == 0.0 && !s.is_nan()));
    }

    #[test]
    fn mix_at_truncates_tail() {
        let mut w = Waveform::silence(4);
        w.mix_at(2, &Waveform::from_samples(vec![1.0, 2.0, 3.0]));
        assert_eq!(w.samples(), &[0.0, 0.0, 1.0, 2.0]);
        w.mix_at(10, &Waveform::from_samples(vec![1.0]));
        assert_eq!(w.samples(), &[0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn mix_accumulates() {
        let mut w = Waveform::silence(2);
        w.mix_at(0, &Waveform::from_samples(vec![0.5, 1.0]));
        w.mix_at(0, &Waveform::from_samples(vec![0.3]));
        assert!((w.samples()[0] - 0.8).abs() < 1e-12);
        assert!((w.samples()[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn append_concatenates() {
        let mut w = Waveform::from_samples(vec![1.0]);
        w.append(Waveform::from_samples(vec![2.0, 3.0]));
        assert_eq!(w.samples(), &[1.0, 2.0, 3.0]);
        assert!((w.energy() - 14.0).abs() < 1e-12);
    }
}
