//! Effect chain — a sample source threaded through an ordered list of effects.

use rand::RngCore;

use super::{Effect, SampleSource};
use crate::error::SynthError;

/// A source plus effects, itself usable as a [`SampleSource`].
pub struct EffectChain {
    source: Box<dyn SampleSource>,
    effects: Vec<Box<dyn Effect>>,
    started: bool,
}

impl EffectChain {
    pub fn new(source: Box<dyn SampleSource>) -> Self {
        EffectChain {
            source,
            effects: Vec::new(),
            started: false,
        }
    }

    /// Append an effect; effects run in insertion order.
    pub fn add_effect(&mut self, effect: Box<dyn Effect>) {
        self.effects.push(effect);
    }

    pub fn with_effect(mut self, effect: Box<dyn Effect>) -> Self {
        self.add_effect(effect);
        self
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl SampleSource for EffectChain {
    fn restart(&mut self, rng: &mut dyn RngCore) {
        self.source.restart(rng);
        for effect in &mut self.effects {
            effect.reset();
        }
        self.started = true;
    }

    fn next_sample(&mut self, rng: &mut dyn RngCore) -> Result<f64, SynthError> {
        if !self.started {
            return Err(SynthError::UninitializedGenerator);
        }
        let mut value = self.source.next_sample(rng)?;
        for effect in &mut self.effects {
            value = effect.process(value);
        }
        Ok(value)
    }
}
