pub mod config;
pub mod dsp;
pub mod error;
pub mod guitar;
pub mod theory;

use crate::config::GuitarConfig;
use crate::error::SynthError;
use crate::guitar::Guitar;
use crate::guitar::pattern::StrumPattern;
use wasm_bindgen::prelude::*;

pub use crate::dsp::waveform::Waveform;
pub use crate::guitar::chords::{Articulation, CHORD_ARTICULATIONS, ChordSpec, chord_articulation};

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the fretboard-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: names of every chord in the built-in table.
#[wasm_bindgen]
pub fn chord_names() -> Result<JsValue, JsValue> {
    let names: Vec<&str> = guitar::chords::chord_names().collect();
    serde_wasm_bindgen::to_value(&names).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// Strum a named chord on a fresh standard-tuned guitar.
pub fn strum_named_chord(
    name: &str,
    duration: f64,
    sample_rate: u32,
    seed: u64,
) -> Result<Waveform, SynthError> {
    let mut guitar = Guitar::seeded(GuitarConfig::with_sample_rate(sample_rate), seed)?;
    guitar.strum(name, duration)
}

/// Render a JSON strum pattern on a fresh standard-tuned guitar.
pub fn render_pattern_json(
    pattern_json: &str,
    sample_rate: u32,
    seed: u64,
) -> Result<Waveform, SynthError> {
    let pattern = StrumPattern::from_json(pattern_json)?;
    let mut guitar = Guitar::seeded(GuitarConfig::with_sample_rate(sample_rate), seed)?;
    guitar.strum_pattern(&pattern)
}

/// WASM-exposed: strum a named chord and return mono f32 samples.
#[wasm_bindgen]
pub fn render_chord(
    name: &str,
    duration: f64,
    sample_rate: u32,
    seed: u64,
) -> Result<Vec<f32>, JsValue> {
    strum_named_chord(name, duration, sample_rate, seed)
        .map(|w| w.to_f32())
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: render a JSON strum pattern to mono f32 samples.
/// Returns the raw audio buffer for AudioWorklet playback.
#[wasm_bindgen]
pub fn render_strum_pattern(
    pattern_json: &str,
    sample_rate: u32,
    seed: u64,
) -> Result<Vec<f32>, JsValue> {
    render_pattern_json(pattern_json, sample_rate, seed)
        .map(|w| w.to_f32())
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}
