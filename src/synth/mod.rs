//! Tone synthesis: frequencies in, enveloped and mixed sample buffers out.
//!
//! This layer knows nothing about scales or chords. It takes plain
//! frequencies and durations; [`crate::render`] bridges the two.

/// Rendering parameters and their defaults.
pub mod config;
/// Linear attack/decay envelope.
pub mod envelope;
pub mod error;
/// Sample-wise mean of equal-shape buffers.
pub mod mix;
/// Sine tones and the `Waveform` buffer.
pub mod tone;
/// Equal-temperament frequency mapping.
pub mod tuning;

pub use config::SynthConfig;
pub use envelope::{AttackDecay, EnvelopeWindows};
pub use error::SynthError;
pub use mix::mix;
pub use tone::{tone, tone_with_envelope, Waveform};
pub use tuning::{frequency_of, Tuning};
