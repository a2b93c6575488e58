//! Sine tone generation and the `Waveform` buffer type.

use std::f64::consts::TAU;

use log::trace;

use super::envelope::AttackDecay;
use super::error::SynthError;

/// A finite mono sample buffer at a fixed rate, tagged with what produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f32>,
    sample_rate: u32,
    frequencies: Vec<f64>,
    duration_secs: f64,
}

impl Waveform {
    /// Wrap raw samples. Duration is derived from the sample count.
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32, frequencies: Vec<f64>) -> Self {
        let duration_secs = if sample_rate == 0 {
            0.0
        } else {
            samples.len() as f64 / sample_rate as f64
        };
        Self {
            samples,
            sample_rate,
            frequencies,
            duration_secs,
        }
    }

    /// All-zero buffer, used for gaps between notes.
    pub fn silence(duration_secs: f64, sample_rate: u32) -> Self {
        let len = sample_count(duration_secs, sample_rate);
        Self {
            samples: vec![0.0; len],
            sample_rate,
            frequencies: Vec::new(),
            duration_secs: duration_secs.max(0.0),
        }
    }

    /// Join buffers end to end. All of them must share a sample rate.
    pub fn concat(parts: &[Waveform]) -> Result<Waveform, SynthError> {
        let first = parts.first().ok_or(SynthError::Empty)?;

        if let Some((index, bad)) = parts
            .iter()
            .enumerate()
            .find(|(_, w)| w.sample_rate != first.sample_rate)
        {
            return Err(SynthError::IncompatibleWaveforms {
                index,
                expected_len: first.len(),
                expected_rate: first.sample_rate,
                len: bad.len(),
                rate: bad.sample_rate,
            });
        }

        let total: usize = parts.iter().map(Waveform::len).sum();
        let mut samples = Vec::with_capacity(total);
        let mut frequencies = Vec::new();
        let mut duration_secs = 0.0;
        for part in parts {
            samples.extend_from_slice(&part.samples);
            frequencies.extend_from_slice(&part.frequencies);
            duration_secs += part.duration_secs;
        }

        Ok(Waveform {
            samples,
            sample_rate: first.sample_rate,
            frequencies,
            duration_secs,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Source frequencies, one per mixed tone. Empty for silence.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    pub(crate) fn set_frequencies(&mut self, frequencies: Vec<f64>) {
        self.frequencies = frequencies;
    }
}

/// `round(sample_rate * duration)`, or 0 for negative / non-finite durations.
#[inline]
pub fn sample_count(duration_secs: f64, sample_rate: u32) -> usize {
    let n = (duration_secs * sample_rate as f64).round();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}

/// Enveloped sine tone with the default 50ms attack / 100ms decay.
pub fn tone(frequency_hz: f64, duration_secs: f64, sample_rate: u32, amplitude: f32) -> Waveform {
    tone_with_envelope(
        frequency_hz,
        duration_secs,
        sample_rate,
        amplitude,
        &AttackDecay::default(),
    )
}

/// `amplitude * sin(2π f t)` over `[0, duration)`, shaped by `envelope`.
pub fn tone_with_envelope(
    frequency_hz: f64,
    duration_secs: f64,
    sample_rate: u32,
    amplitude: f32,
    envelope: &AttackDecay,
) -> Waveform {
    let n = sample_count(duration_secs, sample_rate);
    trace!(
        "tone {:.3} Hz, {} samples at {} Hz, amplitude {}",
        frequency_hz,
        n,
        sample_rate,
        amplitude
    );

    // t_i = i * duration / n keeps the grid exactly on [0, duration)
    let step = if n == 0 { 0.0 } else { duration_secs / n as f64 };
    let mut samples: Vec<f32> = (0..n)
        .map(|i| {
            let t = i as f64 * step;
            amplitude * (TAU * frequency_hz * t).sin() as f32
        })
        .collect();

    envelope.apply(&mut samples, sample_rate);

    Waveform {
        samples,
        sample_rate,
        frequencies: vec![frequency_hz],
        duration_secs: if n == 0 { 0.0 } else { duration_secs },
    }
}
