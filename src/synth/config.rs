#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::envelope::{AttackDecay, DEFAULT_ATTACK_SECS, DEFAULT_DECAY_SECS};
use super::error::SynthError;
use super::tuning::{Tuning, REFERENCE_HZ};
use crate::DEFAULT_SAMPLE_RATE;

/// Rendering parameters shared by every note, chord and progression.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthConfig {
    pub sample_rate: u32,
    /// Peak level of each tone, 0.0..=1.0
    pub amplitude: f32,
    pub attack_secs: f64,
    pub decay_secs: f64,
    /// Length of one scale note
    pub note_secs: f64,
    /// Length of one chord
    pub chord_secs: f64,
    /// Silence between consecutive notes or chords
    pub gap_secs: f64,
    /// Frequency of La4
    pub reference_hz: f64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            amplitude: 0.5,
            attack_secs: DEFAULT_ATTACK_SECS,
            decay_secs: DEFAULT_DECAY_SECS,
            note_secs: 0.5,
            chord_secs: 1.0,
            gap_secs: 0.2,
            reference_hz: REFERENCE_HZ,
        }
    }
}

impl SynthConfig {
    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn attack(mut self, secs: f64) -> Self {
        self.attack_secs = secs;
        self
    }

    pub fn decay(mut self, secs: f64) -> Self {
        self.decay_secs = secs;
        self
    }

    pub fn note_secs(mut self, secs: f64) -> Self {
        self.note_secs = secs;
        self
    }

    pub fn chord_secs(mut self, secs: f64) -> Self {
        self.chord_secs = secs;
        self
    }

    pub fn gap_secs(mut self, secs: f64) -> Self {
        self.gap_secs = secs;
        self
    }

    pub fn reference_hz(mut self, hz: f64) -> Self {
        self.reference_hz = hz;
        self
    }

    pub fn envelope(&self) -> AttackDecay {
        AttackDecay::new(self.attack_secs, self.decay_secs)
    }

    pub fn tuning(&self) -> Tuning {
        Tuning::new(self.reference_hz)
    }

    /// Reject values that would produce no sound or NaN samples.
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.sample_rate == 0 {
            return Err(invalid("sample_rate", self.sample_rate as f64));
        }
        if !(0.0..=1.0).contains(&self.amplitude) {
            return Err(invalid("amplitude", self.amplitude as f64));
        }
        if !(self.reference_hz.is_finite() && self.reference_hz > 0.0) {
            return Err(invalid("reference_hz", self.reference_hz));
        }

        let durations = [
            ("attack_secs", self.attack_secs),
            ("decay_secs", self.decay_secs),
            ("note_secs", self.note_secs),
            ("chord_secs", self.chord_secs),
            ("gap_secs", self.gap_secs),
        ];
        for (field, value) in durations {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, value));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, value: f64) -> SynthError {
    SynthError::InvalidConfig { field, value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SynthConfig::default();
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.amplitude, 0.5);
        assert_eq!(config.attack_secs, 0.05);
        assert_eq!(config.decay_secs, 0.1);
        assert_eq!(config.reference_hz, 440.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let config = SynthConfig::default()
            .sample_rate(48_000)
            .amplitude(0.25)
            .gap_secs(0.0)
            .reference_hz(432.0);

        assert_eq!(config.sample_rate, 48_000);
        assert_eq!(config.amplitude, 0.25);
        assert_eq!(config.gap_secs, 0.0);
        assert_eq!(config.tuning().frequency_of(9), 432.0);
    }

    #[test]
    fn envelope_follows_config() {
        let env = SynthConfig::default().attack(0.01).decay(0.2).envelope();
        assert_eq!(env.attack_secs(), 0.01);
        assert_eq!(env.decay_secs(), 0.2);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            SynthConfig::default().sample_rate(0).validate(),
            Err(SynthError::InvalidConfig {
                field: "sample_rate",
                value: 0.0
            })
        );
        assert!(SynthConfig::default().amplitude(1.5).validate().is_err());
        assert!(SynthConfig::default().reference_hz(-440.0).validate().is_err());
        assert!(SynthConfig::default().note_secs(f64::NAN).validate().is_err());
        assert!(SynthConfig::default().gap_secs(-0.1).validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_take_defaults() {
        let config: SynthConfig =
            serde_json::from_str(r#"{ "sample_rate": 48000, "gap_secs": 0.0 }"#).unwrap();
        assert_eq!(config.sample_rate, 48_000);
        assert_eq!(config.gap_secs, 0.0);
        assert_eq!(config.amplitude, 0.5);
        assert_eq!(config.note_secs, 0.5);
    }
}
