use log::{debug, trace};

/*
Attack/Decay Envelope
=====================

A raw sine wave switched on and off starts and stops mid-cycle, which the
ear hears as a click. Multiplying the buffer by an envelope fades the
edges in and out.

Vocabulary
----------

  gain        The envelope value at one sample (0.0 to 1.0). The output
              sample is `sample * gain`.

  attack      The window at the start of the buffer where gain ramps
              0.0 -> 1.0.

  decay       The window at the end of the buffer where gain ramps
              1.0 -> 0.0.

  body        Everything between the two windows. Gain is 1.0.


The Shape: Linear Ramps
-----------------------

  Gain
    1.0 ┐    ╱‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾╲
        │   ╱                       ╲
        │  ╱                         ╲
    0.0 └─╱───────────────────────────╲──→ Sample
         attack        body          decay

Unlike a gated ADSR there is no sustain level and no note-off: the buffer
length is known up front, so the decay window is simply the last
`decay` samples.


The Math: Inclusive Ramps
-------------------------

Windows are sized from seconds:

    attack = round(attack_secs * sample_rate)
    decay  = round(decay_secs  * sample_rate)

Each ramp hits both of its endpoints exactly:

    attack gain at k (0 <= k < attack) = k / (attack - 1)
    decay  gain at k (0 <= k < decay)  = 1 - k / (decay - 1)

So the first sample of the buffer and the last one are both exactly 0.0.
A 1-sample window is just 0.0.


Short Buffers
-------------

When attack + decay don't fit in the buffer the windows would overlap.
Both are then clamped to at most half the buffer:

    len = 4000, attack = 2205, decay = 4410
      -> attack = 2000, decay = 2000

Halves never overlap (2 * floor(len / 2) <= len), so every sample is in
at most one window.
*/

/// Default attack time: 50ms.
pub const DEFAULT_ATTACK_SECS: f64 = 0.05;
/// Default decay time: 100ms.
pub const DEFAULT_DECAY_SECS: f64 = 0.1;

/// Sample counts for the two ramps of one buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeWindows {
    pub attack: usize,
    pub decay: usize,
}

/// Linear fade-in / fade-out applied to a whole buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackDecay {
    attack_secs: f64,
    decay_secs: f64,
}

impl AttackDecay {
    pub fn new(attack_secs: f64, decay_secs: f64) -> Self {
        Self {
            attack_secs: attack_secs.max(0.0),
            decay_secs: decay_secs.max(0.0),
        }
    }

    /// No shaping at all.
    pub fn flat() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn attack_secs(&self) -> f64 {
        self.attack_secs
    }

    pub fn decay_secs(&self) -> f64 {
        self.decay_secs
    }

    /// Window sizes for a buffer of `len` samples, clamped so they never overlap.
    pub fn windows(&self, len: usize, sample_rate: u32) -> EnvelopeWindows {
        let mut attack = seconds_to_samples(self.attack_secs, sample_rate);
        let mut decay = seconds_to_samples(self.decay_secs, sample_rate);

        if attack.saturating_add(decay) > len {
            let half = len / 2;
            debug!(
                "envelope windows {}+{} exceed {} samples, clamping to {}",
                attack, decay, len, half
            );
            attack = attack.min(half);
            decay = decay.min(half);
        }

        EnvelopeWindows { attack, decay }
    }

    /// Gain at one sample of a `len`-sample buffer.
    pub fn gain_at(&self, index: usize, len: usize, sample_rate: u32) -> f32 {
        let EnvelopeWindows { attack, decay } = self.windows(len, sample_rate);
        gain(index, len, attack, decay)
    }

    /// Multiply a buffer in place by the envelope.
    pub fn apply(&self, buffer: &mut [f32], sample_rate: u32) {
        let len = buffer.len();
        let EnvelopeWindows { attack, decay } = self.windows(len, sample_rate);
        trace!("envelope over {} samples: attack {}, decay {}", len, attack, decay);

        for (k, sample) in buffer[..attack].iter_mut().enumerate() {
            *sample *= rise(k, attack);
        }
        for (k, sample) in buffer[len - decay..].iter_mut().enumerate() {
            *sample *= fall(k, decay);
        }
    }
}

impl Default for AttackDecay {
    fn default() -> Self {
        Self::new(DEFAULT_ATTACK_SECS, DEFAULT_DECAY_SECS)
    }
}

#[inline]
fn seconds_to_samples(secs: f64, sample_rate: u32) -> usize {
    let samples = (secs * sample_rate as f64).round();
    if samples.is_finite() && samples > 0.0 {
        samples as usize
    } else {
        0
    }
}

#[inline]
fn gain(index: usize, len: usize, attack: usize, decay: usize) -> f32 {
    if index >= len {
        return 0.0;
    }
    if index < attack {
        rise(index, attack)
    } else if index >= len - decay {
        fall(index - (len - decay), decay)
    } else {
        1.0
    }
}

#[inline]
fn rise(k: usize, window: usize) -> f32 {
    if window <= 1 {
        0.0
    } else {
        k as f32 / (window - 1) as f32
    }
}

#[inline]
fn fall(k: usize, window: usize) -> f32 {
    if window <= 1 {
        0.0
    } else {
        1.0 - k as f32 / (window - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 1_000;

    #[test]
    fn windows_from_seconds() {
        let env = AttackDecay::new(0.05, 0.1);
        let windows = env.windows(1_000, SAMPLE_RATE);
        assert_eq!(windows, EnvelopeWindows { attack: 50, decay: 100 });
    }

    #[test]
    fn short_buffers_clamp_to_half() {
        let env = AttackDecay::new(0.05, 0.2);
        let windows = env.windows(101, SAMPLE_RATE);
        assert_eq!(windows, EnvelopeWindows { attack: 50, decay: 50 });
        assert!(windows.attack + windows.decay <= 101);
    }

    #[test]
    fn huge_times_clamp_without_overflow() {
        let env = AttackDecay::new(1e30, 1e30);
        let windows = env.windows(100, 44_100);
        assert_eq!(windows, EnvelopeWindows { attack: 50, decay: 50 });

        let mut buffer = vec![1.0f32; 100];
        env.apply(&mut buffer, 44_100);
        assert_eq!(buffer[0], 0.0);
        assert_eq!(buffer[99], 0.0);
    }

    #[test]
    fn only_oversized_window_shrinks() {
        let env = AttackDecay::new(0.01, 0.2);
        let windows = env.windows(150, SAMPLE_RATE);
        assert_eq!(windows, EnvelopeWindows { attack: 10, decay: 75 });
    }

    #[test]
    fn edges_are_silent() {
        let env = AttackDecay::default();
        let mut buffer = vec![1.0f32; 1_000];
        env.apply(&mut buffer, SAMPLE_RATE);

        assert_eq!(buffer[0], 0.0);
        assert_eq!(buffer[999], 0.0);
        assert_eq!(buffer[49], 1.0); // end of attack
        assert_eq!(buffer[500], 1.0); // body untouched
        assert_eq!(buffer[900], 1.0); // start of decay
    }

    #[test]
    fn ramps_are_monotonic() {
        let env = AttackDecay::new(0.1, 0.1);
        let mut buffer = vec![1.0f32; 500];
        env.apply(&mut buffer, SAMPLE_RATE);

        assert!(buffer[..100].windows(2).all(|w| w[0] <= w[1]));
        assert!(buffer[400..].windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn gain_at_matches_apply() {
        let env = AttackDecay::new(0.02, 0.03);
        let mut buffer = vec![1.0f32; 200];
        env.apply(&mut buffer, SAMPLE_RATE);

        for (i, &sample) in buffer.iter().enumerate() {
            assert_eq!(sample, env.gain_at(i, 200, SAMPLE_RATE), "sample {}", i);
        }
    }

    #[test]
    fn flat_leaves_buffer_alone() {
        let mut buffer = vec![0.5f32; 64];
        AttackDecay::flat().apply(&mut buffer, SAMPLE_RATE);
        assert!(buffer.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn tiny_buffers() {
        let env = AttackDecay::default();
        let mut empty: Vec<f32> = Vec::new();
        env.apply(&mut empty, SAMPLE_RATE);

        let mut one = vec![1.0f32];
        env.apply(&mut one, SAMPLE_RATE);
        assert_eq!(one[0], 1.0);

        let mut two = vec![1.0f32; 2];
        env.apply(&mut two, SAMPLE_RATE);
        assert_eq!(two, [0.0, 0.0]);
    }
}
