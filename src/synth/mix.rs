//! Mean mixing of equal-shape waveforms into one chord buffer.

/*
Mean Mixing
===========

A chord is its tones played at once: the buffers are ADDED sample by
sample. Summing N tones that each peak at `amplitude` can reach
N * amplitude, so the sum is divided by N (the arithmetic mean):

    Tone A:   [ 0.5,  0.3, -0.2]
    Tone B:   [ 0.5, -0.1, -0.4]
    Mean:     [ 0.5,  0.1, -0.3]

The mean never exceeds the loudest input, so a chord is never louder than
a single note rendered at the same amplitude.


Shape Rules
-----------

Every input must have the same length AND sample rate as the first one.
A mismatch is an error, not something to repair:

    mix([4410 samples @ 44100, 2205 samples @ 44100])
      -> IncompatibleWaveforms { index: 1, ... }

Zipping the buffers would silently drop the tail of the longer ones;
padding would change the tone's decay. Neither happens here.

A single input comes back as an exact copy. Dividing by 1.0 is exact in
IEEE arithmetic too, but the copy path skips the loop entirely.
*/

use super::error::SynthError;
use super::tone::Waveform;

/// Sample-wise arithmetic mean of equal-shape waveforms.
///
/// The result is tagged with every input's frequencies, in order.
pub fn mix(waveforms: &[Waveform]) -> Result<Waveform, SynthError> {
    let first = waveforms.first().ok_or(SynthError::Empty)?;
    check_shapes(waveforms)?;

    if waveforms.len() == 1 {
        return Ok(first.clone());
    }

    let mut out = Waveform::from_samples(
        first.samples().to_vec(),
        first.sample_rate(),
        Vec::with_capacity(waveforms.len()),
    );
    for w in &waveforms[1..] {
        sum_in_place(out.samples_mut(), w.samples());
    }
    scale_in_place(out.samples_mut(), 1.0 / waveforms.len() as f32);

    out.set_frequencies(
        waveforms
            .iter()
            .flat_map(|w| w.frequencies().iter().copied())
            .collect(),
    );
    Ok(out)
}

fn check_shapes(waveforms: &[Waveform]) -> Result<(), SynthError> {
    let Some(first) = waveforms.first() else {
        return Err(SynthError::Empty);
    };

    for (index, w) in waveforms.iter().enumerate().skip(1) {
        if w.len() != first.len() || w.sample_rate() != first.sample_rate() {
            return Err(SynthError::IncompatibleWaveforms {
                index,
                expected_len: first.len(),
                expected_rate: first.sample_rate(),
                len: w.len(),
                rate: w.sample_rate(),
            });
        }
    }
    Ok(())
}

/// Add signal B into signal A in-place.
///
/// Can exceed [-1.0, +1.0]; callers scale afterwards.
#[inline]
pub fn sum_in_place(a: &mut [f32], b: &[f32]) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa += sb;
    }
}

#[inline]
fn scale_in_place(buffer: &mut [f32], gain: f32) {
    for sample in buffer.iter_mut() {
        *sample *= gain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave(samples: &[f32], rate: u32, hz: f64) -> Waveform {
        Waveform::from_samples(samples.to_vec(), rate, vec![hz])
    }

    #[test]
    fn test_mix_single_is_identity() {
        let w = wave(&[0.1, -0.7, 0.333, 0.0], 100, 440.0);
        let mixed = mix(std::slice::from_ref(&w)).unwrap();
        assert_eq!(mixed, w);
    }

    #[test]
    fn test_mix_mean() {
        let a = wave(&[1.0, 0.5, -0.5, -1.0], 100, 261.6);
        let b = wave(&[0.0, 0.5, 0.5, 0.0], 100, 329.6);
        let mixed = mix(&[a, b]).unwrap();

        assert_eq!(mixed.samples(), [0.5, 0.5, 0.0, -0.5]);
        assert_eq!(mixed.frequencies(), [261.6, 329.6]);
        assert_eq!(mixed.sample_rate(), 100);
    }

    #[test]
    fn test_mix_three() {
        let a = wave(&[0.3], 10, 1.0);
        let b = wave(&[0.6], 10, 2.0);
        let c = wave(&[0.9], 10, 3.0);
        let mixed = mix(&[a, b, c]).unwrap();
        assert!((mixed.samples()[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_mix_length_mismatch() {
        let a = wave(&[0.0; 4], 100, 1.0);
        let b = wave(&[0.0; 3], 100, 2.0);
        assert_eq!(
            mix(&[a, b]),
            Err(SynthError::IncompatibleWaveforms {
                index: 1,
                expected_len: 4,
                expected_rate: 100,
                len: 3,
                rate: 100,
            })
        );
    }

    #[test]
    fn test_mix_rate_mismatch() {
        let a = wave(&[0.0; 4], 100, 1.0);
        let b = wave(&[0.0; 4], 100, 2.0);
        let c = wave(&[0.0; 4], 200, 3.0);
        let err = mix(&[a, b, c]).unwrap_err();
        assert!(matches!(
            err,
            SynthError::IncompatibleWaveforms { index: 2, rate: 200, .. }
        ));
    }

    #[test]
    fn test_mix_empty() {
        assert_eq!(mix(&[]), Err(SynthError::Empty));
    }

    #[test]
    fn test_sum_in_place() {
        let mut a = [1.0, 0.5, -0.5];
        sum_in_place(&mut a, &[1.0, 0.25, 0.25]);
        assert_eq!(a, [2.0, 0.75, -0.25]);
    }
}
