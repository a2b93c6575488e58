//! FFT pitch estimation for rendered waveforms.
//!
//! Used to check that a rendered note or chord actually sounds at the
//! frequencies it is tagged with.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::synth::Waveform;

/*
Peak Picking
============

The buffer is multiplied by a Hann window and transformed. Bin k of an
N-point FFT sits at

    f(k) = k * sample_rate / N

so a 0.5s buffer at 44.1kHz resolves 2Hz per bin. A tone between two bins
spreads over its neighbours; fitting a parabola through the log magnitude
of the peak bin and its two neighbours recovers the offset:

    delta = 0.5 * (a - c) / (a - 2b + c)      (a, b, c = left, peak, right)
    f     = (k + delta) * sample_rate / N

With a Hann window this lands well inside one bin of the true pitch.
*/

const MIN_POWER: f32 = 1e-12;

/// Frequency of the strongest component, or `None` for silent / tiny buffers.
pub fn peak_frequency(waveform: &Waveform) -> Option<f64> {
    let power = power_spectrum(waveform.samples())?;
    let (k, &p) = power
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.total_cmp(b.1))?;

    if p <= MIN_POWER {
        return None;
    }
    Some(interpolate(&power, k) * bin_width(waveform))
}

/// Frequencies of the `count` strongest spectral peaks, lowest first.
pub fn peaks(waveform: &Waveform, count: usize) -> Vec<f64> {
    let Some(power) = power_spectrum(waveform.samples()) else {
        return Vec::new();
    };

    let mut maxima: Vec<usize> = (1..power.len().saturating_sub(1))
        .filter(|&k| power[k] > MIN_POWER && power[k] > power[k - 1] && power[k] >= power[k + 1])
        .collect();
    maxima.sort_by(|&a, &b| power[b].total_cmp(&power[a]));
    maxima.truncate(count);

    let width = bin_width(waveform);
    let mut found: Vec<f64> = maxima
        .into_iter()
        .map(|k| interpolate(&power, k) * width)
        .collect();
    found.sort_by(f64::total_cmp);
    found
}

/// Hann-windowed power of bins 0..N/2.
fn power_spectrum(samples: &[f32]) -> Option<Vec<f32>> {
    let n = samples.len();
    if n < 4 {
        return None;
    }

    let denom = (n - 1) as f32;
    let mut buffer: Vec<Complex<f32>> = samples
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let w = 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos());
            Complex::new(s * w, 0.0)
        })
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    Some(buffer[..n / 2].iter().map(|c| c.norm_sqr()).collect())
}

/// Fractional bin index of the peak at `k`.
fn interpolate(power: &[f32], k: usize) -> f64 {
    if k == 0 || k + 1 >= power.len() {
        return k as f64;
    }

    let a = (power[k - 1].max(MIN_POWER) as f64).ln();
    let b = (power[k].max(MIN_POWER) as f64).ln();
    let c = (power[k + 1].max(MIN_POWER) as f64).ln();
    let denom = a - 2.0 * b + c;
    if denom.abs() < f64::EPSILON {
        return k as f64;
    }
    k as f64 + (0.5 * (a - c) / denom).clamp(-0.5, 0.5)
}

fn bin_width(waveform: &Waveform) -> f64 {
    waveform.sample_rate() as f64 / waveform.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{mix, tone};

    #[test]
    fn finds_la4() {
        let w = tone(440.0, 0.5, 44_100, 0.5);
        let hz = peak_frequency(&w).unwrap();
        assert!((hz - 440.0).abs() < 1.0, "got {}", hz);
    }

    #[test]
    fn between_bins() {
        // 2Hz bins, so 261.63 is off-grid
        let w = tone(261.63, 0.5, 44_100, 0.5);
        let hz = peak_frequency(&w).unwrap();
        assert!((hz - 261.63).abs() < 1.0, "got {}", hz);
    }

    #[test]
    fn silence_has_no_peak() {
        let w = Waveform::silence(0.1, 44_100);
        assert_eq!(peak_frequency(&w), None);
        assert!(peaks(&w, 3).is_empty());
    }

    #[test]
    fn tiny_buffer() {
        let w = Waveform::from_samples(vec![0.5, -0.5], 44_100, vec![]);
        assert_eq!(peak_frequency(&w), None);
    }

    #[test]
    fn chord_peaks() {
        let freqs = [261.63, 329.63, 392.0];
        let tones: Vec<Waveform> = freqs.iter().map(|&f| tone(f, 1.0, 44_100, 0.5)).collect();
        let chord = mix(&tones).unwrap();

        let found = peaks(&chord, 3);
        assert_eq!(found.len(), 3);
        for (got, want) in found.iter().zip(freqs) {
            assert!((got - want).abs() < 1.0, "got {} want {}", got, want);
        }
    }
}
