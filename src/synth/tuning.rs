//! Equal-temperament pitch-to-frequency conversion.

/*
Equal Temperament
=================

Adjacent semitones share one constant frequency ratio, 2^(1/12), so twelve
of them make exactly one octave (ratio 2).

Indices here count semitones from Do4 (middle C):

   index   0     9      12    21
   note    Do4   La4    Do5   La5
   Hz      261.6 440.0  523.3 880.0

The reference pitch La4 sits at index 9, so

    f(i) = reference_hz * 2^((i - 9) / 12)

which gives f(9) = reference_hz exactly (2^0 = 1) and f(21) = twice that.
Negative indices reach down into lower octaves.
*/

/// Concert pitch for La4 (A4).
pub const REFERENCE_HZ: f64 = 440.0;

/// Index of the reference pitch, counted in semitones from Do4.
pub const REFERENCE_INDEX: i32 = 9;

/// Octave number that index 0..12 falls in.
pub const BASE_OCTAVE: i32 = 4;

/// Maps semitone indices to frequencies around a reference pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub reference_hz: f64,
}

impl Tuning {
    pub fn new(reference_hz: f64) -> Self {
        Self { reference_hz }
    }

    /// Frequency of a semitone index (0 = Do4, 9 = La4).
    pub fn frequency_of(&self, pitch_index: i32) -> f64 {
        let semitones = (pitch_index - REFERENCE_INDEX) as f64;
        self.reference_hz * 2.0_f64.powf(semitones / 12.0)
    }

    /// Frequency of a pitch class (0..12) in a given octave.
    pub fn pitch_frequency(&self, pitch_class: usize, octave: i32) -> f64 {
        self.frequency_of(pitch_index(pitch_class, octave))
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::new(REFERENCE_HZ)
    }
}

/// Semitone index of a pitch class in an octave, relative to Do4.
#[inline]
pub fn pitch_index(pitch_class: usize, octave: i32) -> i32 {
    pitch_class as i32 + 12 * (octave - BASE_OCTAVE)
}

/// Frequency of a semitone index at A440.
#[inline]
pub fn frequency_of(pitch_index: i32) -> f64 {
    Tuning::default().frequency_of(pitch_index)
}
