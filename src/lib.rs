pub mod analysis; // FFT pitch estimation
pub mod render; // Scales, chords and progressions to waveforms
pub mod synth; // Tone generation and mixing
pub mod theory; // Interval algebra over the 12-tone space

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
