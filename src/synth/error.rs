/// Errors raised while combining or configuring waveforms.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthError {
    /// Buffers differ in length or sample rate.
    ///
    /// `index` is the position of the first offending waveform; the
    /// expected shape is taken from the first one.
    IncompatibleWaveforms {
        index: usize,
        expected_len: usize,
        expected_rate: u32,
        len: usize,
        rate: u32,
    },
    /// Nothing to mix or join
    Empty,
    /// A config field is out of range
    InvalidConfig { field: &'static str, value: f64 },
}

impl std::fmt::Display for SynthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthError::IncompatibleWaveforms {
                index,
                expected_len,
                expected_rate,
                len,
                rate,
            } => write!(
                f,
                "waveform {} is {} samples at {} Hz, expected {} samples at {} Hz",
                index, len, rate, expected_len, expected_rate
            ),
            SynthError::Empty => write!(f, "no waveforms given"),
            SynthError::InvalidConfig { field, value } => {
                write!(f, "invalid synth config: {} = {}", field, value)
            }
        }
    }
}

impl std::error::Error for SynthError {}
