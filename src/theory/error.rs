/// Errors raised by the theory layer.
///
/// All of these are deterministic input errors: nothing is retried and
/// nothing is substituted with a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TheoryError {
    /// Name is not one of the 12 canonical pitch names
    UnknownPitch(String),
    /// Scale, mode or chord name missing from the formula table
    UnknownFormula(String),
    /// Degree tag missing from the diatonic chord mapping
    UnknownDegree(String),
    /// Diatonic derivation needs exactly seven tones
    UnsupportedScaleShape { len: usize },
}

impl std::fmt::Display for TheoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TheoryError::UnknownPitch(name) => write!(f, "unknown pitch '{}'", name),
            TheoryError::UnknownFormula(name) => write!(f, "unknown formula '{}'", name),
            TheoryError::UnknownDegree(tag) => {
                write!(f, "degree '{}' is not in the diatonic chord mapping", tag)
            }
            TheoryError::UnsupportedScaleShape { len } => write!(
                f,
                "diatonic chords need a 7-tone scale, got {} tones",
                len
            ),
        }
    }
}

impl std::error::Error for TheoryError {}
