//! Interval algebra: pitch classes, formulas, scales, chords, progressions.
//!
//! Everything here is a pure function over immutable, process-wide tables.
//! Nothing in this module produces sound; see [`crate::render`] for turning
//! results into waveforms.

/// Diatonic and direct chord construction.
pub mod chord;
/// Typed errors for every theory operation.
pub mod error;
/// Named semitone-offset tables.
pub mod formula;
/// The 12-tone chromatic space and its single modulo point.
pub mod pitch;
/// Degree sequences bound to chords.
pub mod progression;
/// Root + formula -> ordered pitch sequence.
pub mod scale;

pub use chord::{
    basic_triads, build_chord, diatonic_chords, diatonic_sevenths, functional_triads, Chord,
    ChordKind, Degree, DiatonicChords, FunctionGroup, HarmonicFunction, Quality,
};
pub use error::TheoryError;
pub use formula::{ChordFormula, ScaleFormula};
pub use pitch::{Notation, PitchClass};
pub use progression::{
    build_progression, common_progression, NamedProgression, Progression, ProgressionStep,
    COMMON_PROGRESSIONS,
};
pub use scale::{build_scale, modes_of, natural_harmonics, Harmonic, Partial, Scale};
