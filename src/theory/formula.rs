//! Named interval formulas for scales, modes and chords.
//!
//! Each formula is an ordered list of semitone offsets from a root. Names
//! are resolved through a closed enumeration per category, so a misspelled
//! name fails with [`TheoryError::UnknownFormula`] instead of silently
//! falling back to some other harmony. Callers that want a default pick it
//! explicitly.

use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::chord::Quality;
use super::error::TheoryError;

/// Scale and mode formulas.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleFormula {
    Chromatic,
    Major,
    NaturalMinor,
    HarmonicMinor,
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
    /// Fundamental, octave, fifth and major third of the harmonic series.
    /// Offsets go past 11 to keep the octave explicit.
    NaturalHarmonics,
}

impl ScaleFormula {
    pub const ALL: [ScaleFormula; 12] = [
        Self::Chromatic,
        Self::Major,
        Self::NaturalMinor,
        Self::HarmonicMinor,
        Self::Ionian,
        Self::Dorian,
        Self::Phrygian,
        Self::Lydian,
        Self::Mixolydian,
        Self::Aeolian,
        Self::Locrian,
        Self::NaturalHarmonics,
    ];

    /// The seven church modes, in order of the major scale degree they start on.
    pub const MODES: [ScaleFormula; 7] = [
        Self::Ionian,
        Self::Dorian,
        Self::Phrygian,
        Self::Lydian,
        Self::Mixolydian,
        Self::Aeolian,
        Self::Locrian,
    ];

    /// Canonical table name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Chromatic => "cromatica",
            Self::Major => "mayor",
            Self::NaturalMinor => "menor",
            Self::HarmonicMinor => "armonica",
            Self::Ionian => "jonica",
            Self::Dorian => "dorica",
            Self::Phrygian => "frigia",
            Self::Lydian => "lidia",
            Self::Mixolydian => "mixolidia",
            Self::Aeolian => "eolio",
            Self::Locrian => "locrio",
            Self::NaturalHarmonics => "armonicos",
        }
    }

    fn english_name(self) -> &'static str {
        match self {
            Self::Chromatic => "chromatic",
            Self::Major => "major",
            Self::NaturalMinor => "minor",
            Self::HarmonicMinor => "harmonic-minor",
            Self::Ionian => "ionian",
            Self::Dorian => "dorian",
            Self::Phrygian => "phrygian",
            Self::Lydian => "lydian",
            Self::Mixolydian => "mixolydian",
            Self::Aeolian => "aeolian",
            Self::Locrian => "locrian",
            Self::NaturalHarmonics => "harmonics",
        }
    }

    /// Semitone offsets from the root.
    pub fn offsets(self) -> &'static [u8] {
        match self {
            Self::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            Self::Major => &[0, 2, 4, 5, 7, 9, 11],
            Self::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
            Self::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            Self::Ionian => &[0, 2, 4, 5, 7, 9, 11],
            Self::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Self::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            Self::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            Self::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            Self::Aeolian => &[0, 2, 3, 5, 7, 8, 10],
            Self::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            Self::NaturalHarmonics => &[0, 12, 7, 4],
        }
    }
}

impl std::fmt::Display for ScaleFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScaleFormula {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|formula| formula.name() == key || formula.english_name() == key)
            .ok_or_else(|| TheoryError::UnknownFormula(s.to_string()))
    }
}

/// Chord formulas for direct construction from a root.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordFormula {
    Major,
    Minor,
    Diminished,
    Augmented,
    DominantSeventh,
    MajorSeventh,
    MinorSeventh,
    HalfDiminishedSeventh,
}

impl ChordFormula {
    pub const ALL: [ChordFormula; 8] = [
        Self::Major,
        Self::Minor,
        Self::Diminished,
        Self::Augmented,
        Self::DominantSeventh,
        Self::MajorSeventh,
        Self::MinorSeventh,
        Self::HalfDiminishedSeventh,
    ];

    /// The three basic triads.
    pub const TRIADS: [ChordFormula; 3] = [Self::Major, Self::Minor, Self::Diminished];

    pub fn name(self) -> &'static str {
        match self {
            Self::Major => "mayor",
            Self::Minor => "menor",
            Self::Diminished => "disminuido",
            Self::Augmented => "aumentado",
            Self::DominantSeventh => "septima",
            Self::MajorSeventh => "mayor7",
            Self::MinorSeventh => "menor7",
            Self::HalfDiminishedSeventh => "semidisminuido",
        }
    }

    fn english_name(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Diminished => "diminished",
            Self::Augmented => "augmented",
            Self::DominantSeventh => "dominant7",
            Self::MajorSeventh => "major7",
            Self::MinorSeventh => "minor7",
            Self::HalfDiminishedSeventh => "half-diminished",
        }
    }

    pub fn offsets(self) -> &'static [u8] {
        match self {
            Self::Major => &[0, 4, 7],
            Self::Minor => &[0, 3, 7],
            Self::Diminished => &[0, 3, 6],
            Self::Augmented => &[0, 4, 8],
            Self::DominantSeventh => &[0, 4, 7, 10],
            Self::MajorSeventh => &[0, 4, 7, 11],
            Self::MinorSeventh => &[0, 3, 7, 10],
            Self::HalfDiminishedSeventh => &[0, 3, 6, 10],
        }
    }

    /// Quality label carried by chords built from this formula.
    pub fn quality(self) -> Quality {
        match self {
            Self::Major => Quality::Major,
            Self::Minor => Quality::Minor,
            Self::Diminished => Quality::Diminished,
            Self::Augmented => Quality::Augmented,
            Self::DominantSeventh => Quality::DominantSeventh,
            Self::MajorSeventh => Quality::MajorSeventh,
            Self::MinorSeventh => Quality::MinorSeventh,
            Self::HalfDiminishedSeventh => Quality::HalfDiminishedSeventh,
        }
    }
}

impl std::fmt::Display for ChordFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChordFormula {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|formula| formula.name() == key || formula.english_name() == key)
            .ok_or_else(|| TheoryError::UnknownFormula(s.to_string()))
    }
}

/// Offsets of a scale or mode by name.
pub fn scale_offsets(name: &str) -> Result<&'static [u8], TheoryError> {
    name.parse::<ScaleFormula>().map(ScaleFormula::offsets)
}

/// Offsets of a chord type by name.
pub fn chord_offsets(name: &str) -> Result<&'static [u8], TheoryError> {
    name.parse::<ChordFormula>().map(ChordFormula::offsets)
}
