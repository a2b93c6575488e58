//! Scale construction: root + formula -> ordered pitch classes.

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::TheoryError;
use super::formula::ScaleFormula;
use super::pitch::{self, Notation, PitchClass};

/// An ordered, immutable sequence of pitch classes built from one root.
///
/// Degree positions are 0-based and meaningful: diatonic chord derivation
/// selects members by position.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    root: PitchClass,
    formula: Option<ScaleFormula>,
    offsets: Vec<u8>,
    notes: Vec<PitchClass>,
}

impl Scale {
    /// Apply raw offsets to a root. An empty offset list gives an empty scale.
    pub fn from_offsets(root: PitchClass, offsets: &[u8]) -> Self {
        let root_index = root.index() as i32;
        let notes = offsets
            .iter()
            .map(|&offset| PitchClass::from_index(root_index + offset as i32))
            .collect();

        Self {
            root,
            formula: None,
            offsets: offsets.to_vec(),
            notes,
        }
    }

    pub fn new(root: PitchClass, formula: ScaleFormula) -> Self {
        let mut scale = Self::from_offsets(root, formula.offsets());
        scale.formula = Some(formula);
        scale
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    /// Formula the scale was built from, if it came from the table.
    pub fn formula(&self) -> Option<ScaleFormula> {
        self.formula
    }

    /// Semitone offsets the scale was built from, unreduced.
    pub fn offsets(&self) -> &[u8] {
        &self.offsets
    }

    pub fn notes(&self) -> &[PitchClass] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Member at a 0-based degree position.
    pub fn degree(&self, position: usize) -> Option<PitchClass> {
        self.notes.get(position).copied()
    }

    /// Canonical names of every member, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.names_in(Notation::Solfege)
    }

    pub fn names_in(&self, notation: Notation) -> Vec<&'static str> {
        self.notes.iter().map(|pc| pc.name_in(notation)).collect()
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.names().join(", "))
    }
}

/// Build a scale from a canonical root name and a formula name.
///
/// ```
/// use armonia::theory::build_scale;
///
/// let scale = build_scale("Do", "mayor").unwrap();
/// assert_eq!(scale.names(), ["Do", "Re", "Mi", "Fa", "Sol", "La", "Si"]);
/// ```
pub fn build_scale(root: &str, formula: &str) -> Result<Scale, TheoryError> {
    let root = PitchClass::from_index(pitch::index_of(root)? as i32);
    let formula: ScaleFormula = formula.parse()?;
    let scale = Scale::new(root, formula);
    debug!("built {} {}: {}", root, formula, scale);
    Ok(scale)
}

/// All seven church modes on one root, jonica through locrio.
pub fn modes_of(root: PitchClass) -> Vec<(ScaleFormula, Scale)> {
    ScaleFormula::MODES
        .iter()
        .map(|&mode| (mode, Scale::new(root, mode)))
        .collect()
}

/*
Natural Harmonics
=================

A vibrating string sounds its fundamental plus integer multiples of it.
The first few partials land on (or near) familiar intervals:

   partial  ratio  semitones  interval
   1        1:1    0          unison (the root itself)
   2        2:1    12         octave
   3        3:2    7 (+12)    perfect fifth
   5        5:4    4 (+24)    major third

The semitone column is the offset stored in `ScaleFormula::NaturalHarmonics`.
Reduced to one octave the octave collapses back onto the root, which is
why the formula keeps 12 rather than 0.
*/

/// A named partial of the harmonic series.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partial {
    Fundamental,
    Octave,
    PerfectFifth,
    MajorThird,
}

impl Partial {
    pub fn label(self) -> &'static str {
        match self {
            Partial::Fundamental => "Tónica",
            Partial::Octave => "Octava",
            Partial::PerfectFifth => "Quinta Justa",
            Partial::MajorThird => "Tercera Mayor",
        }
    }

    /// Frequency ratio of the interval this partial forms, octave-reduced.
    pub fn ratio(self) -> (u8, u8) {
        match self {
            Partial::Fundamental => (1, 1),
            Partial::Octave => (2, 1),
            Partial::PerfectFifth => (3, 2),
            Partial::MajorThird => (5, 4),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Harmonic {
    pub partial: Partial,
    pub semitones: u8,
    pub pitch: PitchClass,
}

/// Fundamental, octave, fifth and major third above a root.
pub fn natural_harmonics(root: PitchClass) -> Vec<Harmonic> {
    const PARTIALS: [Partial; 4] = [
        Partial::Fundamental,
        Partial::Octave,
        Partial::PerfectFifth,
        Partial::MajorThird,
    ];

    let scale = Scale::new(root, ScaleFormula::NaturalHarmonics);

    PARTIALS
        .iter()
        .zip(scale.offsets().iter().zip(scale.notes()))
        .map(|(&partial, (&semitones, &pitch))| Harmonic {
            partial,
            semitones,
            pitch,
        })
        .collect()
}
