//! The 12-tone chromatic space.

/*
Pitch Space
===========

Every pitch in this crate lives in a 12-tone, octave-free space. A pitch
class is just an index 0..12 under a fixed chromatic ordering:

   index   0    1    2    3    4    5    6    7    8    9    10   11
   solfa   Do   Do#  Re   Re#  Mi   Fa   Fa#  Sol  Sol# La   La#  Si
   letter  C    C#   D    D#   E    F    F#   G    G#   A    A#   B

Moving by an interval is index arithmetic taken modulo 12:

    Sol (7) + 7 semitones = 14  ->  14 mod 12 = 2  ->  Re

Negative offsets wrap the same way (rem_euclid, not %), so
Do (0) - 1 = -1 -> 11 -> Si.

All of that wrapping goes through `normalize`. Nothing else in the crate
reduces an index by hand.

Enharmonics (Do#/Reb, C#/Db) are the same value. Flat spellings are
accepted when parsing and never produced when displaying.
*/

use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::TheoryError;

/// Number of pitch classes in one octave.
pub const OCTAVE: i32 = 12;

/// Canonical (solfège) names in chromatic order.
pub const CANONICAL_NAMES: [&str; 12] = [
    "Do", "Do#", "Re", "Re#", "Mi", "Fa", "Fa#", "Sol", "Sol#", "La", "La#", "Si",
];

const LETTER_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Which naming system to use when displaying a pitch.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Notation {
    /// Do, Re, Mi...
    #[default]
    Solfege,
    /// C, D, E...
    Letter,
}

/// One of the 12 equal-tempered tones, independent of octave.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PitchClass {
    Do,
    DoSharp,
    Re,
    ReSharp,
    Mi,
    Fa,
    FaSharp,
    Sol,
    SolSharp,
    La,
    LaSharp,
    Si,
}

impl PitchClass {
    /// All pitch classes in chromatic order, starting at Do.
    pub const ALL: [PitchClass; 12] = [
        Self::Do,
        Self::DoSharp,
        Self::Re,
        Self::ReSharp,
        Self::Mi,
        Self::Fa,
        Self::FaSharp,
        Self::Sol,
        Self::SolSharp,
        Self::La,
        Self::LaSharp,
        Self::Si,
    ];

    /// Position in the chromatic ordering (0 = Do, 11 = Si).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Pitch class at any integer index, wrapped into the octave.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[normalize(index)]
    }

    /// Move up (or down, for negative values) by a number of semitones.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_index(self.index() as i32 + semitones)
    }

    /// Upward distance in semitones from `self` to `other` (0..12).
    pub fn semitones_to(self, other: PitchClass) -> usize {
        normalize(other.index() as i32 - self.index() as i32)
    }

    /// Canonical solfège name.
    pub fn name(self) -> &'static str {
        CANONICAL_NAMES[self.index()]
    }

    pub fn name_in(self, notation: Notation) -> &'static str {
        match notation {
            Notation::Solfege => CANONICAL_NAMES[self.index()],
            Notation::Letter => LETTER_NAMES[self.index()],
        }
    }
}

impl std::fmt::Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lenient parser: canonical names, letter names and flat spellings.
///
/// `"Do"`, `"C"`, `"Do#"`, `"Reb"`, `"Db"` and the combined `"C#/Db"` form
/// all parse. Matching ignores ASCII case and surrounding whitespace.
impl FromStr for PitchClass {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // "C#/Db" style: the first spelling wins
        let spelling = trimmed.split('/').next().unwrap_or(trimmed).trim();

        parse_spelling(spelling).ok_or_else(|| TheoryError::UnknownPitch(s.to_string()))
    }
}

fn parse_spelling(spelling: &str) -> Option<PitchClass> {
    let lower = spelling.to_ascii_lowercase();
    let (natural, accidental) = match lower.strip_suffix('#') {
        Some(rest) => (rest, 1),
        None => match lower.strip_suffix('b') {
            // "b" alone is the letter B, not a flat
            Some(rest) if !rest.is_empty() => (rest, -1),
            _ => (lower.as_str(), 0),
        },
    };

    let base = match natural {
        "do" | "c" => 0,
        "re" | "d" => 2,
        "mi" | "e" => 4,
        "fa" | "f" => 5,
        "sol" | "g" => 7,
        "la" | "a" => 9,
        "si" | "b" => 11,
        _ => return None,
    };

    Some(PitchClass::from_index(base + accidental))
}

/// Wrap any integer index into 0..12.
///
/// This is the only place index arithmetic is reduced modulo 12.
#[inline]
pub fn normalize(index: i32) -> usize {
    index.rem_euclid(OCTAVE) as usize
}

/// Index of a canonical pitch name.
///
/// Strict: only the 12 names in [`CANONICAL_NAMES`] are accepted. Use
/// `str::parse::<PitchClass>()` for letter names and flats.
pub fn index_of(note: &str) -> Result<usize, TheoryError> {
    CANONICAL_NAMES
        .iter()
        .position(|&name| name == note)
        .ok_or_else(|| TheoryError::UnknownPitch(note.to_string()))
}

/// Canonical name at any integer index. Never fails.
pub fn name_at(index: i32) -> &'static str {
    CANONICAL_NAMES[normalize(index)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_of_canonical_names() {
        assert_eq!(index_of("Do").unwrap(), 0);
        assert_eq!(index_of("La").unwrap(), 9);
        assert_eq!(index_of("Si").unwrap(), 11);
    }

    #[test]
    fn index_of_rejects_aliases() {
        assert_eq!(
            index_of("C"),
            Err(TheoryError::UnknownPitch("C".to_string()))
        );
        assert!(index_of("do").is_err());
        assert!(index_of("").is_err());
    }

    #[test]
    fn name_at_wraps_both_ways() {
        assert_eq!(name_at(12), "Do");
        assert_eq!(name_at(14), "Re");
        assert_eq!(name_at(-1), "Si");
        assert_eq!(name_at(-13), "Si");
    }

    #[test]
    fn transpose_wraps() {
        assert_eq!(PitchClass::Sol.transpose(7), PitchClass::Re);
        assert_eq!(PitchClass::Do.transpose(-1), PitchClass::Si);
        assert_eq!(PitchClass::Mi.transpose(12), PitchClass::Mi);
    }

    #[test]
    fn semitones_to_is_upward() {
        assert_eq!(PitchClass::Do.semitones_to(PitchClass::Sol), 7);
        assert_eq!(PitchClass::Sol.semitones_to(PitchClass::Do), 5);
        assert_eq!(PitchClass::La.semitones_to(PitchClass::La), 0);
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("Do".parse::<PitchClass>().unwrap(), PitchClass::Do);
        assert_eq!("c".parse::<PitchClass>().unwrap(), PitchClass::Do);
        assert_eq!("Db".parse::<PitchClass>().unwrap(), PitchClass::DoSharp);
        assert_eq!("Reb".parse::<PitchClass>().unwrap(), PitchClass::DoSharp);
        assert_eq!("C#/Db".parse::<PitchClass>().unwrap(), PitchClass::DoSharp);
        assert_eq!("B".parse::<PitchClass>().unwrap(), PitchClass::Si);
        assert_eq!("Bb".parse::<PitchClass>().unwrap(), PitchClass::LaSharp);
        // Cb wraps down to Si
        assert_eq!("Cb".parse::<PitchClass>().unwrap(), PitchClass::Si);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("H".parse::<PitchClass>().is_err());
        assert!("Do##".parse::<PitchClass>().is_err());
        assert!("".parse::<PitchClass>().is_err());
    }

    #[test]
    fn letter_notation() {
        assert_eq!(PitchClass::FaSharp.name_in(Notation::Letter), "F#");
        assert_eq!(PitchClass::FaSharp.name_in(Notation::Solfege), "Fa#");
    }

    #[test]
    fn all_is_in_index_order() {
        for (i, pc) in PitchClass::ALL.iter().enumerate() {
            assert_eq!(pc.index(), i);
            assert_eq!(pc.name(), CANONICAL_NAMES[i]);
        }
    }
}
