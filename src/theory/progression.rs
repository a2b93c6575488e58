//! Harmonic progressions assembled from a diatonic chord mapping.
//!
//! Progression logic is a pure lookup-and-reorder: the caller names degrees
//! in order and gets the matching chords back in that order. The catalogue
//! of common progressions below is reference data fed into that lookup.

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::chord::{Chord, DiatonicChords};
use super::error::TheoryError;

/// A named, ordered list of degree tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedProgression {
    pub name: &'static str,
    pub degrees: &'static [&'static str],
}

/// Common progressions, in the order they are usually taught.
pub const COMMON_PROGRESSIONS: &[NamedProgression] = &[
    NamedProgression {
        name: "Tónica-Subdominante-Dominante",
        degrees: &["I", "IV", "V"],
    },
    NamedProgression {
        name: "ii-V-I",
        degrees: &["ii", "V", "I"],
    },
    NamedProgression {
        name: "Cadencia Rota",
        degrees: &["V", "vi"],
    },
    NamedProgression {
        name: "Progresión Descendente",
        degrees: &["I", "vii°", "vi", "V"],
    },
    NamedProgression {
        name: "Circular",
        degrees: &["I", "vi", "ii", "V"],
    },
    NamedProgression {
        name: "I-ii-V-I",
        degrees: &["I", "ii", "V", "I"],
    },
];

/// Find a catalogue entry by name (case-insensitive).
pub fn common_progression(name: &str) -> Option<&'static NamedProgression> {
    COMMON_PROGRESSIONS
        .iter()
        .find(|progression| progression.name.eq_ignore_ascii_case(name.trim()))
}

/// One degree of a progression bound to its chord.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionStep {
    pub tag: String,
    pub chord: Chord,
}

/// An ordered sequence of (degree tag, chord) bindings.
///
/// Order follows the requested degree sequence, repeats included.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Progression {
    steps: Vec<ProgressionStep>,
}

impl Progression {
    pub fn steps(&self) -> &[ProgressionStep] {
        &self.steps
    }

    pub fn chords(&self) -> impl Iterator<Item = &Chord> {
        self.steps.iter().map(|step| &step.chord)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|step| step.tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<'a> IntoIterator for &'a Progression {
    type Item = &'a ProgressionStep;
    type IntoIter = std::slice::Iter<'a, ProgressionStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Bind each requested degree tag to its chord, preserving order.
///
/// Fails with [`TheoryError::UnknownDegree`] on the first tag that the
/// mapping does not hold.
pub fn build_progression<S: AsRef<str>>(
    chords: &DiatonicChords,
    degrees: &[S],
) -> Result<Progression, TheoryError> {
    let steps = degrees
        .iter()
        .map(|tag| {
            let tag = tag.as_ref();
            chords.lookup(tag).map(|chord| ProgressionStep {
                tag: tag.to_string(),
                chord: chord.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "progression {}",
        steps
            .iter()
            .map(|step| step.tag.as_str())
            .collect::<Vec<_>>()
            .join("-")
    );
    Ok(Progression { steps })
}
