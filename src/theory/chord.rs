//! Chord construction, directly from a root or derived from a scale.

/*
Diatonic Chords
===============

Stacking every other member of a 7-tone scale gives one chord per degree:

   degree   positions        in Do mayor
   I        0, 2, 4          Do  Mi  Sol
   ii       1, 3, 5          Re  Fa  La
   iii      2, 4, 6          Mi  Sol Si
   IV       3, 5, 0          Fa  La  Do
   V        4, 6, 1          Sol Si  Re
   vi       5, 0, 2          La  Do  Mi
   vii°     6, 1, 3          Si  Re  Fa

Positions wrap modulo 7 (the scale length), not modulo 12. The seventh
chord on a degree adds position i + 6.

Qualities come from a fixed table for the major-scale case rather than
being measured from the intervals:

   triads    Major Minor Minor Major Major Minor Diminished
   sevenths  Maj7  m7    m7    Maj7  7     m7    ø7

The same table is applied to any 7-tone scale, so a mode's chords keep
major-scale labels even when their tones say otherwise.
*/

use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::TheoryError;
use super::formula::ChordFormula;
use super::pitch::{self, Notation, PitchClass};
use super::scale::Scale;

/// Length a scale must have for diatonic derivation.
pub const DIATONIC_LEN: usize = 7;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Major,
    Minor,
    Diminished,
    Augmented,
    MajorSeventh,
    MinorSeventh,
    DominantSeventh,
    HalfDiminishedSeventh,
}

impl Quality {
    pub fn label(self) -> &'static str {
        match self {
            Quality::Major => "Mayor",
            Quality::Minor => "Menor",
            Quality::Diminished => "Disminuido",
            Quality::Augmented => "Aumentado",
            Quality::MajorSeventh => "Mayor 7",
            Quality::MinorSeventh => "Menor 7",
            Quality::DominantSeventh => "Dominante 7",
            Quality::HalfDiminishedSeventh => "Semidisminuido 7",
        }
    }

    pub fn is_seventh(self) -> bool {
        matches!(
            self,
            Quality::MajorSeventh
                | Quality::MinorSeventh
                | Quality::DominantSeventh
                | Quality::HalfDiminishedSeventh
        )
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The seven scale degrees, I through vii°.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Degree {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

impl Degree {
    pub const ALL: [Degree; 7] = [
        Degree::I,
        Degree::II,
        Degree::III,
        Degree::IV,
        Degree::V,
        Degree::VI,
        Degree::VII,
    ];

    const TRIAD_QUALITIES: [Quality; 7] = [
        Quality::Major,
        Quality::Minor,
        Quality::Minor,
        Quality::Major,
        Quality::Major,
        Quality::Minor,
        Quality::Diminished,
    ];

    const SEVENTH_QUALITIES: [Quality; 7] = [
        Quality::MajorSeventh,
        Quality::MinorSeventh,
        Quality::MinorSeventh,
        Quality::MajorSeventh,
        Quality::DominantSeventh,
        Quality::MinorSeventh,
        Quality::HalfDiminishedSeventh,
    ];

    /// 0-based scale position of this degree's root.
    pub fn position(self) -> usize {
        self as usize
    }

    /// Roman numeral, cased by triad quality.
    pub fn tag(self) -> &'static str {
        match self {
            Degree::I => "I",
            Degree::II => "ii",
            Degree::III => "iii",
            Degree::IV => "IV",
            Degree::V => "V",
            Degree::VI => "vi",
            Degree::VII => "vii°",
        }
    }

    pub fn triad_quality(self) -> Quality {
        Self::TRIAD_QUALITIES[self.position()]
    }

    pub fn seventh_quality(self) -> Quality {
        Self::SEVENTH_QUALITIES[self.position()]
    }

    pub fn function(self) -> HarmonicFunction {
        match self {
            Degree::I => HarmonicFunction::Tonic,
            Degree::II => HarmonicFunction::Supertonic,
            Degree::III => HarmonicFunction::Mediant,
            Degree::IV => HarmonicFunction::Subdominant,
            Degree::V => HarmonicFunction::Dominant,
            Degree::VI => HarmonicFunction::Submediant,
            Degree::VII => HarmonicFunction::LeadingTone,
        }
    }

    /// Parse a degree tag such as `"V"`, `"vii°"` or `"ii7"`.
    ///
    /// `"viio"` is accepted for `"vii°"`. A trailing `7` selects the seventh
    /// chord kind.
    pub fn parse_tag(tag: &str) -> Option<(Degree, ChordKind)> {
        let tag = tag.trim();
        let (numeral, kind) = match tag.strip_suffix('7') {
            Some(rest) => (rest, ChordKind::Seventh),
            None => (tag, ChordKind::Triad),
        };

        // the diminished mark belongs to vii only, and vii requires it
        let degree = match numeral {
            "I" => Degree::I,
            "ii" => Degree::II,
            "iii" => Degree::III,
            "IV" => Degree::IV,
            "V" => Degree::V,
            "vi" => Degree::VI,
            "vii°" | "viio" => Degree::VII,
            _ => return None,
        };
        Some((degree, kind))
    }
}

impl std::fmt::Display for Degree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Triad or seventh chord.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChordKind {
    Triad,
    Seventh,
}

impl ChordKind {
    /// Scale positions stacked above the degree root.
    fn stack(self) -> &'static [usize] {
        match self {
            ChordKind::Triad => &[0, 2, 4],
            ChordKind::Seventh => &[0, 2, 4, 6],
        }
    }
}

/// Role a degree plays in its key.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmonicFunction {
    Tonic,
    Supertonic,
    Mediant,
    Subdominant,
    Dominant,
    Submediant,
    LeadingTone,
}

impl HarmonicFunction {
    pub fn label(self) -> &'static str {
        match self {
            HarmonicFunction::Tonic => "Tónica",
            HarmonicFunction::Supertonic => "Supertónica",
            HarmonicFunction::Mediant => "Mediante",
            HarmonicFunction::Subdominant => "Subdominante",
            HarmonicFunction::Dominant => "Dominante",
            HarmonicFunction::Submediant => "Submediante",
            HarmonicFunction::LeadingTone => "Sensible",
        }
    }

    /// Tonic, subdominant or dominant family.
    pub fn group(self) -> FunctionGroup {
        match self {
            HarmonicFunction::Tonic | HarmonicFunction::Mediant | HarmonicFunction::Submediant => {
                FunctionGroup::Tonic
            }
            HarmonicFunction::Supertonic | HarmonicFunction::Subdominant => {
                FunctionGroup::Subdominant
            }
            HarmonicFunction::Dominant | HarmonicFunction::LeadingTone => FunctionGroup::Dominant,
        }
    }
}

impl std::fmt::Display for HarmonicFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The three functional families: rest, movement, tension.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionGroup {
    Tonic,
    Subdominant,
    Dominant,
}

impl FunctionGroup {
    pub const ALL: [FunctionGroup; 3] = [
        FunctionGroup::Tonic,
        FunctionGroup::Subdominant,
        FunctionGroup::Dominant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FunctionGroup::Tonic => "Tónica",
            FunctionGroup::Subdominant => "Subdominante",
            FunctionGroup::Dominant => "Dominante",
        }
    }

    /// Degree that stands for the family in a basic cadence.
    pub fn primary_degree(self) -> Degree {
        match self {
            FunctionGroup::Tonic => Degree::I,
            FunctionGroup::Subdominant => Degree::IV,
            FunctionGroup::Dominant => Degree::V,
        }
    }
}

/// A set of pitch classes plus naming metadata.
///
/// Equality and hashing look at the tone set only: order and duplicates in
/// the source formula don't matter, and neither does the metadata.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Chord {
    root: PitchClass,
    tones: BTreeSet<PitchClass>,
    quality: Quality,
    degree: Option<Degree>,
}

impl Chord {
    /// Direct construction from a root and a chord formula.
    pub fn from_formula(root: PitchClass, formula: ChordFormula) -> Self {
        let tones = formula
            .offsets()
            .iter()
            .map(|&offset| root.transpose(offset as i32))
            .collect();

        Self {
            root,
            tones,
            quality: formula.quality(),
            degree: None,
        }
    }

    fn diatonic(scale: &Scale, degree: Degree, kind: ChordKind) -> Self {
        let notes = scale.notes();
        let position = degree.position();
        let tones = kind
            .stack()
            .iter()
            .map(|&step| notes[(position + step) % DIATONIC_LEN])
            .collect();
        let quality = match kind {
            ChordKind::Triad => degree.triad_quality(),
            ChordKind::Seventh => degree.seventh_quality(),
        };

        Self {
            root: notes[position],
            tones,
            quality,
            degree: Some(degree),
        }
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Degree within the scale it was derived from.
    pub fn degree(&self) -> Option<Degree> {
        self.degree
    }

    /// Roman-numeral tag, `"V"` for a triad or `"V7"` for a seventh chord.
    pub fn degree_tag(&self) -> Option<String> {
        self.degree.map(|degree| {
            if self.quality.is_seventh() {
                format!("{}7", degree.tag())
            } else {
                degree.tag().to_string()
            }
        })
    }

    pub fn function(&self) -> Option<HarmonicFunction> {
        self.degree.map(Degree::function)
    }

    /// Root name followed by the quality label, e.g. `"Sol Mayor"`.
    pub fn name(&self) -> String {
        self.name_in(Notation::Solfege)
    }

    pub fn name_in(&self, notation: Notation) -> String {
        format!("{} {}", self.root.name_in(notation), self.quality.label())
    }

    pub fn tones(&self) -> &BTreeSet<PitchClass> {
        &self.tones
    }

    pub fn contains(&self, pitch: PitchClass) -> bool {
        self.tones.contains(&pitch)
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    /// Semitone distance of every tone above the root, ascending.
    ///
    /// `Do Mayor` gives `[0, 4, 7]`, `Fa Mayor` (Fa La Do) gives `[0, 4, 7]`
    /// as well even though Do sorts before Fa.
    pub fn intervals_above_root(&self) -> Vec<usize> {
        let mut intervals: Vec<usize> = self
            .tones
            .iter()
            .map(|&tone| self.root.semitones_to(tone))
            .collect();
        intervals.sort_unstable();
        intervals
    }
}

impl PartialEq for Chord {
    fn eq(&self, other: &Self) -> bool {
        self.tones == other.tones
    }
}

impl Eq for Chord {}

impl Hash for Chord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tones.hash(state);
    }
}

impl std::fmt::Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.tones.iter().map(|pc| pc.name()).collect();
        write!(f, "{} {{{}}}", self.name(), names.join(", "))
    }
}

/// Build a chord from a canonical root name and a chord formula name.
pub fn build_chord(root: &str, formula: &str) -> Result<Chord, TheoryError> {
    let root = PitchClass::from_index(pitch::index_of(root)? as i32);
    let formula: ChordFormula = formula.parse()?;
    let chord = Chord::from_formula(root, formula);
    debug!("built chord {}", chord);
    Ok(chord)
}

/// Major, minor and diminished triads on one root.
pub fn basic_triads(root: PitchClass) -> Vec<Chord> {
    ChordFormula::TRIADS
        .iter()
        .map(|&formula| Chord::from_formula(root, formula))
        .collect()
}

/// Degree -> chord mapping for one scale.
///
/// Built for all seven degrees by [`diatonic_chords`] or
/// [`diatonic_sevenths`]; [`DiatonicChords::subset`] gives a narrower view.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DiatonicChords {
    kind: ChordKind,
    chords: BTreeMap<Degree, Chord>,
}

impl DiatonicChords {
    fn derive(scale: &Scale, kind: ChordKind) -> Result<Self, TheoryError> {
        if scale.len() != DIATONIC_LEN {
            return Err(TheoryError::UnsupportedScaleShape { len: scale.len() });
        }

        let chords = Degree::ALL
            .iter()
            .map(|&degree| (degree, Chord::diatonic(scale, degree, kind)))
            .collect();

        debug!("derived {:?} chords from {}", kind, scale);
        Ok(Self { kind, chords })
    }

    pub fn kind(&self) -> ChordKind {
        self.kind
    }

    pub fn get(&self, degree: Degree) -> Option<&Chord> {
        self.chords.get(&degree)
    }

    /// Look up by tag (`"V"`, `"vii°"`, `"ii7"`).
    ///
    /// The tag's kind must match the mapping: `"V7"` is absent from a triad
    /// mapping and `"V"` from a seventh mapping.
    pub fn lookup(&self, tag: &str) -> Result<&Chord, TheoryError> {
        Degree::parse_tag(tag)
            .filter(|&(_, kind)| kind == self.kind)
            .and_then(|(degree, _)| self.chords.get(&degree))
            .ok_or_else(|| TheoryError::UnknownDegree(tag.to_string()))
    }

    /// Chords in degree order.
    pub fn iter(&self) -> impl Iterator<Item = (Degree, &Chord)> {
        self.chords.iter().map(|(&degree, chord)| (degree, chord))
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// A narrower mapping holding only the listed degrees.
    pub fn subset(&self, degrees: &[Degree]) -> Self {
        let chords = degrees
            .iter()
            .filter_map(|degree| self.chords.get_key_value(degree))
            .map(|(&degree, chord)| (degree, chord.clone()))
            .collect();

        Self {
            kind: self.kind,
            chords,
        }
    }
}

/// Triads on all seven degrees of a 7-tone scale.
pub fn diatonic_chords(scale: &Scale) -> Result<DiatonicChords, TheoryError> {
    DiatonicChords::derive(scale, ChordKind::Triad)
}

/// Seventh chords on all seven degrees of a 7-tone scale.
pub fn diatonic_sevenths(scale: &Scale) -> Result<DiatonicChords, TheoryError> {
    DiatonicChords::derive(scale, ChordKind::Seventh)
}

/// The tonic, subdominant and dominant triads (I, IV, V) of a scale.
pub fn functional_triads(scale: &Scale) -> Result<Vec<(FunctionGroup, Chord)>, TheoryError> {
    if scale.len() != DIATONIC_LEN {
        return Err(TheoryError::UnsupportedScaleShape { len: scale.len() });
    }

    Ok(FunctionGroup::ALL
        .iter()
        .map(|&group| {
            let chord = Chord::diatonic(scale, group.primary_degree(), ChordKind::Triad);
            (group, chord)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::formula::ScaleFormula;
    use crate::theory::scale::build_scale;
    use PitchClass::*;

    fn set(tones: &[PitchClass]) -> BTreeSet<PitchClass> {
        tones.iter().copied().collect()
    }

    #[test]
    fn direct_major_triad() {
        let chord = build_chord("Do", "mayor").unwrap();
        assert_eq!(chord.tones(), &set(&[Do, Mi, Sol]));
        assert_eq!(chord.name(), "Do Mayor");
        assert_eq!(chord.degree(), None);
        assert_eq!(chord.function(), None);
    }

    #[test]
    fn equality_ignores_order_and_metadata() {
        let c_major = Chord::from_formula(Do, ChordFormula::Major);
        let diatonic = diatonic_chords(&Scale::new(Do, ScaleFormula::Major)).unwrap();
        assert_eq!(diatonic.get(Degree::I).unwrap(), &c_major);

        let a_minor = Chord::from_formula(La, ChordFormula::Minor);
        assert_ne!(a_minor, c_major);
    }

    #[test]
    fn unknown_chord_type_is_an_error() {
        assert_eq!(
            build_chord("Do", "sus2").unwrap_err(),
            TheoryError::UnknownFormula("sus2".to_string())
        );
    }

    #[test]
    fn basic_triads_on_re() {
        let triads = basic_triads(Re);
        assert_eq!(triads.len(), 3);
        assert_eq!(triads[0].tones(), &set(&[Re, FaSharp, La]));
        assert_eq!(triads[1].tones(), &set(&[Re, Fa, La]));
        assert_eq!(triads[2].tones(), &set(&[Re, Fa, SolSharp]));
        assert_eq!(triads[2].name(), "Re Disminuido");
    }

    #[test]
    fn dominant_of_do_mayor() {
        let scale = build_scale("Do", "mayor").unwrap();
        let chords = diatonic_chords(&scale).unwrap();
        let v = chords.lookup("V").unwrap();
        assert_eq!(v.quality(), Quality::Major);
        assert_eq!(v.tones(), &set(&[Sol, Si, Re]));
        assert_eq!(v.function(), Some(HarmonicFunction::Dominant));
        assert_eq!(v.name(), "Sol Mayor");
        assert_eq!(v.degree_tag().as_deref(), Some("V"));
    }

    #[test]
    fn leading_tone_triad() {
        let scale = build_scale("Do", "mayor").unwrap();
        let chords = diatonic_chords(&scale).unwrap();
        let vii = chords.get(Degree::VII).unwrap();
        assert_eq!(vii.quality(), Quality::Diminished);
        assert_eq!(vii.tones(), &set(&[Si, Re, Fa]));
        assert_eq!(vii.function().map(|f| f.label()), Some("Sensible"));
        assert_eq!(chords.lookup("viio").unwrap(), vii);
    }

    #[test]
    fn seventh_chords_add_position_six() {
        let scale = build_scale("Do", "mayor").unwrap();
        let sevenths = diatonic_sevenths(&scale).unwrap();
        let v7 = sevenths.lookup("V7").unwrap();
        assert_eq!(v7.tones(), &set(&[Sol, Si, Re, Fa]));
        assert_eq!(v7.quality(), Quality::DominantSeventh);
        assert_eq!(v7.degree_tag().as_deref(), Some("V7"));

        let ii7 = sevenths.get(Degree::II).unwrap();
        assert_eq!(ii7.tones(), &set(&[Re, Fa, La, Do]));
        assert_eq!(ii7.intervals_above_root(), [0, 3, 7, 10]);
    }

    #[test]
    fn tag_kind_must_match_mapping() {
        let scale = build_scale("Do", "mayor").unwrap();
        let triads = diatonic_chords(&scale).unwrap();
        let sevenths = diatonic_sevenths(&scale).unwrap();
        assert_eq!(
            triads.lookup("V7"),
            Err(TheoryError::UnknownDegree("V7".to_string()))
        );
        assert!(sevenths.lookup("V").is_err());
    }

    #[test]
    fn rejects_non_diatonic_shapes() {
        let chromatic = build_scale("Do", "cromatica").unwrap();
        assert_eq!(
            diatonic_chords(&chromatic).unwrap_err(),
            TheoryError::UnsupportedScaleShape { len: 12 }
        );
        let empty = Scale::from_offsets(Do, &[]);
        assert_eq!(
            diatonic_sevenths(&empty).unwrap_err(),
            TheoryError::UnsupportedScaleShape { len: 0 }
        );
        assert!(functional_triads(&chromatic).is_err());
    }

    #[test]
    fn subset_drops_degrees() {
        let scale = build_scale("Sol", "mayor").unwrap();
        let chords = diatonic_chords(&scale).unwrap();
        let view = chords.subset(&[Degree::I, Degree::IV, Degree::V]);
        assert_eq!(view.len(), 3);
        assert!(view.lookup("IV").is_ok());
        assert_eq!(
            view.lookup("vi"),
            Err(TheoryError::UnknownDegree("vi".to_string()))
        );
    }

    #[test]
    fn functional_triads_of_fa() {
        let scale = build_scale("Fa", "mayor").unwrap();
        let triads = functional_triads(&scale).unwrap();
        assert_eq!(triads[0].0, FunctionGroup::Tonic);
        assert_eq!(triads[0].1.tones(), &set(&[Fa, La, Do]));
        assert_eq!(triads[1].1.tones(), &set(&[LaSharp, Re, Fa]));
        assert_eq!(triads[2].1.tones(), &set(&[Do, Mi, Sol]));
    }

    #[test]
    fn function_groups() {
        assert_eq!(Degree::VI.function().group(), FunctionGroup::Tonic);
        assert_eq!(Degree::II.function().group(), FunctionGroup::Subdominant);
        assert_eq!(Degree::VII.function().group(), FunctionGroup::Dominant);
    }

    #[test]
    fn parse_tags() {
        assert_eq!(Degree::parse_tag("vii°"), Some((Degree::VII, ChordKind::Triad)));
        assert_eq!(Degree::parse_tag("vii°7"), Some((Degree::VII, ChordKind::Seventh)));
        assert_eq!(Degree::parse_tag("IV"), Some((Degree::IV, ChordKind::Triad)));
        assert_eq!(Degree::parse_tag("iv"), None);
        assert_eq!(Degree::parse_tag("VIII"), None);
        assert_eq!(Degree::parse_tag("viio7"), Some((Degree::VII, ChordKind::Seventh)));
        assert_eq!(Degree::parse_tag("vii"), None);
        assert_eq!(Degree::parse_tag("V°"), None);
        assert_eq!(Degree::parse_tag("IVo"), None);
    }

    #[test]
    fn intervals_above_root_wrap() {
        let f_major = Chord::from_formula(Fa, ChordFormula::Major);
        assert_eq!(f_major.intervals_above_root(), [0, 4, 7]);
    }
}
