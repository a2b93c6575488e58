//! Turn theory results into audible waveforms.
//!
//! Everything is voiced from octave 4 upward: a scale's offsets and a
//! chord's intervals above its root are added to the root's index and fed
//! through the config's tuning.

use log::debug;

use crate::synth::{mix, tone_with_envelope, SynthConfig, SynthError, Waveform};
use crate::theory::{Chord, PitchClass, Progression, Scale};

/// One enveloped note at a semitone index (0 = Do4).
pub fn pitch(index: i32, duration_secs: f64, config: &SynthConfig) -> Waveform {
    tone_with_envelope(
        config.tuning().frequency_of(index),
        duration_secs,
        config.sample_rate,
        config.amplitude,
        &config.envelope(),
    )
}

/// A single pitch class in octave 4, lasting `note_secs`.
pub fn note(pitch_class: PitchClass, config: &SynthConfig) -> Result<Waveform, SynthError> {
    config.validate()?;
    Ok(pitch(pitch_class.index() as i32, config.note_secs, config))
}

/// The scale played upward, one note at a time, with `gap_secs` between notes.
pub fn scale(scale: &Scale, config: &SynthConfig) -> Result<Waveform, SynthError> {
    config.validate()?;
    let root = scale.root().index() as i32;

    let notes: Vec<Waveform> = scale
        .offsets()
        .iter()
        .map(|&offset| pitch(root + offset as i32, config.note_secs, config))
        .collect();

    debug!("rendering scale {} ({} notes)", scale, notes.len());
    with_gaps(notes, config)
}

/// Every chord tone at once, voiced above the root and mixed.
pub fn chord(chord: &Chord, config: &SynthConfig) -> Result<Waveform, SynthError> {
    config.validate()?;
    voice(chord, config)
}

/// Chords in order, `chord_secs` each, separated by `gap_secs`.
pub fn chords<'a>(
    chords: impl IntoIterator<Item = &'a Chord>,
    config: &SynthConfig,
) -> Result<Waveform, SynthError> {
    config.validate()?;

    let voiced = chords
        .into_iter()
        .map(|c| voice(c, config))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("rendering {} chords", voiced.len());
    with_gaps(voiced, config)
}

/// A progression's chords in order, separated by `gap_secs`.
pub fn progression(progression: &Progression, config: &SynthConfig) -> Result<Waveform, SynthError> {
    chords(progression.chords(), config)
}

fn voice(chord: &Chord, config: &SynthConfig) -> Result<Waveform, SynthError> {
    let root = chord.root().index() as i32;
    let tones: Vec<Waveform> = chord
        .intervals_above_root()
        .into_iter()
        .map(|interval| pitch(root + interval as i32, config.chord_secs, config))
        .collect();
    mix(&tones)
}

fn with_gaps(parts: Vec<Waveform>, config: &SynthConfig) -> Result<Waveform, SynthError> {
    let gap = Waveform::silence(config.gap_secs, config.sample_rate);
    let count = parts.len();

    let mut joined = Vec::with_capacity(count * 2);
    for (i, part) in parts.into_iter().enumerate() {
        joined.push(part);
        if i + 1 < count && !gap.is_empty() {
            joined.push(gap.clone());
        }
    }
    Waveform::concat(&joined)
}
