//! armonia - scales, chords and progressions from the terminal
//!
//! Run with: cargo run -- scale Do mayor --play

mod logger;
mod playback;

use std::str::FromStr;

use armonia::render;
use armonia::synth::SynthConfig;
use armonia::theory::{
    basic_triads, build_progression, common_progression, diatonic_chords, diatonic_sevenths,
    functional_triads, modes_of, natural_harmonics, Chord, ChordFormula, Notation, PitchClass,
    Scale, ScaleFormula, COMMON_PROGRESSIONS,
};
use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};

use playback::Player;

const USAGE: &str = "\
usage: armonia [options] <command> [args]

commands:
  list                          formulas and named progressions
  scale <root> <formula>        build a scale
  modes <root>                  the seven church modes
  harmonics <root>              fundamental, octave, fifth, third
  triads <root>                 major, minor and diminished triads
  chord <root> <formula>        build a chord
  diatonic <root> [--sevenths]  chords of the major scale
  functions <root>              tonic, subdominant and dominant triads
  progression <root> <name|I-IV-V>

options:
  --rate <hz>          sample rate (default 44100, or the device rate with --play)
  --amp <0..1>         tone amplitude (default 0.5)
  --reference <hz>     frequency of La4 (default 440)
  --notation <solfege|letter>
  --play               play the result
  -v, -vv              debug / trace logging";

struct Args {
    command: Vec<String>,
    rate: Option<u32>,
    amplitude: Option<f32>,
    reference_hz: Option<f64>,
    notation: Notation,
    sevenths: bool,
    play: bool,
    verbosity: u8,
}

impl Args {
    fn parse(mut raw: impl Iterator<Item = String>) -> EyreResult<Self> {
        let mut args = Args {
            command: Vec::new(),
            rate: None,
            amplitude: None,
            reference_hz: None,
            notation: Notation::Solfege,
            sevenths: false,
            play: false,
            verbosity: 0,
        };

        while let Some(arg) = raw.next() {
            match arg.as_str() {
                "--rate" => args.rate = Some(value(&mut raw, "--rate")?),
                "--amp" => args.amplitude = Some(value(&mut raw, "--amp")?),
                "--reference" => args.reference_hz = Some(value(&mut raw, "--reference")?),
                "--notation" => {
                    let raw_value: String = value(&mut raw, "--notation")?;
                    args.notation = match raw_value.to_ascii_lowercase().as_str() {
                        "solfege" | "solfeo" => Notation::Solfege,
                        "letter" | "letra" => Notation::Letter,
                        other => bail!("unknown notation '{}'", other),
                    };
                }
                "--sevenths" => args.sevenths = true,
                "--play" => args.play = true,
                "-v" => args.verbosity = args.verbosity.max(1),
                "-vv" => args.verbosity = 2,
                "-h" | "--help" => args.command = vec!["help".to_string()],
                flag if flag.starts_with("--") => bail!("unknown option '{}'", flag),
                _ => args.command.push(arg),
            }
        }
        Ok(args)
    }

    fn synth_config(&self, device_rate: Option<u32>) -> EyreResult<SynthConfig> {
        let mut config = SynthConfig::default();
        if let Some(rate) = self.rate.or(device_rate) {
            config = config.sample_rate(rate);
        }
        if let Some(amp) = self.amplitude {
            config = config.amplitude(amp);
        }
        if let Some(hz) = self.reference_hz {
            config = config.reference_hz(hz);
        }
        config.validate().wrap_err("bad synth options")?;
        Ok(config)
    }
}

fn value<T>(raw: &mut impl Iterator<Item = String>, flag: &str) -> EyreResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let text = raw.next().ok_or_else(|| eyre!("{} needs a value", flag))?;
    text.parse()
        .map_err(|e| eyre!("invalid value '{}' for {}: {}", text, flag, e))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse(std::env::args().skip(1))?;
    logger::init(args.verbosity)?;

    let player = if args.play { Some(Player::open()?) } else { None };
    let config = args.synth_config(player.as_ref().map(Player::sample_rate))?;
    let notation = args.notation;

    let words: Vec<&str> = args.command.iter().map(String::as_str).collect();
    let sound = match words.as_slice() {
        [] | ["help"] => {
            println!("{}", USAGE);
            None
        }
        ["list"] => {
            list();
            None
        }
        ["scale", root, formula] => {
            let scale = Scale::new(pitch(root)?, formula.parse::<ScaleFormula>()?);
            println!(
                "{} {}: {}",
                scale.root().name_in(notation),
                formula,
                join(&scale.names_in(notation))
            );
            Some(render::scale(&scale, &config)?)
        }
        ["modes", root] => {
            for (mode, scale) in modes_of(pitch(root)?) {
                println!("{:<10} {}", mode.name(), join(&scale.names_in(notation)));
            }
            None
        }
        ["harmonics", root] => {
            let root = pitch(root)?;
            for harmonic in natural_harmonics(root) {
                let (num, den) = harmonic.partial.ratio();
                println!(
                    "{:<14} {:>2} st  {}:{}  {}",
                    harmonic.partial.label(),
                    harmonic.semitones,
                    num,
                    den,
                    harmonic.pitch.name_in(notation)
                );
            }
            let scale = Scale::new(root, ScaleFormula::NaturalHarmonics);
            Some(render::scale(&scale, &config)?)
        }
        ["triads", root] => {
            let triads = basic_triads(pitch(root)?);
            print_chords(triads.iter(), notation);
            Some(render::chords(&triads, &config)?)
        }
        ["chord", root, formula] => {
            let chord = Chord::from_formula(pitch(root)?, formula.parse::<ChordFormula>()?);
            print_chords(std::iter::once(&chord), notation);
            Some(render::chord(&chord, &config)?)
        }
        ["diatonic", root] => {
            let scale = Scale::new(pitch(root)?, ScaleFormula::Major);
            let chords = if args.sevenths {
                diatonic_sevenths(&scale)?
            } else {
                diatonic_chords(&scale)?
            };
            for (degree, chord) in chords.iter() {
                let tag = chord.degree_tag().unwrap_or_else(|| degree.tag().to_string());
                println!(
                    "{:<6} {:<22} {:<14} {}",
                    tag,
                    chord.name_in(notation),
                    degree.function().label(),
                    tones(chord, notation)
                );
            }
            Some(render::chords(chords.iter().map(|(_, chord)| chord), &config)?)
        }
        ["functions", root] => {
            let scale = Scale::new(pitch(root)?, ScaleFormula::Major);
            let triads = functional_triads(&scale)?;
            for (group, chord) in &triads {
                println!(
                    "{:<14} {:<22} {}",
                    group.label(),
                    chord.name_in(notation),
                    tones(chord, notation)
                );
            }
            let chords: Vec<Chord> = triads.into_iter().map(|(_, chord)| chord).collect();
            Some(render::chords(&chords, &config)?)
        }
        ["progression", root, which] => {
            let scale = Scale::new(pitch(root)?, ScaleFormula::Major);
            let chords = diatonic_chords(&scale)?;
            let degrees: Vec<&str> = match common_progression(which) {
                Some(named) => named.degrees.to_vec(),
                None => which.split('-').collect(),
            };
            let progression = build_progression(&chords, &degrees)?;
            for step in &progression {
                println!(
                    "{:<6} {:<22} {}",
                    step.tag,
                    step.chord.name_in(notation),
                    tones(&step.chord, notation)
                );
            }
            Some(render::progression(&progression, &config)?)
        }
        _ => bail!("unrecognised command\n\n{}", USAGE),
    };

    if let (Some(player), Some(waveform)) = (player, sound) {
        println!("playing {:.1}s at {} Hz", waveform.duration_secs(), waveform.sample_rate());
        player.play(&waveform)?;
    }
    Ok(())
}

fn pitch(name: &str) -> EyreResult<PitchClass> {
    Ok(name.parse::<PitchClass>()?)
}

fn join(names: &[&str]) -> String {
    names.join(" ")
}

fn tones(chord: &Chord, notation: Notation) -> String {
    let names: Vec<&str> = chord.tones().iter().map(|pc| pc.name_in(notation)).collect();
    format!("{{{}}}", names.join(", "))
}

fn print_chords<'a>(chords: impl Iterator<Item = &'a Chord>, notation: Notation) {
    for chord in chords {
        println!("{:<22} {}", chord.name_in(notation), tones(chord, notation));
    }
}

fn list() {
    println!("scales:");
    for formula in ScaleFormula::ALL {
        println!("  {:<12} {:?}", formula.name(), formula.offsets());
    }
    println!("chords:");
    for formula in ChordFormula::ALL {
        println!("  {:<14} {:?}", formula.name(), formula.offsets());
    }
    println!("progressions:");
    for named in COMMON_PROGRESSIONS {
        println!("  {:<30} {}", named.name, named.degrees.join("-"));
    }
}
