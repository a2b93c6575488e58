//! Render every catalogued progression in Re mayor offline and check what
//! each chord sounds like.
//!
//! Run with: cargo run --example progression_bounce

use armonia::analysis::peaks;
use armonia::render;
use armonia::synth::SynthConfig;
use armonia::theory::{build_progression, build_scale, diatonic_chords, COMMON_PROGRESSIONS};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SynthConfig::default().chord_secs(0.5).gap_secs(0.1);
    let scale = build_scale("Re", "mayor")?;
    let chords = diatonic_chords(&scale)?;

    println!("Re mayor: {}", scale);
    for named in COMMON_PROGRESSIONS {
        let progression = build_progression(&chords, named.degrees)?;
        let bounce = render::progression(&progression, &config)?;
        println!(
            "\n{} ({} samples, {:.2}s)",
            named.name,
            bounce.len(),
            bounce.duration_secs()
        );

        for step in &progression {
            let voiced = render::chord(&step.chord, &config)?;
            let heard: Vec<String> = peaks(&voiced, step.chord.len())
                .iter()
                .map(|hz| format!("{:.1}", hz))
                .collect();
            println!("  {:<5} {:<16} {} Hz", step.tag, step.chord.name(), heard.join(" "));
        }
    }
    Ok(())
}
