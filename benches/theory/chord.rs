use std::hint::black_box;

use armonia::theory::{
    build_chord, build_progression, diatonic_chords, diatonic_sevenths, PitchClass, Scale,
    ScaleFormula, COMMON_PROGRESSIONS,
};
use criterion::Criterion;

pub fn bench_chords(c: &mut Criterion) {
    let mut group = c.benchmark_group("theory/chord");
    let scale = Scale::new(PitchClass::Mi, ScaleFormula::Major);

    group.bench_function("build_chord", |b| {
        b.iter(|| build_chord(black_box("La#"), black_box("semidisminuido")))
    });

    group.bench_function("diatonic_triads", |b| {
        b.iter(|| diatonic_chords(black_box(&scale)))
    });

    group.bench_function("diatonic_sevenths", |b| {
        b.iter(|| diatonic_sevenths(black_box(&scale)))
    });

    let chords = match diatonic_chords(&scale) {
        Ok(chords) => chords,
        Err(e) => panic!("diatonic chords of {}: {}", scale, e),
    };
    group.bench_function("progression/catalogue", |b| {
        b.iter(|| {
            for named in COMMON_PROGRESSIONS {
                let _ = black_box(build_progression(&chords, named.degrees));
            }
        })
    });

    group.finish();
}
