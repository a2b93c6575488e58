use std::hint::black_box;

use armonia::theory::{build_scale, modes_of, PitchClass, Scale, ScaleFormula};
use criterion::{BenchmarkId, Criterion};

pub fn bench_scales(c: &mut Criterion) {
    let mut group = c.benchmark_group("theory/scale");

    for formula in [ScaleFormula::Major, ScaleFormula::Chromatic, ScaleFormula::NaturalHarmonics] {
        group.bench_with_input(
            BenchmarkId::new("new", formula.name()),
            &formula,
            |b, &formula| b.iter(|| Scale::new(black_box(PitchClass::FaSharp), formula)),
        );
    }

    // Includes name lookup and formula parsing
    group.bench_function("build_scale/by_name", |b| {
        b.iter(|| build_scale(black_box("Sol#"), black_box("mixolidia")))
    });

    group.bench_function("modes_of", |b| {
        b.iter(|| modes_of(black_box(PitchClass::Re)))
    });

    group.finish();
}
