use std::hint::black_box;

use armonia::synth::{mix, tone, Waveform};
use criterion::{BenchmarkId, Criterion};

use crate::DURATIONS;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("synth/mix");

    for &secs in DURATIONS {
        // Do mayor seventh: Do Mi Sol Si
        let tones: Vec<Waveform> = [261.63, 329.63, 392.0, 493.88]
            .iter()
            .map(|&hz| tone(hz, secs, 44_100, 0.5))
            .collect();

        group.bench_with_input(BenchmarkId::new("triad", secs), &secs, |b, _| {
            b.iter(|| mix(black_box(&tones[..3])))
        });

        group.bench_with_input(BenchmarkId::new("seventh", secs), &secs, |b, _| {
            b.iter(|| mix(black_box(&tones)))
        });
    }

    group.finish();
}
