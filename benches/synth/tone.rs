use std::hint::black_box;

use armonia::synth::{tone, AttackDecay};
use criterion::{BenchmarkId, Criterion, Throughput};

use crate::DURATIONS;

const SAMPLE_RATE: u32 = 44_100;

pub fn bench_tone(c: &mut Criterion) {
    let mut group = c.benchmark_group("synth/tone");

    for &secs in DURATIONS {
        let samples = (secs * SAMPLE_RATE as f64).round() as u64;
        group.throughput(Throughput::Elements(samples));

        group.bench_with_input(BenchmarkId::new("enveloped", secs), &secs, |b, &secs| {
            b.iter(|| tone(black_box(440.0), secs, SAMPLE_RATE, black_box(0.5)))
        });

        // Envelope alone, over an existing buffer
        let mut buffer = vec![1.0f32; samples as usize];
        let envelope = AttackDecay::default();
        group.bench_with_input(BenchmarkId::new("envelope_apply", secs), &secs, |b, _| {
            b.iter(|| {
                buffer.fill(1.0);
                envelope.apply(black_box(&mut buffer), SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
