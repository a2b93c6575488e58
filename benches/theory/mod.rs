//! Benchmarks for interval-algebra derivations.

mod chord;
mod scale;

pub use chord::bench_chords;
pub use scale::bench_scales;
