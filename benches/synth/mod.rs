//! Benchmarks for tone synthesis and mixing.

mod mix;
mod tone;

pub use mix::bench_mix;
pub use tone::bench_tone;
