//! Benchmarks for a complete voice block.

mod voice;

pub use voice::bench_voice;
