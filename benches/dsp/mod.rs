//! Benchmarks for low-level DSP primitives.

mod delay;
mod oscillator;

pub use delay::bench_delay;
pub use oscillator::{bench_modulation, bench_oscillator};
