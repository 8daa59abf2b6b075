//! Benchmarks for oscillator stepping and LFO pitch modulation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monovox::dsp::{modulation::render_pitch_modulation, Oscillator};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for (name, mut osc) in [
            ("sine", Oscillator::sine()),      // sin() per sample
            ("square", Oscillator::square()),  // branch per sample
            ("sawtooth", Oscillator::sawtooth()),
        ] {
            osc.start(440.0, SAMPLE_RATE);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for sample in buffer.iter_mut() {
                        *sample = osc.next_sample();
                    }
                    black_box(&buffer);
                })
            });
        }

        // Carrier stepping with a per-sample rate multiplier
        let rates = vec![1.01f32; size];
        let mut osc = Oscillator::square();
        osc.start(440.0, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("square_modulated", size), &size, |b, _| {
            b.iter(|| {
                for (sample, &rate) in buffer.iter_mut().zip(&rates) {
                    *sample = osc.next_modulated(black_box(rate));
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}

pub fn bench_modulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/modulation");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![1.0f32; size];
        let mut lfo = Oscillator::sine();
        lfo.start(5.0, SAMPLE_RATE);

        // sin() + powf() per sample
        group.bench_with_input(BenchmarkId::new("pitch_mod", size), &size, |b, _| {
            b.iter(|| {
                render_pitch_modulation(&mut lfo, black_box(0.5), &mut buffer);
            })
        });
    }

    group.finish();
}
