//! Benchmarks for delay line operations.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monovox::{dsp::delay::DelayLine, io::AudioBuffer, DelayConfig};

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    // Delay times in samples
    let offsets: &[usize] = &[
        480,    // 10ms at 48kHz
        4800,   // 100ms at 48kHz
        48000,  // 1 second at 48kHz
    ];

    for &size in BLOCK_SIZES {
        let mut input = AudioBuffer::new(2, size);
        for ch in 0..2 {
            for (i, sample) in input.channel_mut(ch).iter_mut().enumerate() {
                *sample = (i as f32 * 0.1).sin();
            }
        }

        for &offset in offsets {
            let config = DelayConfig {
                offset_samples: offset,
                ..DelayConfig::default()
            };
            let mut delay = DelayLine::new(2, 96_000, size, &config);
            let mut block = input.clone();
            let delay_ms = offset / 48;

            // Full write / halve / mix pass
            group.bench_with_input(
                BenchmarkId::new(format!("process_{delay_ms}ms"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        for ch in 0..2 {
                            block.channel_mut(ch).copy_from_slice(input.channel(ch));
                        }
                        delay.process(black_box(&mut block), 0, size);
                    })
                },
            );
        }

        // Write only
        let mut delay = DelayLine::new(2, 96_000, size, &DelayConfig::default());
        group.bench_with_input(BenchmarkId::new("write", size), &size, |b, _| {
            b.iter(|| delay.write(black_box(&input), 0, size))
        });
    }

    group.finish();
}
