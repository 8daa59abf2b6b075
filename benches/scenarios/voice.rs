//! Benchmarks for the full voice render path.
//!
//! Pitch modulation, carrier, envelope and delay together, the way the host
//! calls it once per audio block.

use std::{hint::black_box, sync::Arc};

use criterion::{BenchmarkId, Criterion};
use monovox::{io::AudioBuffer, synth::Voice, SynthParams, VoiceConfig};

use crate::BLOCK_SIZES;

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voice");
    let params = Arc::new(SynthParams::new());
    params.lfo_depth.set(0.5);
    params.level.set(0.8);
    let config = VoiceConfig::default().with_sample_rate(48_000.0);

    for &size in BLOCK_SIZES {
        let mut buffer = AudioBuffer::new(2, size);

        // === SUSTAINING ===
        let mut voice = Voice::new(params.clone(), &config).expect("valid config");
        voice.start_note(45, 0.9, 0);
        group.bench_with_input(BenchmarkId::new("sustain", size), &size, |b, _| {
            b.iter(|| {
                let _ = voice.render_next_block(black_box(&mut buffer), 0, size);
            })
        });

        // === RELEASING ===
        // Decay of 1.0 keeps the envelope in its release branch for the whole run.
        let release_params = Arc::new(SynthParams::new());
        release_params.decay.set(1.0);
        let mut voice = Voice::new(release_params, &config).expect("valid config");
        voice.start_note(45, 0.9, 0);
        let _ = voice.stop_note(0.0, true);
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                let _ = voice.render_next_block(black_box(&mut buffer), 0, size);
            })
        });

        // === IDLE ===
        // Delay tail only
        let mut voice = Voice::new(params.clone(), &config).expect("valid config");
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                let _ = voice.render_next_block(black_box(&mut buffer), 0, size);
            })
        });
    }

    group.finish();
}
