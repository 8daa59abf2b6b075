//! Shared synth parameters.
//!
//! The editor (or any control thread) writes through [`Param::set`]; the audio
//! thread reads with [`Param::get`] or takes a clamped [`ParamSnapshot`]. Both
//! sides only touch atomics, so the render path never locks.

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::warn;

/// A single f32 value stored as bits in an `AtomicU32`.
#[derive(Debug)]
pub struct Param {
    name: &'static str,
    min: f32,
    max: f32,
    default: f32,
    bits: AtomicU32,
}

impl Param {
    pub fn new(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            min,
            max,
            default,
            bits: AtomicU32::new(default.to_bits()),
        }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Store `value`, clamped into range. Non-finite values are ignored.
    pub fn set(&self, value: f32) {
        if !value.is_finite() {
            warn!(param = self.name, value, "ignoring non-finite parameter value");
            return;
        }
        let clamped = value.clamp(self.min, self.max);
        if clamped != value {
            warn!(
                param = self.name,
                value,
                clamped,
                "parameter value out of range"
            );
        }
        self.bits.store(clamped.to_bits(), Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.bits.store(self.default.to_bits(), Ordering::Relaxed);
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    pub fn default_value(&self) -> f32 {
        self.default
    }
}

/// Everything the voice reads from the outside world.
#[derive(Debug)]
pub struct SynthParams {
    /// Transposition in semitones applied to the note frequency.
    pub tuning: Param,
    /// Fine tune of the carrier in cents.
    pub fine: Param,
    /// LFO rate in Hz.
    pub lfo_rate: Param,
    /// Vibrato depth in semitones at full LFO swing.
    pub lfo_depth: Param,
    /// Release multiplier applied once per sample.
    pub decay: Param,
    /// Linear output gain.
    pub level: Param,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self::new()
    }
}

impl SynthParams {
    pub fn new() -> Self {
        Self {
            tuning: Param::new("tuning", -48.0, 48.0, 0.0),
            fine: Param::new("fine", -100.0, 100.0, 0.0),
            lfo_rate: Param::new("lfo rate", 0.01, 50.0, 5.0),
            lfo_depth: Param::new("lfo depth", 0.0, 10.0, 0.0),
            decay: Param::new("decay", 0.5, 1.0, 0.9999),
            level: Param::new("level", 0.0, 1.0, 0.5),
        }
    }

    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            tuning: self.tuning.get(),
            fine: self.fine.get(),
            lfo_rate: self.lfo_rate.get(),
            lfo_depth: self.lfo_depth.get(),
            decay: self.decay.get(),
            level: self.level.get(),
        }
        .sanitized()
    }

    pub fn reset_all(&self) {
        for param in self.iter() {
            param.reset();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        [
            &self.tuning,
            &self.fine,
            &self.lfo_rate,
            &self.lfo_depth,
            &self.decay,
            &self.level,
        ]
        .into_iter()
    }
}

/// Plain copy of every parameter, safe to use for a whole block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    pub tuning: f32,
    pub fine: f32,
    pub lfo_rate: f32,
    pub lfo_depth: f32,
    pub decay: f32,
    pub level: f32,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        SynthParams::new().snapshot()
    }
}

impl ParamSnapshot {
    /// Force every field into a range the render path can't blow up on.
    ///
    /// Decay lands in `(0, 1]`, depth, level and LFO rate are non-negative,
    /// and any non-finite value falls back to a neutral one.
    pub fn sanitized(self) -> Self {
        fn finite_or(value: f32, fallback: f32) -> f32 {
            if value.is_finite() {
                value
            } else {
                fallback
            }
        }

        Self {
            tuning: finite_or(self.tuning, 0.0),
            fine: finite_or(self.fine, 0.0),
            lfo_rate: finite_or(self.lfo_rate, 0.0).max(0.0),
            lfo_depth: finite_or(self.lfo_depth, 0.0).max(0.0),
            decay: finite_or(self.decay, 1.0).clamp(f32::MIN_POSITIVE, 1.0),
            level: finite_or(self.level, 0.0).max(0.0),
        }
    }
}
