//! Stateless waveform shapes.
//!
//! Every shape maps a phase in radians, already wrapped into `[0, 2π)` by the
//! oscillator, to an amplitude in `[-1, 1]`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// The closed set of shapes an [`Oscillator`](super::oscillator::Oscillator)
/// can be built with. Dispatch is a plain `match`, chosen at construction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
}

impl Waveform {
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => sine(phase),
            Waveform::Square => square(phase),
            Waveform::Sawtooth => sawtooth(phase),
        }
    }
}

#[inline]
pub fn sine(phase: f32) -> f32 {
    phase.sin()
}

/// Hard transition at `phase == π`.
///
/// A zero difference (of either sign) counts as positive, so exactly `π`
/// still reads `+1.0`.
#[inline]
pub fn square(phase: f32) -> f32 {
    if PI - phase >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Linear ramp from `-0.5` at phase 0 towards `+0.5` just before `2π`.
#[inline]
pub fn sawtooth(phase: f32) -> f32 {
    phase / TAU - 0.5
}
