use std::f32::consts::TAU;

use super::waveform::Waveform;

/*
Phase Accumulator
=================

An oscillator here is two numbers and a shape:

  phase        Where we are inside one cycle, in radians, kept in [0, 2π).
  phase_delta  How far phase moves each sample.
                 phase_delta = frequency / sample_rate * 2π
               A delta of zero means the oscillator is not armed.

Each call to `next_sample` reads the shape at the current phase and only then
moves forward. The first sample after a reset or a note-on is therefore
always the shape's value at phase 0:

  sine     0.0   (starts at the zero crossing)
  square  +1.0
  saw     -0.5

Rate modulation multiplies the step for one sample:

  phase += phase_delta * rate

`rate` is a frequency ratio (1.0 = unchanged, 2.0 = octave up), so vibrato
from an LFO arrives here already converted from semitones to a ratio.
*/

#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
    phase_delta: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            phase_delta: 0.0,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn sawtooth() -> Self {
        Self::new(Waveform::Sawtooth)
    }

    /// Zero the phase and set the per-sample increment for `frequency`.
    ///
    /// Non-finite or negative frequencies leave the oscillator inactive.
    pub fn start(&mut self, frequency: f32, sample_rate: f32) {
        self.phase = 0.0;
        self.phase_delta = if frequency.is_finite() && sample_rate > 0.0 {
            (frequency / sample_rate * TAU).max(0.0)
        } else {
            0.0
        };
    }

    /// Back to the inactive state: phase and increment both zero.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.phase_delta = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.phase_delta > 0.0
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let value = self.waveform.sample(self.phase);
        self.advance(self.phase_delta);
        value
    }

    /// Like [`next_sample`](Self::next_sample) but scales this step by `rate`.
    #[inline]
    pub fn next_modulated(&mut self, rate: f32) -> f32 {
        let value = self.waveform.sample(self.phase);
        self.advance(self.phase_delta * rate);
        value
    }

    #[inline]
    fn advance(&mut self, step: f32) {
        if !step.is_finite() {
            return;
        }
        let mut phase = (self.phase + step) % TAU;
        if phase < 0.0 {
            phase += TAU;
        }
        // A tiny negative remainder can round up to exactly 2π.
        if phase >= TAU {
            phase = 0.0;
        }
        self.phase = phase;
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn phase_delta(&self) -> f32 {
        self.phase_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    #[test]
    fn new_oscillator_is_inactive() {
        let osc = Oscillator::square();
        assert!(!osc.is_active());
        assert_eq!(osc.phase(), 0.0);
    }

    #[test]
    fn phase_stays_wrapped() {
        for frequency in [0.5, 440.0, 12_345.0, 23_999.0] {
            let mut osc = Oscillator::sawtooth();
            osc.start(frequency, SAMPLE_RATE);
            for _ in 0..10_000 {
                osc.next_sample();
                assert!(
                    (0.0..TAU).contains(&osc.phase()),
                    "phase {} escaped at {frequency} Hz",
                    osc.phase()
                );
            }
        }
    }

    #[test]
    fn modulated_phase_stays_wrapped() {
        let mut osc = Oscillator::sine();
        osc.start(1_000.0, SAMPLE_RATE);
        for i in 0..10_000 {
            osc.next_modulated(1.0 + (i % 7) as f32);
            assert!((0.0..TAU).contains(&osc.phase()));
        }
    }

    #[test]
    fn unit_rate_matches_unmodulated() {
        let mut plain = Oscillator::square();
        let mut modulated = Oscillator::square();
        plain.start(440.0, SAMPLE_RATE);
        modulated.start(440.0, SAMPLE_RATE);

        for i in 0..4_096 {
            let a = plain.next_sample();
            let b = modulated.next_modulated(1.0);
            assert_eq!(a, b, "diverged at sample {i}");
            assert_eq!(plain.phase(), modulated.phase());
        }
    }

    #[test]
    fn reset_returns_shape_at_phase_zero() {
        let mut osc = Oscillator::sawtooth();
        osc.start(440.0, SAMPLE_RATE);
        for _ in 0..37 {
            osc.next_sample();
        }

        osc.reset();
        assert!(!osc.is_active());
        assert!((osc.next_sample() + 0.5).abs() < 1e-6);
    }

    #[test]
    fn start_computes_phase_delta() {
        let mut osc = Oscillator::sine();
        osc.start(440.0, SAMPLE_RATE);
        assert!(osc.is_active());
        assert!((osc.phase_delta() - 440.0 / SAMPLE_RATE * TAU).abs() < 1e-7);
    }

    #[test]
    fn nonsense_frequency_stays_inactive() {
        let mut osc = Oscillator::sine();
        osc.start(f32::NAN, SAMPLE_RATE);
        assert!(!osc.is_active());
        osc.start(-20.0, SAMPLE_RATE);
        assert!(!osc.is_active());
    }
}
