//! LFO-to-pitch modulation and the pitch unit conversions it relies on.

use super::oscillator::Oscillator;

/// Frequency ratio for a pitch offset in semitones (`12.0` → `2.0`).
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    2.0_f32.powf(semitones / 12.0)
}

/// Frequency ratio for a pitch offset in cents (`1200.0` → `2.0`).
#[inline]
pub fn cents_to_ratio(cents: f32) -> f32 {
    2.0_f32.powf(cents / 1200.0)
}

/// Fill `out` with one rate multiplier per sample.
///
/// Each entry is `semitones_to_ratio(lfo * depth)`, ready to pass to
/// [`Oscillator::next_modulated`]. An inactive LFO sits at phase zero, so a
/// sine LFO that was never armed yields a flat `1.0` buffer.
pub fn render_pitch_modulation(lfo: &mut Oscillator, depth: f32, out: &mut [f32]) {
    for slot in out.iter_mut() {
        *slot = semitones_to_ratio(lfo.next_sample() * depth);
    }
}
