//! Low-level DSP primitives used by the voice.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! so the voice can own them directly and call them from the audio callback.

/// Multichannel circular delay with a fixed offset.
pub mod delay;
/// LFO pitch modulation and semitone/cent conversions.
pub mod modulation;
/// Phase accumulator driven by a waveform.
pub mod oscillator;
/// Sine, square and sawtooth shapes.
pub mod waveform;

pub use oscillator::Oscillator;
pub use waveform::Waveform;
