use std::sync::Arc;

use tracing::debug;

use crate::{
    config::{ConfigError, VoiceConfig},
    dsp::{
        delay::DelayLine,
        modulation::{cents_to_ratio, render_pitch_modulation},
        oscillator::Oscillator,
    },
    io::{converter::midi_note_to_freq, AudioBuffer},
    params::{ParamSnapshot, SynthParams},
};

/*
Voice Lifecycle
===============

One voice plays one note at a time. It owns a square-wave carrier, an LFO
that bends the carrier's pitch, a release envelope, and a feedback delay.

States
------

  Idle        No note. Nothing from the carrier, though the delay can still
              ring out whatever it heard earlier.
  Sustaining  Note held. tail_off == 0, carrier at full level.
  Releasing   Note let go. tail_off starts at 1 and is multiplied by the
              decay factor every sample until it drops to the floor.

    ┌──────┐  start_note   ┌────────────┐  stop_note(tail)  ┌───────────┐
    │ Idle │ ────────────→ │ Sustaining │ ────────────────→ │ Releasing │
    └──────┘               └────────────┘                   └───────────┘
       ↑                         │                               │
       │  stop_note(no tail)     │                               │
       ├─────────────────────────┘                               │
       │  tail_off <= 0.005                                      │
       └─────────────────────────────────────────────────────────┘

Leaving a note (either way) returns `VoiceEvent::NoteCleared` so whoever
manages voices can mark this one free. A second stop_note while releasing
keeps the envelope where it is.

The Release Curve
-----------------

    tail_off[n+1] = tail_off[n] * decay

With decay = 0.9999 at 44.1 kHz the level reaches 0.005 after
ln(0.005) / ln(0.9999) ≈ 53,000 samples, about 1.2 seconds.

Block Render
------------

  1. LFO → pitch-mod buffer (one frequency ratio per sample)
  2. if the LFO is armed: carrier × level (× tail_off) × output level
  3. delay: write, halve, mix 50/50 with the echo
  4. add the result into the caller's buffer

The voice renders into its own scratch block first. Other voices' audio in
the caller's buffer therefore never passes through this voice's delay or
gain stages, and a silent voice adds exactly nothing.
*/

/// Release is considered finished once the envelope reaches this level.
pub const TAIL_OFF_FLOOR: f32 = 0.005;
/// Peak amplitude per unit of note velocity.
pub const VELOCITY_TO_LEVEL: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Sustaining,
    Releasing,
}

/// Lifecycle notification handed back to the voice's owner.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceEvent {
    /// Nothing changed that the owner needs to act on.
    Continue,
    /// The note is over; the voice may be reassigned.
    NoteCleared,
}

pub struct Voice {
    params: Arc<SynthParams>,
    sample_rate: f32,
    max_block_size: usize,

    carrier: Oscillator,
    lfo: Oscillator,
    note: Option<u8>,
    level: f32,
    tail_off: f32,

    pitch_mod: Vec<f32>,
    scratch: AudioBuffer,
    delay: DelayLine,
}

impl Voice {
    /// Build a voice and allocate every buffer it will ever use.
    pub fn new(params: Arc<SynthParams>, config: &VoiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let capacity = config.delay_capacity();
        debug!(
            sample_rate = config.sample_rate,
            channels = config.channels,
            max_block_size = config.max_block_size,
            delay_capacity = capacity,
            delay_offset = config.delay.offset_samples,
            "allocating voice"
        );

        Ok(Self {
            params,
            sample_rate: config.sample_rate,
            max_block_size: config.max_block_size,
            carrier: Oscillator::square(),
            lfo: Oscillator::new(config.lfo_waveform),
            note: None,
            level: 0.0,
            tail_off: 0.0,
            pitch_mod: vec![1.0; config.max_block_size],
            scratch: AudioBuffer::new(config.channels, config.max_block_size),
            delay: DelayLine::new(config.channels, capacity, config.max_block_size, &config.delay),
        })
    }

    /// Every voice can play every note.
    pub fn can_play_sound(&self) -> bool {
        true
    }

    /// Begin `note` at `velocity` (0.0-1.0). Pitch wheel is accepted but not applied.
    pub fn start_note(&mut self, note: u8, velocity: f32, _pitch_wheel: i32) {
        let params = self.params.snapshot();

        self.level = velocity.clamp(0.0, 1.0) * VELOCITY_TO_LEVEL;
        self.tail_off = 0.0;

        let frequency = midi_note_to_freq(note, params.tuning) * cents_to_ratio(params.fine);
        self.carrier.start(frequency, self.sample_rate);
        self.lfo.start(params.lfo_rate, self.sample_rate);
        self.note = Some(note);
    }

    /// Let go of the note, either with a release tail or immediately.
    pub fn stop_note(&mut self, _velocity: f32, allow_tail_off: bool) -> VoiceEvent {
        if allow_tail_off {
            if self.note.is_some() && self.tail_off == 0.0 {
                self.tail_off = 1.0;
            }
            VoiceEvent::Continue
        } else {
            self.note = None;
            self.lfo.reset();
            self.carrier.reset();
            VoiceEvent::NoteCleared
        }
    }

    /// Add `num_samples` of this voice into `out` starting at `start_sample`.
    ///
    /// `out` must hold `start_sample + num_samples` samples per channel. Debug
    /// builds assert it; release builds render only what fits.
    pub fn render_next_block(
        &mut self,
        out: &mut AudioBuffer,
        start_sample: usize,
        num_samples: usize,
    ) -> VoiceEvent {
        debug_assert!(
            start_sample + num_samples <= out.num_samples(),
            "render of {num_samples} samples at {start_sample} overruns a {}-sample buffer",
            out.num_samples()
        );
        let num_samples = num_samples.min(out.num_samples().saturating_sub(start_sample));
        let last_voice_channel = self.scratch.num_channels() - 1;
        let params = self.params.snapshot();

        let mut event = VoiceEvent::Continue;
        let mut done = 0;
        while done < num_samples {
            let len = (num_samples - done).min(self.max_block_size);
            if self.render_chunk(len, &params) == VoiceEvent::NoteCleared {
                event = VoiceEvent::NoteCleared;
            }

            // Host channels beyond the voice's own repeat its last channel.
            for c in 0..out.num_channels() {
                let src = &self.scratch.channel(c.min(last_voice_channel))[..len];
                let dest = &mut out.channel_mut(c)[start_sample + done..start_sample + done + len];
                for (o, &v) in dest.iter_mut().zip(src) {
                    *o += v;
                }
            }
            done += len;
        }

        event
    }

    fn render_chunk(&mut self, len: usize, params: &ParamSnapshot) -> VoiceEvent {
        render_pitch_modulation(&mut self.lfo, params.lfo_depth, &mut self.pitch_mod[..len]);
        self.scratch.clear(0, len);

        let mut event = VoiceEvent::Continue;
        if self.lfo.is_active() {
            let channels = self.scratch.num_channels();
            if self.tail_off > 0.0 {
                for s in 0..len {
                    let sample = self.carrier.next_modulated(self.pitch_mod[s])
                        * self.level
                        * self.tail_off
                        * params.level;
                    for c in 0..channels {
                        self.scratch.set_sample(c, s, sample);
                    }

                    self.tail_off *= params.decay;
                    if self.tail_off <= TAIL_OFF_FLOOR {
                        self.note = None;
                        self.lfo.reset();
                        event = VoiceEvent::NoteCleared;
                        break;
                    }
                }
            } else {
                for s in 0..len {
                    let sample =
                        self.carrier.next_modulated(self.pitch_mod[s]) * self.level * params.level;
                    for c in 0..channels {
                        self.scratch.set_sample(c, s, sample);
                    }
                }
            }
        }

        self.delay.process(&mut self.scratch, 0, len);
        event
    }

    pub fn state(&self) -> VoiceState {
        match self.note {
            None => VoiceState::Idle,
            Some(_) if self.tail_off > 0.0 => VoiceState::Releasing,
            Some(_) => VoiceState::Sustaining,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.note.is_none()
    }

    pub fn current_note(&self) -> Option<u8> {
        self.note
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn tail_off(&self) -> f32 {
        self.tail_off
    }

    pub fn carrier(&self) -> &Oscillator {
        &self.carrier
    }

    pub fn lfo(&self) -> &Oscillator {
        &self.lfo
    }

    pub fn delay(&self) -> &DelayLine {
        &self.delay
    }
}
