use std::sync::Arc;

use tracing::debug;

use crate::{
    config::{ConfigError, VoiceConfig},
    io::{converter::velocity_to_unit, AudioBuffer},
    params::SynthParams,
    synth::{
        message::{MessageReceiver, SynthMessage},
        voice::{Voice, VoiceEvent},
    },
};

/// A single voice driven by a message queue.
///
/// This is the smallest host a [`Voice`] needs: it drains pending note
/// messages at the top of each block, renders the voice every block (so the
/// delay tail keeps ringing after a note ends) and keeps track of which note
/// is sounding. New notes retrigger the one voice.
pub struct MonoSynth<R: MessageReceiver> {
    voice: Voice,
    rx: R,
    sounding: Option<u8>,
    frame_counter: u64,
}

impl<R: MessageReceiver> MonoSynth<R> {
    pub fn new(params: Arc<SynthParams>, config: &VoiceConfig, rx: R) -> Result<Self, ConfigError> {
        let voice = Voice::new(params, config)?;
        debug!(sample_rate = config.sample_rate, "mono synth ready");

        Ok(Self {
            voice,
            rx,
            sounding: None,
            frame_counter: 0,
        })
    }

    /// Handle queued messages, then add `num_samples` of audio into `out` at `start_sample`.
    pub fn render_block(&mut self, out: &mut AudioBuffer, start_sample: usize, num_samples: usize) {
        while let Some(msg) = self.rx.pop() {
            self.handle(msg);
        }

        let event = self.voice.render_next_block(out, start_sample, num_samples);
        self.apply(event);
        self.frame_counter += num_samples as u64;
    }

    fn handle(&mut self, msg: SynthMessage) {
        match msg {
            SynthMessage::NoteOn { note, velocity } => {
                self.voice.start_note(note, velocity_to_unit(velocity), 0);
                self.sounding = Some(note);
            }
            SynthMessage::NoteOff { note, velocity } => {
                if self.sounding == Some(note) {
                    let event = self.voice.stop_note(velocity_to_unit(velocity), true);
                    self.apply(event);
                }
            }
            SynthMessage::AllNotesOff => {
                if self.sounding.is_some() {
                    let event = self.voice.stop_note(0.0, true);
                    self.apply(event);
                }
            }
            SynthMessage::PitchBend { .. } => {}
        }
    }

    /// Silence the voice at once, skipping the release tail.
    pub fn panic(&mut self) {
        let event = self.voice.stop_note(0.0, false);
        self.apply(event);
    }

    fn apply(&mut self, event: VoiceEvent) {
        if event == VoiceEvent::NoteCleared {
            self.sounding = None;
        }
    }

    /// The message source, e.g. to queue events when `R` is a plain `VecDeque`.
    pub fn receiver_mut(&mut self) -> &mut R {
        &mut self.rx
    }

    pub fn sounding_note(&self) -> Option<u8> {
        self.sounding
    }

    pub fn voice(&self) -> &Voice {
        &self.voice
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frame_counter
    }
}
