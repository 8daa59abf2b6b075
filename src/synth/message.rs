#[cfg(feature = "rtrb")]
use rtrb::Consumer;

/// Control messages sent from the UI, MIDI or sequencer thread to the audio thread.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    /// Accepted for completeness; the voice does not bend pitch.
    PitchBend { cents: f32 },
    AllNotesOff,
}

/// Where the audio thread pulls pending messages from.
pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

/// Plain queue, handy for offline rendering and tests.
impl MessageReceiver for std::collections::VecDeque<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        self.pop_front()
    }
}
