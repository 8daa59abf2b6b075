use crate::{dsp::modulation::semitones_to_ratio, io::midi::MidiEvent, synth::message::SynthMessage};

pub fn midi_to_synth(midi: MidiEvent, channel_filter: u8) -> Option<SynthMessage> {
    match midi {
        MidiEvent::NoteOn {
            channel,
            key,
            velocity: 0,
        } if channel == channel_filter => Some(SynthMessage::NoteOff {
            note: key,
            velocity: 0,
        }),
        MidiEvent::NoteOn {
            channel,
            key,
            velocity,
        } if channel == channel_filter => Some(SynthMessage::NoteOn {
            note: key,
            velocity,
        }),
        MidiEvent::NoteOff {
            channel,
            key,
            velocity,
        } if channel == channel_filter => Some(SynthMessage::NoteOff {
            note: key,
            velocity,
        }),
        MidiEvent::PitchBend { channel, value } if channel == channel_filter => {
            // ±8192 maps to ±2 semitones.
            Some(SynthMessage::PitchBend {
                cents: value as f32 / 8192.0 * 200.0,
            })
        }
        _ => None,
    }
}

/// MIDI note number to Hz, A4 = 440 Hz, shifted by `tuning_semitones`.
pub fn midi_note_to_freq(note: u8, tuning_semitones: f32) -> f32 {
    440.0 * semitones_to_ratio(note as f32 - 69.0 + tuning_semitones)
}

/// MIDI velocity (0-127) to the 0.0-1.0 range the voice expects.
pub fn velocity_to_unit(velocity: u8) -> f32 {
    velocity.min(127) as f32 / 127.0
}
