/// Channel voice messages the synth understands (or knowingly ignores).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    /// Centered at 0, range -8192..=8191.
    PitchBend { channel: u8, value: i16 },
    ProgramChange { channel: u8, program: u8 },
}

impl MidiEvent {
    /// Decode a raw channel message, e.g. the slice handed over by a MIDI input callback.
    ///
    /// System messages, running status and truncated messages yield `None`.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        let channel = status & 0x0F;
        let data1 = || data.first().map(|b| b & 0x7F);
        let data2 = || data.get(1).map(|b| b & 0x7F);

        match status & 0xF0 {
            0x80 => Some(Self::NoteOff {
                channel,
                key: data1()?,
                velocity: data2()?,
            }),
            0x90 => Some(Self::NoteOn {
                channel,
                key: data1()?,
                velocity: data2()?,
            }),
            0xB0 => Some(Self::ControlChange {
                channel,
                controller: data1()?,
                value: data2()?,
            }),
            0xC0 => Some(Self::ProgramChange {
                channel,
                program: data1()?,
            }),
            0xE0 => {
                let raw = ((data2()? as i16) << 7) | data1()? as i16;
                Some(Self::PitchBend {
                    channel,
                    value: raw - 8192,
                })
            }
            _ => None,
        }
    }
}
