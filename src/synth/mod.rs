// Purpose: the voice itself, plus the plumbing that feeds it note events

pub mod message;
pub mod mono;
pub mod voice;

pub use message::{MessageReceiver, SynthMessage};
pub use mono::MonoSynth;
pub use voice::{Voice, VoiceEvent, VoiceState};
