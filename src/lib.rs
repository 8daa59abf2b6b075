pub mod config;
pub mod dsp;
pub mod io;
pub mod params; // Shared, lock-free parameter store
pub mod synth; // Voice lifecycle and note plumbing

pub use config::{ConfigError, DelayConfig, VoiceConfig};
pub use params::{ParamSnapshot, SynthParams};

pub const MAX_BLOCK_SIZE: usize = 2048;
