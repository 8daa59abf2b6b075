//! Construction-time voice configuration.
//!
//! Everything here is fixed once a [`Voice`](crate::synth::voice::Voice) is
//! built: buffer sizes depend on it, so changing it means building a new voice.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{dsp::waveform::Waveform, MAX_BLOCK_SIZE};

/// Seconds of audio the delay buffer holds.
pub const DELAY_BUFFER_SECONDS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("sample rate must be a positive finite number, got {0}")]
    SampleRate(f32),
    #[error("max block size must be at least one sample")]
    BlockSize,
    #[error("a voice needs at least one output channel")]
    Channels,
    #[error(
        "delay offset of {offset} samples plus a {max_block_size}-sample block \
         does not fit a {capacity}-sample delay buffer"
    )]
    DelayOffset {
        offset: usize,
        max_block_size: usize,
        capacity: usize,
    },
    #[error("delay feedback must be finite and non-negative, got {0}")]
    Feedback(f32),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DelayConfig {
    /// Distance between the write and read positions, in samples.
    pub offset_samples: usize,
    /// Gain applied to the delayed signal when it is mixed back in.
    pub feedback: f32,
    /// Stored with the delay line; the mix itself is a fixed 50/50.
    pub dry_wet: f32,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            offset_samples: 44_100 / 20,
            feedback: 0.001,
            dry_wet: 1.0,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceConfig {
    pub sample_rate: f32,
    pub max_block_size: usize,
    pub channels: usize,
    pub lfo_waveform: Waveform,
    pub delay: DelayConfig,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            max_block_size: MAX_BLOCK_SIZE,
            channels: 2,
            lfo_waveform: Waveform::Sine,
            delay: DelayConfig::default(),
        }
    }
}

impl VoiceConfig {
    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_max_block_size(mut self, max_block_size: usize) -> Self {
        self.max_block_size = max_block_size;
        self
    }

    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_lfo_waveform(mut self, waveform: Waveform) -> Self {
        self.lfo_waveform = waveform;
        self
    }

    pub fn with_delay(mut self, delay: DelayConfig) -> Self {
        self.delay = delay;
        self
    }

    /// Delay buffer length per channel: two seconds of audio.
    pub fn delay_capacity(&self) -> usize {
        (self.sample_rate as usize) * DELAY_BUFFER_SECONDS
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sample_rate.is_finite() || self.sample_rate < 1.0 {
            return Err(ConfigError::SampleRate(self.sample_rate));
        }
        if self.max_block_size == 0 {
            return Err(ConfigError::BlockSize);
        }
        if self.channels == 0 {
            return Err(ConfigError::Channels);
        }
        let capacity = self.delay_capacity();
        // A block's writes must not wrap onto the slots it reads.
        if self.delay.offset_samples + self.max_block_size > capacity {
            return Err(ConfigError::DelayOffset {
                offset: self.delay.offset_samples,
                max_block_size: self.max_block_size,
                capacity,
            });
        }
        if !self.delay.feedback.is_finite() || self.delay.feedback < 0.0 {
            return Err(ConfigError::Feedback(self.delay.feedback));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = VoiceConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.delay_capacity(), 88_200);
        assert_eq!(config.delay.offset_samples, 2_205);
    }

    #[test]
    fn rejects_bad_sample_rates() {
        for rate in [0.0, -44_100.0, f32::NAN, f32::INFINITY] {
            let config = VoiceConfig::default().with_sample_rate(rate);
            assert!(matches!(config.validate(), Err(ConfigError::SampleRate(_))));
        }
    }

    #[test]
    fn rejects_offset_beyond_buffer() {
        let config = VoiceConfig::default()
            .with_sample_rate(1_000.0)
            .with_max_block_size(64)
            .with_delay(DelayConfig {
                offset_samples: 2_000,
                ..DelayConfig::default()
            });
        assert_eq!(
            config.validate(),
            Err(ConfigError::DelayOffset {
                offset: 2_000,
                max_block_size: 64,
                capacity: 2_000
            })
        );
    }

    #[test]
    fn offset_leaves_room_for_one_block() {
        let with_offset = |offset_samples| {
            VoiceConfig::default().with_delay(DelayConfig {
                offset_samples,
                ..DelayConfig::default()
            })
        };

        // 88_200 slots at 44.1 kHz, 2048-sample blocks.
        assert_eq!(with_offset(86_152).validate(), Ok(()));
        assert!(matches!(
            with_offset(86_153).validate(),
            Err(ConfigError::DelayOffset { .. })
        ));
        assert!(matches!(
            with_offset(88_000).validate(),
            Err(ConfigError::DelayOffset { .. })
        ));
    }

    #[test]
    fn rejects_empty_shapes() {
        assert_eq!(
            VoiceConfig::default().with_channels(0).validate(),
            Err(ConfigError::Channels)
        );
        assert_eq!(
            VoiceConfig::default().with_max_block_size(0).validate(),
            Err(ConfigError::BlockSize)
        );
    }

    #[test]
    fn rejects_negative_feedback() {
        let config = VoiceConfig::default().with_delay(DelayConfig {
            feedback: -0.5,
            ..DelayConfig::default()
        });
        assert!(matches!(config.validate(), Err(ConfigError::Feedback(_))));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let message = ConfigError::SampleRate(0.0).to_string();
        assert!(message.contains("sample rate"));
    }
}
