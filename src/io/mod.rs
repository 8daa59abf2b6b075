// Purpose - external interfaces, format conversions

pub mod converter;
pub mod midi;

/// Non-interleaved multichannel sample block.
///
/// The host hands one of these to the render call; the voice adds into it.
#[derive(Debug, Clone, Default)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Allocate `num_channels` channels of `num_samples` zeros.
    pub fn new(num_channels: usize, num_samples: usize) -> Self {
        Self {
            channels: vec![vec![0.0; num_samples]; num_channels],
        }
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn num_samples(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    #[inline]
    pub fn sample(&self, channel: usize, index: usize) -> f32 {
        self.channels[channel][index]
    }

    #[inline]
    pub fn set_sample(&mut self, channel: usize, index: usize, value: f32) {
        self.channels[channel][index] = value;
    }

    pub fn channel(&self, channel: usize) -> &[f32] {
        &self.channels[channel]
    }

    pub fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        &mut self.channels[channel]
    }

    /// Multiply `len` samples starting at `start` on every channel by `gain`.
    pub fn apply_gain(&mut self, start: usize, len: usize, gain: f32) {
        for channel in &mut self.channels {
            for sample in &mut channel[start..start + len] {
                *sample *= gain;
            }
        }
    }

    /// Zero `len` samples starting at `start` on every channel.
    pub fn clear(&mut self, start: usize, len: usize) {
        for channel in &mut self.channels {
            channel[start..start + len].fill(0.0);
        }
    }

    /// Write the first `frames` samples into an interleaved device buffer.
    ///
    /// `out` must hold `frames * out_channels` samples. Device channels beyond
    /// our own repeat the last channel we have.
    pub fn write_interleaved(&self, frames: usize, out: &mut [f32], out_channels: usize) {
        debug_assert!(out.len() >= frames * out_channels);
        let Some(last) = self.channels.len().checked_sub(1) else {
            out[..frames * out_channels].fill(0.0);
            return;
        };
        for (frame, chunk) in out.chunks_mut(out_channels).take(frames).enumerate() {
            for (ch, slot) in chunk.iter_mut().enumerate() {
                *slot = self.channels[ch.min(last)][frame];
            }
        }
    }
}
