use crate::{config::DelayConfig, io::AudioBuffer};

/*
Feedback Delay
==============

A delay line remembers the last couple of seconds of a signal and plays it
back late. Here the memory is a circular buffer per channel:

  capacity    Slots per channel. Two seconds of audio at the voice's rate.
  write_pos   Where the current block starts on the circular timeline. It
              moves forward by the block length after every block.
  offset      Delay time in samples. A sample rendered at timeline position
              t is stored in slot (t + offset), so it is read back when the
              timeline reaches that slot, `offset` samples later.

  timeline:   t ──────────────→ t + offset
              write here          read it back here

All positions wrap with a true modulo, so any index maps back into the
buffer however far past the end it points.

A block writes slots [write_pos + offset, write_pos + offset + len) and reads
slots [write_pos, write_pos + len). Those ranges must not meet around the
ring, or the write lands on slots the same block is about to read and the
echo comes out before its source. So the offset is capped at
capacity - max_block, and longer blocks are processed max_block at a time.

Per block the effect does three passes, in this order:

  1. write   copy the fresh block into the buffer, `offset` slots ahead
  2. halve   scale the block by 0.5 to leave headroom for the echo
  3. mix     out = 0.5 * dry + 0.5 * feedback * delayed

The mix ratio is fixed at 50/50. `dry_wet` is carried along with the line so
callers can inspect it, but the mix does not read it.

Feedback is tiny by default (0.001). Nothing here limits the signal, so a
large feedback value will simply make the echo louder.
*/

pub struct DelayLine {
    buffer: Vec<Vec<f32>>,
    capacity: usize,
    write_pos: usize,
    offset: usize,
    max_block: usize,
    feedback: f32,
    dry_wet: f32,
}

impl DelayLine {
    /// Allocate `channels` zeroed rings of `capacity` samples.
    ///
    /// `capacity` is clamped to at least one sample. `max_block` is the longest
    /// stretch `process` handles in one pass; the offset is clamped so that a
    /// pass never overwrites a slot it still has to read.
    pub fn new(channels: usize, capacity: usize, max_block: usize, config: &DelayConfig) -> Self {
        let capacity = capacity.max(1);
        let max_block = max_block.clamp(1, capacity);
        Self {
            buffer: vec![vec![0.0; capacity]; channels],
            capacity,
            write_pos: 0,
            offset: config.offset_samples.min(capacity - max_block),
            max_block,
            feedback: config.feedback.max(0.0),
            dry_wet: config.dry_wet,
        }
    }

    #[inline]
    fn wrap(&self, index: usize) -> usize {
        index % self.capacity
    }

    /// Store `len` samples of `block` starting at `start`, `offset` slots ahead
    /// of the write position.
    pub fn write(&mut self, block: &AudioBuffer, start: usize, len: usize) {
        let channels = self.buffer.len().min(block.num_channels());
        for s in 0..len {
            let slot = self.wrap(self.write_pos + s + self.offset);
            for c in 0..channels {
                let target = &mut self.buffer[c][slot];
                // Cleared then summed, so several writers could share one line.
                *target = 0.0;
                *target += block.sample(c, start + s);
            }
        }
    }

    /// Sample stored at `index`, wrapped into the buffer.
    #[inline]
    pub fn read(&self, channel: usize, index: usize) -> f32 {
        self.buffer[channel][self.wrap(index)]
    }

    /// Run one block through the effect in place, advancing the write position.
    pub fn process(&mut self, block: &mut AudioBuffer, start: usize, len: usize) {
        let mut done = 0;
        while done < len {
            let chunk = (len - done).min(self.max_block);
            self.process_chunk(block, start + done, chunk);
            done += chunk;
        }
    }

    fn process_chunk(&mut self, block: &mut AudioBuffer, start: usize, len: usize) {
        self.write(block, start, len);
        block.apply_gain(start, len, 0.5);

        let channels = self.buffer.len().min(block.num_channels());
        for s in 0..len {
            let read_index = self.write_pos + s;
            for c in 0..channels {
                let dry = block.sample(c, start + s);
                let delayed = self.read(c, read_index);
                block.set_sample(c, start + s, dry * 0.5 + delayed * 0.5 * self.feedback);
            }
        }

        self.write_pos = self.wrap(self.write_pos + len);
    }

    pub fn reset(&mut self) {
        for channel in &mut self.buffer {
            channel.fill(0.0);
        }
        self.write_pos = 0;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn max_block(&self) -> usize {
        self.max_block
    }

    pub fn write_position(&self) -> usize {
        self.write_pos
    }

    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    pub fn dry_wet(&self) -> f32 {
        self.dry_wet
    }

    pub fn num_channels(&self) -> usize {
        self.buffer.len()
    }
}
