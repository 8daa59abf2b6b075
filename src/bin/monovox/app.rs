//! Monovox - demo builder: one voice, a phrase, and the default audio device

use std::{thread, time::Duration};

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    SampleFormat,
};
use rtrb::{Producer, RingBuffer};
use std::sync::Arc;
use tracing::{error, info};

use monovox::{
    io::AudioBuffer,
    synth::{MonoSynth, SynthMessage},
    SynthParams, VoiceConfig, MAX_BLOCK_SIZE,
};

const MESSAGE_QUEUE_SIZE: usize = 64;
/// How long to keep the stream open after the last note for the release and echo.
const TAIL_MS: u64 = 2_500;

enum Step {
    Note { note: u8, millis: u64 },
    Rest { millis: u64 },
}

/// Main application builder
pub struct Monovox {
    params: Arc<SynthParams>,
    steps: Vec<Step>,
}

impl Monovox {
    pub fn new() -> Self {
        Self {
            params: Arc::new(SynthParams::new()),
            steps: Vec::new(),
        }
    }

    /// LFO rate in Hz and vibrato depth in semitones.
    pub fn lfo(self, rate: f32, depth: f32) -> Self {
        self.params.lfo_rate.set(rate);
        self.params.lfo_depth.set(depth);
        self
    }

    /// Per-sample release multiplier.
    pub fn decay(self, decay: f32) -> Self {
        self.params.decay.set(decay);
        self
    }

    /// Hold `note` for `millis` milliseconds.
    pub fn note(mut self, note: u8, millis: u64) -> Self {
        self.steps.push(Step::Note { note, millis });
        self
    }

    pub fn rest(mut self, millis: u64) -> Self {
        self.steps.push(Step::Rest { millis });
        self
    }

    /// Open the output device and play the phrase once.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let supported = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;
        if supported.sample_format() != SampleFormat::F32 {
            bail!("unsupported sample format {:?}", supported.sample_format());
        }

        let sample_rate = supported.sample_rate().0 as f32;
        let channels = supported.channels() as usize;
        info!(
            device = %device.name().unwrap_or_else(|_| "<unknown>".into()),
            sample_rate,
            channels,
            "opening output"
        );

        let config = VoiceConfig::default()
            .with_sample_rate(sample_rate)
            .with_channels(2);
        let (tx, rx) = RingBuffer::<SynthMessage>::new(MESSAGE_QUEUE_SIZE);
        let mut synth =
            MonoSynth::new(self.params.clone(), &config, rx).wrap_err("failed to build voice")?;
        let mut block = AudioBuffer::new(config.channels, MAX_BLOCK_SIZE);

        let stream = device.build_output_stream(
            &supported.into(),
            move |data: &mut [f32], _| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    block.clear(0, frames);
                    synth.render_block(&mut block, 0, frames);

                    let offset = frames_written * channels;
                    block.write_interleaved(
                        frames,
                        &mut data[offset..offset + frames * channels],
                        channels,
                    );
                    frames_written += frames;
                }
            },
            |err| error!("audio stream error: {err}"),
            None,
        )?;
        stream.play()?;

        self.play_steps(tx)?;
        thread::sleep(Duration::from_millis(TAIL_MS));
        info!("done");
        Ok(())
    }

    fn play_steps(&self, mut tx: Producer<SynthMessage>) -> EyreResult<()> {
        let base_depth = self.params.lfo_depth.get();

        for (i, step) in self.steps.iter().enumerate() {
            match *step {
                Step::Note { note, millis } => {
                    // Deepen the vibrato on every other note.
                    let depth = if i % 2 == 0 { base_depth } else { base_depth * 2.0 };
                    self.params.lfo_depth.set(depth);

                    info!(note, millis, depth, "note");
                    send(&mut tx, SynthMessage::NoteOn { note, velocity: 110 })?;
                    thread::sleep(Duration::from_millis(millis));
                    send(&mut tx, SynthMessage::NoteOff { note, velocity: 0 })?;
                }
                Step::Rest { millis } => thread::sleep(Duration::from_millis(millis)),
            }
        }

        send(&mut tx, SynthMessage::AllNotesOff)
    }
}

impl Default for Monovox {
    fn default() -> Self {
        Self::new()
    }
}

fn send(tx: &mut Producer<SynthMessage>, msg: SynthMessage) -> EyreResult<()> {
    tx.push(msg).map_err(|_| eyre!("message queue full, dropped {msg:?}"))
}
