//! Output stream and audio clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{traits::Split, HeapRb};
use tracing::{error, info};

use crate::playback::Clock;

use super::bank::CommandSink;
use super::command::AudioCommand;
use super::mixer::Mixer;
use super::AudioError;

/// Ring buffer capacity (number of commands).
pub const RING_BUFFER_CAPACITY: usize = 4096;

/// Seconds of audio rendered so far, read from the mixer's frame counter.
#[derive(Debug, Clone)]
pub struct AudioClock {
    frames: Arc<AtomicU64>,
    sample_rate: u32,
}

impl AudioClock {
    pub fn new(frames: Arc<AtomicU64>, sample_rate: u32) -> Self {
        Self {
            frames,
            sample_rate: sample_rate.max(1),
        }
    }
}

impl Clock for AudioClock {
    fn now(&self) -> f64 {
        self.frames.load(Ordering::Acquire) as f64 / self.sample_rate as f64
    }
}

/// The audio engine. Owns the cpal stream and the command producer.
pub struct AudioEngine {
    stream: cpal::Stream,
    producer: ringbuf::HeapProd<AudioCommand>,
    clock: AudioClock,
    sample_rate: u32,
    channels: u16,
}

impl AudioEngine {
    /// Open the default output device with a mixer of `voices` voices.
    pub fn new(voices: usize) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels();

        let rb = HeapRb::<AudioCommand>::new(RING_BUFFER_CAPACITY);
        let (producer, consumer) = rb.split();
        let mut mixer = Mixer::new(consumer, voices, channels, sample_rate);
        let clock = AudioClock::new(mixer.clock(), sample_rate);

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| mixer.process(data),
                |err: cpal::StreamError| error!(error = %err, "audio stream error"),
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

        info!(sample_rate, channels, voices, "audio output open");

        Ok(Self {
            stream,
            producer,
            clock,
            sample_rate,
            channels,
        })
    }

    pub fn clock(&self) -> AudioClock {
        self.clock.clone()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Halt the output stream. The mixer keeps its state.
    pub fn pause(&self) -> Result<(), AudioError> {
        self.stream
            .pause()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))
    }
}

impl CommandSink for AudioEngine {
    fn send(&mut self, command: AudioCommand) -> Result<(), AudioError> {
        self.producer.send(command)
    }
}
