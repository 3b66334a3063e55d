//! Mixer: runs on the cpal audio thread.
//!
//! Drains commands from the ring buffer, fires frame-stamped voice events as
//! their frame comes up, sums one voice per atomic instrument, then applies
//! master volume and the limiter. The frame counter it publishes is the
//! audio clock the scheduler is polled against.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ringbuf::traits::Consumer;
use ringbuf::HeapCons;

use super::command::{AudioCommand, VoiceId};
use super::limiter::Limiter;

/// Length of the release fade, in seconds.
pub const RELEASE_SECONDS: f32 = 0.03;

/// Initial room for pending events; grows if a burst exceeds it.
const PENDING_CAPACITY: usize = 1024;

#[derive(Debug)]
enum VoiceEvent {
    Start(Arc<[f32]>),
    Release,
}

#[derive(Debug)]
struct Pending {
    at: u64,
    voice: VoiceId,
    event: VoiceEvent,
}

/// One monophonic sample player.
#[derive(Debug)]
struct Voice {
    sample: Option<Arc<[f32]>>,
    pos: usize,
    gain: f32,
    /// Frames left in the release fade.
    fade: Option<usize>,
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            sample: None,
            pos: 0,
            gain: 1.0,
            fade: None,
        }
    }
}

impl Voice {
    fn start(&mut self, sample: Arc<[f32]>) {
        self.sample = Some(sample);
        self.pos = 0;
        self.fade = None;
    }

    fn release(&mut self, fade_frames: usize) {
        if self.sample.is_some() && self.fade.is_none() {
            self.fade = Some(fade_frames);
        }
    }

    fn silence(&mut self) {
        self.sample = None;
        self.pos = 0;
        self.fade = None;
    }

    fn is_sounding(&self) -> bool {
        self.sample.is_some()
    }

    fn next(&mut self, fade_frames: usize) -> f32 {
        let value = match &self.sample {
            Some(sample) => sample.get(self.pos).copied(),
            None => return 0.0,
        };
        let Some(value) = value else {
            self.silence();
            return 0.0;
        };
        self.pos += 1;

        let envelope = match self.fade {
            None => 1.0,
            Some(0) => {
                self.silence();
                return 0.0;
            }
            Some(left) => {
                self.fade = Some(left - 1);
                left as f32 / fade_frames as f32
            }
        };
        value * self.gain * envelope
    }
}

/// State that lives on the audio thread. Accessed only from the cpal callback.
pub struct Mixer {
    consumer: HeapCons<AudioCommand>,
    voices: Vec<Voice>,
    pending: VecDeque<Pending>,
    frame: u64,
    clock: Arc<AtomicU64>,
    volume: f32,
    limiter: Limiter,
    channels: usize,
    fade_frames: usize,
}

impl Mixer {
    pub fn new(
        consumer: HeapCons<AudioCommand>,
        voices: usize,
        channels: u16,
        sample_rate: u32,
    ) -> Self {
        let fade_frames = ((sample_rate as f32 * RELEASE_SECONDS) as usize).max(1);
        Self {
            consumer,
            voices: (0..voices).map(|_| Voice::default()).collect(),
            pending: VecDeque::with_capacity(PENDING_CAPACITY),
            frame: 0,
            clock: Arc::new(AtomicU64::new(0)),
            volume: 1.0,
            limiter: Limiter::default(),
            channels: channels.max(1) as usize,
            fade_frames,
        }
    }

    /// Shared frame counter, updated after every callback.
    pub fn clock(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.clock)
    }

    /// Frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_sounding(&self, voice: VoiceId) -> bool {
        self.voices.get(voice).is_some_and(Voice::is_sounding)
    }

    pub fn limiter(&self) -> &Limiter {
        &self.limiter
    }

    /// Fill interleaved `output`, every channel carrying the same mono mix.
    pub fn process(&mut self, output: &mut [f32]) {
        while let Some(command) = self.consumer.try_pop() {
            self.apply(command);
        }

        let fade_frames = self.fade_frames;
        for frame in output.chunks_mut(self.channels) {
            self.fire_due();

            let mix: f32 = self
                .voices
                .iter_mut()
                .map(|voice| voice.next(fade_frames))
                .sum();
            let sample = self.limiter.process(mix * self.volume);
            frame.fill(sample);

            self.frame += 1;
        }

        self.clock.store(self.frame, Ordering::Release);
    }

    fn apply(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::Trigger { voice, at, sample } => {
                self.schedule(at, voice, VoiceEvent::Start(sample));
            }
            AudioCommand::Release { voice, at } => {
                self.schedule(at, voice, VoiceEvent::Release);
            }
            AudioCommand::SetGain { voice, gain } => {
                if let Some(v) = self.voices.get_mut(voice) {
                    v.gain = gain.max(0.0);
                }
            }
            AudioCommand::SetVolume(v) => {
                self.volume = v.clamp(0.0, 1.0);
            }
            AudioCommand::Cancel { after } => {
                self.pending.retain(|p| p.at <= after);
            }
        }
    }

    /// Queue an event, keeping the queue ordered by frame and FIFO within a frame.
    fn schedule(&mut self, at: u64, voice: VoiceId, event: VoiceEvent) {
        if voice >= self.voices.len() {
            return;
        }
        let index = self.pending.partition_point(|p| p.at <= at);
        self.pending.insert(index, Pending { at, voice, event });
    }

    fn fire_due(&mut self) {
        let now = self.frame;
        while self.pending.front().is_some_and(|p| p.at <= now) {
            let Some(pending) = self.pending.pop_front() else {
                break;
            };
            let voice = &mut self.voices[pending.voice];
            match pending.event {
                VoiceEvent::Start(sample) => voice.start(sample),
                VoiceEvent::Release => voice.release(self.fade_frames),
            }
        }
    }
}
