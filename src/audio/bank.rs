//! Sample bank: the [`VoiceBank`] that feeds the mixer.
//!
//! Owns one voice per atomic instrument and one sample buffer per alphabet
//! symbol. Trigger times arrive in seconds on the audio clock and leave as
//! frame-stamped [`AudioCommand`]s.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use ringbuf::traits::Producer;
use ringbuf::HeapProd;
use tracing::{debug, info, trace, warn};

use crate::instrument::{PitchSlot, Registry};
use crate::playback::VoiceBank;

use super::command::{AudioCommand, VoiceId};
use super::sample::SampleBuffer;
use super::synth;
use super::AudioError;

/// Where audio commands go.
pub trait CommandSink {
    fn send(&mut self, command: AudioCommand) -> Result<(), AudioError>;
}

impl CommandSink for HeapProd<AudioCommand> {
    fn send(&mut self, command: AudioCommand) -> Result<(), AudioError> {
        self.try_push(command).map_err(|_| AudioError::BufferFull)
    }
}

/// Convert a level in dB to linear gain.
pub fn db_to_gain(level_db: f32) -> f32 {
    10f32.powf(level_db / 20.0)
}

#[derive(Debug, Clone)]
pub struct BankOptions {
    pub sample_rate: u32,
    /// Directory holding the WAV files named in the instrument tables.
    pub sounds_dir: Option<PathBuf>,
    /// Seed for synthesized stand-ins.
    pub seed: u64,
}

pub struct SampleBank<S: CommandSink> {
    sink: S,
    options: BankOptions,
    index: HashMap<String, VoiceId>,
    /// Sample file names per voice, in alphabet order.
    layout: Vec<Vec<String>>,
    loaded: Vec<Vec<Arc<[f32]>>>,
    ready: bool,
    dropped: u64,
}

impl<S: CommandSink> SampleBank<S> {
    /// One voice per atomic instrument of `registry`, in registry order.
    pub fn new(registry: &Registry, sink: S, options: BankOptions) -> Self {
        let mut index = HashMap::new();
        let mut layout = Vec::new();
        for (voice, instrument) in registry.atomics().enumerate() {
            index.insert(instrument.id().to_string(), voice);
            layout.push(instrument.samples().to_vec());
        }

        Self {
            sink,
            options,
            index,
            layout,
            loaded: Vec::new(),
            ready: false,
            dropped: 0,
        }
    }

    pub fn voice_count(&self) -> usize {
        self.layout.len()
    }

    pub fn voice_of(&self, instrument: &str) -> Option<VoiceId> {
        self.index.get(instrument).copied()
    }

    /// Buffer played for `slot` on `instrument`, once primed.
    pub fn buffer(&self, instrument: &str, slot: PitchSlot) -> Option<&Arc<[f32]>> {
        let voice = self.voice_of(instrument)?;
        self.loaded.get(voice)?.get(slot.index())
    }

    /// Commands the sink refused.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.send(AudioCommand::SetVolume(volume));
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn frames(&self, seconds: f64) -> u64 {
        (seconds.max(0.0) * self.options.sample_rate as f64).round() as u64
    }

    fn send(&mut self, command: AudioCommand) {
        if let Err(e) = self.sink.send(command) {
            self.dropped += 1;
            warn!(error = %e, dropped = self.dropped, "audio command dropped");
        }
    }

    fn load_all(&mut self) {
        // Files are shared by name; stand-ins by pitch slot, since the same
        // file name can sit at different alphabet positions.
        let mut files: HashMap<String, Arc<[f32]>> = HashMap::new();
        let mut missing: HashSet<String> = HashSet::new();
        let mut tones: HashMap<usize, Arc<[f32]>> = HashMap::new();

        let mut loaded = Vec::with_capacity(self.layout.len());
        for names in &self.layout {
            let mut buffers = Vec::with_capacity(names.len());
            for (slot, name) in names.iter().enumerate() {
                if let Some(buffer) = files.get(name) {
                    buffers.push(Arc::clone(buffer));
                    continue;
                }
                if !missing.contains(name) {
                    if let Some(buffer) = self.load_one(name) {
                        files.insert(name.clone(), Arc::clone(&buffer));
                        buffers.push(buffer);
                        continue;
                    }
                    missing.insert(name.clone());
                }
                let tone = tones
                    .entry(slot)
                    .or_insert_with(|| self.synthesize(PitchSlot(slot)));
                buffers.push(Arc::clone(tone));
            }
            loaded.push(buffers);
        }

        self.loaded = loaded;
        info!(
            voices = self.layout.len(),
            files = files.len(),
            synthesized = tones.len(),
            "voices loaded"
        );
    }

    fn load_one(&self, name: &str) -> Option<Arc<[f32]>> {
        let path = self.options.sounds_dir.as_ref()?.join(name);
        match SampleBuffer::load(&path, self.options.sample_rate) {
            Ok(buffer) => Some(buffer.into_shared()),
            Err(e) => {
                debug!(error = %e, "sample unavailable, synthesizing");
                None
            }
        }
    }

    fn synthesize(&self, slot: PitchSlot) -> Arc<[f32]> {
        let frequency = slot.pitch().map_or(440.0, |p| p.frequency());
        let seed = self.options.seed.wrapping_add(slot.index() as u64);
        Arc::from(synth::struck_tone(frequency, self.options.sample_rate, seed))
    }
}

impl<S: CommandSink> VoiceBank for SampleBank<S> {
    fn prime(&mut self) {
        if !self.ready {
            self.load_all();
            self.ready = true;
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn trigger(&mut self, instrument: &str, slot: PitchSlot, time: f64) {
        let Some(voice) = self.voice_of(instrument) else {
            trace!(instrument, "no voice");
            return;
        };
        let Some(sample) = self.buffer(instrument, slot).cloned() else {
            trace!(instrument, slot = slot.index(), "no buffer for slot");
            return;
        };
        let at = self.frames(time);
        self.send(AudioCommand::Trigger { voice, at, sample });
    }

    fn release(&mut self, instrument: &str, time: f64) {
        if let Some(voice) = self.voice_of(instrument) {
            let at = self.frames(time);
            self.send(AudioCommand::Release { voice, at });
        }
    }

    fn set_output_level(&mut self, instrument: &str, level_db: f32) {
        if let Some(voice) = self.voice_of(instrument) {
            self.send(AudioCommand::SetGain {
                voice,
                gain: db_to_gain(level_db),
            });
        }
    }

    fn cancel_scheduled(&mut self, after: f64) {
        let after = self.frames(after);
        self.send(AudioCommand::Cancel { after });
    }
}
