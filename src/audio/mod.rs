//! Audio: cpal output, lock-free command queue, sample voices and master limiter.
//!
//! The control thread turns scheduler calls into frame-stamped
//! [`AudioCommand`]s and pushes them through a ring buffer; the [`Mixer`]
//! drains them in the cpal callback and renders the voices.

pub mod bank;
pub mod command;
pub mod engine;
pub mod limiter;
pub mod mixer;
pub mod sample;
pub mod synth;

use thiserror::Error;

pub use bank::{db_to_gain, BankOptions, CommandSink, SampleBank};
pub use command::{AudioCommand, VoiceId};
pub use engine::{AudioClock, AudioEngine};
pub use limiter::Limiter;
pub use mixer::Mixer;
pub use sample::{SampleBuffer, SampleError};

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device found")]
    NoOutputDevice,
    #[error("device config error: {0}")]
    DeviceConfig(String),
    #[error("stream build error: {0}")]
    StreamBuild(String),
    #[error("stream play error: {0}")]
    StreamPlay(String),
    /// The mixer is not draining commands fast enough.
    #[error("audio command ring buffer is full")]
    BufferFull,
}
