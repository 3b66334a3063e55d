//! Voice bank: the sound-producing side the scheduler drives.
//!
//! The scheduler never makes sound itself. It addresses atomic instruments
//! by id through a [`VoiceBank`], passing absolute trigger times in seconds
//! on the same clock it was polled with.

use crate::instrument::PitchSlot;

pub trait VoiceBank {
    /// Begin loading voices. Playback waits until [`VoiceBank::is_ready`].
    fn prime(&mut self);

    fn is_ready(&self) -> bool;

    /// Start `slot` on `instrument` at `time`.
    fn trigger(&mut self, instrument: &str, slot: PitchSlot, time: f64);

    /// Release whatever `instrument` is sounding at `time`.
    fn release(&mut self, instrument: &str, time: f64);

    /// Set the output level of `instrument`, in dB.
    fn set_output_level(&mut self, instrument: &str, level_db: f32);

    /// Drop every trigger and release scheduled later than `after`.
    fn cancel_scheduled(&mut self, after: f64);
}

/// A call made on a [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceCall {
    Trigger {
        instrument: String,
        slot: PitchSlot,
        time: f64,
    },
    Release {
        instrument: String,
        time: f64,
    },
    SetOutputLevel {
        instrument: String,
        level_db: f32,
    },
    CancelScheduled {
        after: f64,
    },
}

/// A voice bank that makes no sound and keeps a log of every call.
///
/// Used for dry runs and for checking what a session would play.
#[derive(Debug, Default)]
pub struct Recorder {
    calls: Vec<VoiceCall>,
    primed: bool,
    ready: bool,
    defer_ready: bool,
}

impl Recorder {
    /// A recorder that is ready as soon as it is primed.
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that stays not-ready after priming until [`Recorder::finish_loading`].
    pub fn deferred() -> Self {
        Self {
            defer_ready: true,
            ..Self::default()
        }
    }

    pub fn finish_loading(&mut self) {
        if self.primed {
            self.ready = true;
        }
    }

    pub fn is_primed(&self) -> bool {
        self.primed
    }

    pub fn calls(&self) -> &[VoiceCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<VoiceCall> {
        std::mem::take(&mut self.calls)
    }

    /// Triggers only, as `(instrument, slot, time)`.
    pub fn triggers(&self) -> Vec<(&str, PitchSlot, f64)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                VoiceCall::Trigger {
                    instrument,
                    slot,
                    time,
                } => Some((instrument.as_str(), *slot, *time)),
                _ => None,
            })
            .collect()
    }

    /// Instruments released, in call order.
    pub fn releases(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                VoiceCall::Release { instrument, .. } => Some(instrument.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl VoiceBank for Recorder {
    fn prime(&mut self) {
        self.primed = true;
        self.ready = !self.defer_ready;
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn trigger(&mut self, instrument: &str, slot: PitchSlot, time: f64) {
        self.calls.push(VoiceCall::Trigger {
            instrument: instrument.to_string(),
            slot,
            time,
        });
    }

    fn release(&mut self, instrument: &str, time: f64) {
        self.calls.push(VoiceCall::Release {
            instrument: instrument.to_string(),
            time,
        });
    }

    fn set_output_level(&mut self, instrument: &str, level_db: f32) {
        self.calls.push(VoiceCall::SetOutputLevel {
            instrument: instrument.to_string(),
            level_db,
        });
    }

    fn cancel_scheduled(&mut self, after: f64) {
        self.calls.push(VoiceCall::CancelScheduled { after });
    }
}
