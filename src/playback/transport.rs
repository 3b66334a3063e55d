//! Transport: tempo, start/stop and a repeating tick schedule.
//!
//! The transport does not keep time itself. Hosts read time from a [`Clock`]
//! and ask the transport which ticks are due up to that instant; each tick
//! is spaced by the subdivision length at the tempo in effect when the
//! previous tick completed, so tempo changes apply from the next tick on.

/// Source of the current time in seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// A note value expressed as divisions of one beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subdivision {
    per_beat: u32,
}

impl Subdivision {
    pub const QUARTER: Subdivision = Subdivision { per_beat: 1 };
    pub const SIXTEENTH: Subdivision = Subdivision { per_beat: 4 };
    pub const THIRTY_SECOND: Subdivision = Subdivision { per_beat: 8 };

    /// Length in seconds at `bpm`.
    pub fn seconds(self, bpm: f64) -> f64 {
        60.0 / bpm / self.per_beat as f64
    }
}

/// Whether the transport clock is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Stopped,
    Started,
}

#[derive(Debug, Clone, Copy)]
struct Repeat {
    interval: Subdivision,
    next_at: f64,
}

#[derive(Debug)]
pub struct Transport {
    bpm: f64,
    state: TransportState,
    repeat: Option<Repeat>,
}

impl Transport {
    /// Create a stopped transport with nothing scheduled.
    pub fn new(bpm: f64) -> Self {
        Self {
            bpm,
            state: TransportState::Stopped,
            repeat: None,
        }
    }

    /// Let scheduled ticks come due.
    pub fn start(&mut self) {
        self.state = TransportState::Started;
    }

    /// Hold every tick; the schedule is kept.
    pub fn stop(&mut self) {
        self.state = TransportState::Stopped;
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state == TransportState::Started
    }

    /// Current tempo in beats per minute.
    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Set a new tempo. Applies to the spacing after the current tick.
    pub fn set_bpm(&mut self, bpm: f64) {
        self.bpm = bpm;
    }

    /// Schedule a repeating tick every `interval`, the first one at `start_at`.
    /// Replaces any existing schedule.
    pub fn schedule_repeat(&mut self, interval: Subdivision, start_at: f64) {
        self.repeat = Some(Repeat {
            interval,
            next_at: start_at,
        });
    }

    /// Drop the scheduled tick, if any.
    pub fn cancel(&mut self) {
        self.repeat = None;
    }

    pub fn is_scheduled(&self) -> bool {
        self.repeat.is_some()
    }

    /// Time of the next tick if it falls at or before `until`.
    /// The tick stays due until [`Transport::complete_tick`] is called.
    pub fn due(&self, until: f64) -> Option<f64> {
        if self.state == TransportState::Stopped {
            return None;
        }
        self.repeat
            .map(|r| r.next_at)
            .filter(|&next_at| next_at <= until)
    }

    /// Move the schedule past the tick just handled.
    pub fn complete_tick(&mut self) {
        let bpm = self.bpm;
        if let Some(repeat) = self.repeat.as_mut() {
            repeat.next_at += repeat.interval.seconds(bpm);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn initial_state() {
        let t = Transport::new(120.0);
        assert_eq!(t.state(), TransportState::Stopped);
        assert!(!t.is_scheduled());
        assert_approx_eq!(t.bpm(), 120.0);
    }

    #[test]
    fn subdivision_lengths() {
        assert_approx_eq!(Subdivision::QUARTER.seconds(120.0), 0.5);
        assert_approx_eq!(Subdivision::SIXTEENTH.seconds(120.0), 0.125);
        assert_approx_eq!(Subdivision::THIRTY_SECOND.seconds(120.0), 0.0625);
        assert_approx_eq!(Subdivision::SIXTEENTH.seconds(60.0), 0.25);
    }

    #[test]
    fn nothing_due_when_stopped() {
        let mut t = Transport::new(120.0);
        t.schedule_repeat(Subdivision::SIXTEENTH, 0.0);
        assert!(t.due(10.0).is_none());
        t.start();
        assert_eq!(t.due(10.0), Some(0.0));
    }

    #[test]
    fn ticks_repeat_at_subdivision() {
        let mut t = Transport::new(120.0);
        t.start();
        t.schedule_repeat(Subdivision::SIXTEENTH, 1.0);
        assert!(t.due(0.99).is_none());

        let mut ticks = Vec::new();
        while let Some(at) = t.due(1.5) {
            ticks.push(at);
            t.complete_tick();
        }
        assert_eq!(ticks.len(), 5);
        assert_approx_eq!(ticks[4], 1.5);
    }

    #[test]
    fn tempo_change_applies_after_current_tick() {
        let mut t = Transport::new(120.0);
        t.start();
        t.schedule_repeat(Subdivision::SIXTEENTH, 0.0);
        assert_eq!(t.due(0.0), Some(0.0));
        t.set_bpm(60.0);
        t.complete_tick();
        assert_approx_eq!(t.due(1.0).unwrap(), 0.25);
    }

    #[test]
    fn cancel_clears_schedule() {
        let mut t = Transport::new(120.0);
        t.start();
        t.schedule_repeat(Subdivision::SIXTEENTH, 0.0);
        t.cancel();
        assert!(t.due(100.0).is_none());
        t.complete_tick();
        assert!(!t.is_scheduled());
    }
}
