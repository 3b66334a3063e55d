//! Playback scheduler: walks a [`Timeline`] on a repeating tick and drives
//! a [`VoiceBank`].
//!
//! ```text
//! Idle ──play──▶ Priming ──voices ready──▶ Ready ◀──▶ Playing
//! ```
//!
//! The host polls the scheduler with the current clock time (plus any
//! lookahead). Every due tick plays the timeline point under the cursor and
//! advances it; the final point stops playback and rewinds the cursor.
//! An explicit stop leaves the cursor where it is so play resumes there.

use std::collections::HashSet;

use tracing::{debug, info, trace};

use crate::instrument::Registry;
use crate::timeline::{InstrumentAction, Timeline, DEFAULT_TEMPO, MUTE_SYMBOL};

use super::accent;
use super::transport::{Subdivision, Transport};
use super::voice::VoiceBank;

/// Tick length of the playback clock.
pub const PULSE: Subdivision = Subdivision::SIXTEENTH;

/// Delay applied to accented triggers.
pub const ACCENT_OFFSET: Subdivision = Subdivision::THIRTY_SECOND;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Voices have not been requested yet.
    Idle,
    /// Voices are loading; playback starts once they are ready.
    Priming,
    /// Ready to play, cursor at rest.
    Ready,
    Playing,
}

/// A point handed to the voices, possibly ahead of the clock.
#[derive(Debug, Clone, Copy)]
struct SentTick {
    index: usize,
    at: f64,
    /// Transport tempo before the point ran.
    bpm: f64,
}

/// Cursor position for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Index into the timeline.
    pub index: usize,
    pub section_id: usize,
    pub section_step: usize,
}

pub struct Scheduler<'r, V: VoiceBank> {
    timeline: Timeline,
    registry: &'r Registry,
    voices: V,
    transport: Transport,
    state: PlaybackState,
    cursor: usize,
    muted: HashSet<String>,
    /// Points played since the last start, in tick order.
    sent: Vec<SentTick>,
    /// A play request arrived while priming.
    start_pending: bool,
}

impl<'r, V: VoiceBank> Scheduler<'r, V> {
    /// An idle scheduler with the cursor at the start of `timeline`.
    pub fn new(timeline: Timeline, registry: &'r Registry, voices: V) -> Self {
        Self {
            timeline,
            registry,
            voices,
            transport: Transport::new(DEFAULT_TEMPO as f64),
            state: PlaybackState::Idle,
            cursor: 0,
            muted: HashSet::new(),
            sent: Vec::new(),
            start_pending: false,
        }
    }

    /// Request playback at `now`.
    ///
    /// The first request primes the voices; playback begins as soon as they
    /// are ready (immediately, or on a later [`Scheduler::poll`]).
    pub fn play(&mut self, now: f64) {
        match self.state {
            PlaybackState::Idle => {
                self.set_state(PlaybackState::Priming);
                self.start_pending = true;
                self.voices.prime();
                self.finish_priming(now);
            }
            PlaybackState::Priming => self.start_pending = true,
            PlaybackState::Ready => self.start(now),
            PlaybackState::Playing => {}
        }
    }

    /// Stop playback at `now`, silencing every instrument.
    ///
    /// Points already sent for a tick later than `now` are cancelled with
    /// everything else, so the cursor moves back to the first of them and
    /// play resumes there.
    pub fn stop(&mut self, now: f64) {
        match self.state {
            PlaybackState::Playing => {
                self.halt(now);
                self.rewind_unplayed(now);
                info!(cursor = self.cursor, "playback stopped");
            }
            PlaybackState::Priming => self.start_pending = false,
            PlaybackState::Idle | PlaybackState::Ready => {}
        }
    }

    /// Play if stopped, stop if playing.
    pub fn toggle(&mut self, now: f64) {
        if self.is_playing() {
            self.stop(now);
        } else {
            self.play(now);
        }
    }

    /// Run every tick due at or before `until`.
    pub fn poll(&mut self, until: f64) {
        if self.state == PlaybackState::Priming {
            self.finish_priming(until);
        }
        while self.state == PlaybackState::Playing {
            let Some(at) = self.transport.due(until) else {
                break;
            };
            self.tick(at);
            self.transport.complete_tick();
        }
    }

    /// Flip the mute flag of `label`. Returns whether it is now muted.
    pub fn toggle_mute(&mut self, label: &str) -> bool {
        if self.muted.remove(label) {
            false
        } else {
            self.muted.insert(label.to_string());
            true
        }
    }

    /// Whether actions on `label` are skipped.
    pub fn is_muted(&self, label: &str) -> bool {
        self.muted.contains(label)
    }

    /// Muted labels, sorted.
    pub fn muted(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.muted.iter().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// Move the cursor to `step` of section `section_id`.
    /// Returns false, leaving the cursor alone, when that point does not exist.
    pub fn seek(&mut self, section_id: usize, step: usize) -> bool {
        match self.timeline.position_of(section_id, step) {
            Some(index) => {
                self.cursor = index;
                self.sent.clear();
                true
            }
            None => false,
        }
    }

    /// Swap in a rebuilt timeline. The cursor rewinds if it falls past the end.
    pub fn set_timeline(&mut self, timeline: Timeline) {
        self.timeline = timeline;
        self.sent.clear();
        if self.cursor >= self.timeline.len() {
            self.cursor = 0;
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Current playback state, for display.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Timeline index of the next point to play.
    pub fn cursor_index(&self) -> usize {
        self.cursor
    }

    /// Section and step under the cursor; `None` for an empty timeline.
    pub fn cursor(&self) -> Option<Cursor> {
        self.timeline.get(self.cursor).map(|p| Cursor {
            index: self.cursor,
            section_id: p.section_id,
            section_step: p.section_step,
        })
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn voices(&self) -> &V {
        &self.voices
    }

    pub fn voices_mut(&mut self) -> &mut V {
        &mut self.voices
    }

    /// End the session and hand back the voice bank.
    pub fn into_voices(self) -> V {
        self.voices
    }

    fn set_state(&mut self, state: PlaybackState) {
        debug!(from = ?self.state, to = ?state, "playback state");
        self.state = state;
    }

    fn finish_priming(&mut self, now: f64) {
        if !self.voices.is_ready() {
            return;
        }
        for instrument in self.registry.atomics() {
            self.voices
                .set_output_level(instrument.id(), instrument.output_level());
        }
        self.set_state(PlaybackState::Ready);
        if std::mem::take(&mut self.start_pending) {
            self.start(now);
        }
    }

    fn start(&mut self, now: f64) {
        self.silence(now);
        self.sent.clear();
        self.transport.schedule_repeat(PULSE, now);
        if !self.transport.is_started() {
            self.transport.start();
        }
        self.set_state(PlaybackState::Playing);
        info!(cursor = self.cursor, points = self.timeline.len(), "playback started");
    }

    fn halt(&mut self, at: f64) {
        self.silence(at);
        self.set_state(PlaybackState::Ready);
    }

    /// Cancel the tick and anything queued past `at`, then release everything at `at`.
    fn silence(&mut self, at: f64) {
        self.transport.cancel();
        self.voices.cancel_scheduled(at);
        self.mute_all(at);
    }

    fn tick(&mut self, at: f64) {
        if self.cursor >= self.timeline.len() {
            self.halt(at);
            self.cursor = 0;
            return;
        }

        let bpm = self.transport.bpm();
        self.sent.push(SentTick {
            index: self.cursor,
            at,
            bpm,
        });
        let point = &self.timeline.points()[self.cursor];
        for action in &point.actions {
            perform(self.registry, &mut self.voices, &self.muted, action, at, bpm);
        }

        let tempo = point.tempo as f64;
        if tempo != bpm {
            debug!(from = bpm, to = tempo, "tempo change");
            self.transport.set_bpm(tempo);
        }

        if self.cursor + 1 >= self.timeline.len() {
            // The final point still rings for one pulse.
            self.halt(at + PULSE.seconds(self.transport.bpm()));
            self.cursor = 0;
            info!("playback finished");
        } else {
            self.cursor += 1;
        }
    }

    /// Take back the points whose tick is still in the future at `now`.
    fn rewind_unplayed(&mut self, now: f64) {
        if let Some(first) = self.sent.iter().find(|t| t.at > now) {
            debug!(from = self.cursor, to = first.index, "rewinding unplayed points");
            self.cursor = first.index;
            self.transport.set_bpm(first.bpm);
        }
        self.sent.clear();
    }

    /// Release every known instrument, muted or not.
    fn mute_all(&mut self, time: f64) {
        for id in self.registry.ids() {
            release_label(self.registry, &mut self.voices, id, time);
        }
    }
}

/// Play one action at tick time `at`.
fn perform<V: VoiceBank>(
    registry: &Registry,
    voices: &mut V,
    muted: &HashSet<String>,
    action: &InstrumentAction,
    at: f64,
    bpm: f64,
) {
    if muted.contains(&action.label) {
        return;
    }
    if !registry.contains(&action.label) {
        trace!(label = %action.label, "unknown instrument");
        return;
    }

    let articulation = accent::articulate(&action.label, action.symbol);
    let time = if articulation.delayed {
        at + ACCENT_OFFSET.seconds(bpm)
    } else {
        at
    };

    if articulation.symbol == MUTE_SYMBOL {
        release_label(registry, voices, &action.label, time);
        return;
    }

    for resolved in registry.resolve(&action.label, articulation.symbol) {
        // One note per instrument: a new stroke chokes the previous one.
        voices.release(resolved.instrument, time);
        voices.trigger(resolved.instrument, resolved.slot, time);
    }
}

fn release_label<V: VoiceBank>(registry: &Registry, voices: &mut V, label: &str, time: f64) {
    for member in registry.members(label) {
        voices.release(member.id(), time);
    }
}
