//! Playback: transport clock, accent rule, voice seam and the scheduler
//! that ties them to a timeline.

pub mod accent;
pub mod scheduler;
pub mod transport;
pub mod voice;

pub use scheduler::{Cursor, PlaybackState, Scheduler, ACCENT_OFFSET, PULSE};
pub use transport::{Clock, Subdivision, Transport, TransportState};
pub use voice::{Recorder, VoiceBank, VoiceCall};
