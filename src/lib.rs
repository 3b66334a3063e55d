//! Laras: a notation compiler and playback scheduler for ensemble percussion and vocal scores.

pub mod audio;
pub mod config;
pub mod fs;
pub mod instrument;
pub mod notation;
pub mod playback;
pub mod score;
pub mod timeline;

pub use notation::parse;
pub use score::{Score, Section, Track};
pub use timeline::{build_timeline, InstrumentAction, Timeline, TimelinePoint};
