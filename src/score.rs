//! Score model: the structured form of a notation document.
//!
//! A [`Score`] is produced once per parse and consumed by the timeline
//! builder. Tracks inside a section share a step grid but may have different
//! lengths; missing steps are rests.

use serde::Serialize;

/// A parsed score: metadata plus sections in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Score {
    pub title: String,
    pub composer: String,
    pub sections: Vec<Section>,
}

/// A named block at a fixed tempo holding parallel instrument tracks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Position of this section within [`Score::sections`].
    pub id: usize,
    pub title: String,
    /// Declared tempo in beats per minute. `0` means "use the default".
    pub tempo: u32,
    pub tracks: Vec<Track>,
}

/// One instrument's row of step symbols.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    /// Instrument identifier.
    pub label: String,
    /// One character per step; a space is a rest.
    pub value: String,
}

impl Track {
    /// A track for `label` with one step per character of `value`.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Number of steps in this track.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Section {
    /// Step span of the section: the length of its longest track.
    pub fn max_steps(&self) -> usize {
        self.tracks.iter().map(Track::len).max().unwrap_or(0)
    }
}
