//! Pitch slots shared by every instrument.
//!
//! An instrument's alphabet maps positionally onto this list: the symbol at
//! alphabet index `i` plays slot `i`, whatever the symbol itself is.

/// A named pitch with its MIDI note number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    pub name: &'static str,
    pub midi: u8,
}

impl Pitch {
    /// Equal-tempered frequency in Hz (A4 = 440).
    pub fn frequency(&self) -> f64 {
        440.0 * 2f64.powf((self.midi as f64 - 69.0) / 12.0)
    }
}

/// The ordered pitch-slot list.
pub const PITCH_SLOTS: [Pitch; 10] = [
    Pitch { name: "D4", midi: 62 },
    Pitch { name: "E4", midi: 64 },
    Pitch { name: "G#4", midi: 68 },
    Pitch { name: "A4", midi: 69 },
    Pitch { name: "C#4", midi: 61 },
    Pitch { name: "D5", midi: 74 },
    Pitch { name: "E5", midi: 76 },
    Pitch { name: "G#5", midi: 80 },
    Pitch { name: "A5", midi: 81 },
    Pitch { name: "C#6", midi: 85 },
];

/// Index into [`PITCH_SLOTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchSlot(pub usize);

impl PitchSlot {
    pub fn index(self) -> usize {
        self.0
    }

    pub fn pitch(self) -> Option<&'static Pitch> {
        PITCH_SLOTS.get(self.0)
    }
}
