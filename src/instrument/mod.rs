//! Instruments: pitch slots, built-in definition tables and the registry.

pub mod pitch;
pub mod registry;
pub mod tables;

pub use pitch::{Pitch, PitchSlot, PITCH_SLOTS};
pub use registry::{
    AtomicInstrument, CompositeInstrument, Instrument, Registry, RegistryError, Resolved,
};
