//! Instrument registry: read-only lookup from labels to instruments.
//!
//! Built once from definition tables. An atomic instrument maps its alphabet
//! onto pitch slots; a composite instrument owns no mapping and resolves
//! through each of its members independently.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use thiserror::Error;

use super::pitch::{PitchSlot, PITCH_SLOTS};
use super::tables::{AtomicDef, CompositeDef, ATOMIC, COMPOSITE};

/// Problems found when building a registry from custom tables.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("instrument '{0}' is defined more than once")]
    DuplicateId(String),
    #[error("composite '{composite}' refers to unknown instrument '{member}'")]
    UnknownMember { composite: String, member: String },
    #[error("instrument '{id}' has {len} symbols but only {max} pitch slots exist")]
    AlphabetTooLong { id: String, len: usize, max: usize },
    #[error("instrument '{id}' has {alphabet} symbols but {samples} samples")]
    SampleCountMismatch {
        id: String,
        alphabet: usize,
        samples: usize,
    },
}

/// An instrument with its own symbol→pitch mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomicInstrument {
    id: String,
    alphabet: Vec<char>,
    samples: Vec<String>,
    output_level: f32,
}

impl AtomicInstrument {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Sample file names, one per alphabet symbol.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Output level in dB.
    pub fn output_level(&self) -> f32 {
        self.output_level
    }

    /// Pitch slot of `symbol`, or `None` when this instrument has no sound for it.
    pub fn resolve(&self, symbol: char) -> Option<PitchSlot> {
        self.alphabet.iter().position(|&c| c == symbol).map(PitchSlot)
    }
}

/// A label that fans out to several atomic instruments.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeInstrument {
    id: String,
    members: Vec<String>,
}

impl CompositeInstrument {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instrument {
    Atomic(AtomicInstrument),
    Composite(CompositeInstrument),
}

impl Instrument {
    pub fn id(&self) -> &str {
        match self {
            Instrument::Atomic(a) => a.id(),
            Instrument::Composite(c) => c.id(),
        }
    }
}

/// One atomic instrument that will sound for a resolved symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub instrument: &'a str,
    pub slot: PitchSlot,
}

#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<Instrument>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// The built-in registry, assembled on first use.
    pub fn builtin() -> &'static Registry {
        static BUILTIN: OnceLock<Registry> = OnceLock::new();
        BUILTIN.get_or_init(|| Self::assemble(ATOMIC, COMPOSITE))
    }

    /// Build a registry from custom tables, checking their invariants.
    pub fn new(atomic: &[AtomicDef], composite: &[CompositeDef]) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for id in atomic.iter().map(|a| a.id).chain(composite.iter().map(|c| c.id)) {
            if !seen.insert(id) {
                return Err(RegistryError::DuplicateId(id.to_string()));
            }
        }

        for def in atomic {
            if def.alphabet.len() > PITCH_SLOTS.len() {
                return Err(RegistryError::AlphabetTooLong {
                    id: def.id.to_string(),
                    len: def.alphabet.len(),
                    max: PITCH_SLOTS.len(),
                });
            }
            if def.alphabet.len() != def.samples.len() {
                return Err(RegistryError::SampleCountMismatch {
                    id: def.id.to_string(),
                    alphabet: def.alphabet.len(),
                    samples: def.samples.len(),
                });
            }
        }

        for def in composite {
            if let Some(member) = def
                .members
                .iter()
                .find(|m| !atomic.iter().any(|a| a.id == **m))
            {
                return Err(RegistryError::UnknownMember {
                    composite: def.id.to_string(),
                    member: member.to_string(),
                });
            }
        }

        Ok(Self::assemble(atomic, composite))
    }

    fn assemble(atomic: &[AtomicDef], composite: &[CompositeDef]) -> Self {
        let entries: Vec<Instrument> = atomic
            .iter()
            .map(|def| {
                Instrument::Atomic(AtomicInstrument {
                    id: def.id.to_string(),
                    alphabet: def.alphabet.to_vec(),
                    samples: def.samples.iter().map(|s| s.to_string()).collect(),
                    output_level: def.output_level,
                })
            })
            .chain(composite.iter().map(|def| {
                Instrument::Composite(CompositeInstrument {
                    id: def.id.to_string(),
                    members: def.members.iter().map(|m| m.to_string()).collect(),
                })
            }))
            .collect();

        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id().to_string(), i))
            .collect();

        Self { entries, index }
    }

    /// Entry for `id`, atomic or composite.
    pub fn get(&self, id: &str) -> Option<&Instrument> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Whether `id` names any instrument.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Entry for `id` if it is atomic.
    pub fn atomic(&self, id: &str) -> Option<&AtomicInstrument> {
        match self.get(id)? {
            Instrument::Atomic(a) => Some(a),
            Instrument::Composite(_) => None,
        }
    }

    /// Every instrument, atomic first, in definition order.
    pub fn instruments(&self) -> &[Instrument] {
        &self.entries
    }

    /// Every id, atomic first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Instrument::id)
    }

    /// Atomic instruments in definition order. Voice indexes follow this order.
    pub fn atomics(&self) -> impl Iterator<Item = &AtomicInstrument> {
        self.entries.iter().filter_map(|e| match e {
            Instrument::Atomic(a) => Some(a),
            Instrument::Composite(_) => None,
        })
    }

    /// The atomic instruments a label drives: itself, or a composite's members.
    /// Unknown labels drive nothing.
    pub fn members(&self, id: &str) -> Vec<&AtomicInstrument> {
        match self.get(id) {
            Some(Instrument::Atomic(a)) => vec![a],
            Some(Instrument::Composite(c)) => {
                c.members.iter().filter_map(|m| self.atomic(m)).collect()
            }
            None => Vec::new(),
        }
    }

    /// Resolve `symbol` on `label`: one entry per atomic instrument that has a
    /// sound for it. Empty when nothing sounds.
    pub fn resolve(&self, label: &str, symbol: char) -> Vec<Resolved<'_>> {
        self.members(label)
            .into_iter()
            .filter_map(|a| {
                a.resolve(symbol).map(|slot| Resolved {
                    instrument: a.id(),
                    slot,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> &'static Registry {
        Registry::builtin()
    }

    #[test]
    fn builtin_tables_are_valid() {
        assert!(Registry::new(ATOMIC, COMPOSITE).is_ok());
    }

    #[test]
    fn builtin_contains_all_definitions() {
        assert_eq!(registry().instruments().len(), ATOMIC.len() + COMPOSITE.len());
        assert!(registry().contains("kkr"));
        assert!(registry().contains("ggs"));
        assert!(!registry().contains("nope"));
    }

    #[test]
    fn atomic_resolves_by_alphabet_position() {
        let r1 = registry().atomic("r1").unwrap();
        assert_eq!(r1.resolve('E'), Some(PitchSlot(0)));
        assert_eq!(r1.resolve('e'), Some(PitchSlot(5)));
        assert_eq!(r1.resolve('x'), None);
    }

    #[test]
    fn same_symbol_different_slot_per_instrument() {
        let r1 = Resolved {
            instrument: "r1",
            slot: PitchSlot(2),
        };
        let r2 = Resolved {
            instrument: "r2",
            slot: PitchSlot(0),
        };
        assert_eq!(registry().resolve("r1", 'A'), vec![r1]);
        assert_eq!(registry().resolve("r2", 'A'), vec![r2]);
    }

    #[test]
    fn composite_fans_out_to_members() {
        let resolved = registry().resolve("ggs", 'a');
        let ids: Vec<&str> = resolved.iter().map(|r| r.instrument).collect();
        assert_eq!(ids, vec!["ks", "kp", "ps", "pp"]);
        assert!(resolved.iter().all(|r| r.slot == PitchSlot(8)));
    }

    #[test]
    fn composite_resolves_members_independently() {
        let def_atomic = [
            AtomicDef {
                id: "x",
                alphabet: &['a'],
                samples: &["x.wav"],
                output_level: 0.0,
            },
            AtomicDef {
                id: "y",
                alphabet: &['b', 'a'],
                samples: &["y1.wav", "y2.wav"],
                output_level: 0.0,
            },
        ];
        let def_composite = [CompositeDef { id: "xy", members: &["x", "y"] }];
        let reg = Registry::new(&def_atomic, &def_composite).unwrap();

        assert_eq!(
            reg.resolve("xy", 'a'),
            vec![
                Resolved { instrument: "x", slot: PitchSlot(0) },
                Resolved { instrument: "y", slot: PitchSlot(1) },
            ]
        );
        assert_eq!(reg.resolve("xy", 'b'), vec![Resolved { instrument: "y", slot: PitchSlot(0) }]);
    }

    #[test]
    fn unknown_label_or_symbol_resolves_to_nothing() {
        assert!(registry().resolve("missing", 'a').is_empty());
        assert!(registry().resolve("kkr", 'Z').is_empty());
        assert!(registry().resolve("u", 'a').is_empty());
    }

    #[test]
    fn composite_has_no_mapping_of_its_own() {
        assert!(registry().atomic("rs").is_none());
        assert!(matches!(registry().get("rs"), Some(Instrument::Composite(_))));
    }

    #[test]
    fn members_of_atomic_is_itself() {
        let members = registry().members("tr");
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id(), "tr");
    }

    #[test]
    fn output_levels_come_from_tables() {
        assert_eq!(registry().atomic("kkr").unwrap().output_level(), -17.0);
        assert_eq!(registry().atomic("cc").unwrap().output_level(), -28.0);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let atomic = [AtomicDef { id: "a", alphabet: &[], samples: &[], output_level: 0.0 }];
        let composite = [CompositeDef { id: "a", members: &[] }];
        assert_eq!(
            Registry::new(&atomic, &composite).unwrap_err(),
            RegistryError::DuplicateId("a".into())
        );
    }

    #[test]
    fn unknown_member_is_rejected() {
        let composite = [CompositeDef { id: "c", members: &["ghost"] }];
        assert!(matches!(
            Registry::new(&[], &composite),
            Err(RegistryError::UnknownMember { .. })
        ));
    }

    #[test]
    fn long_alphabet_is_rejected() {
        let atomic = [AtomicDef {
            id: "wide",
            alphabet: &['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k'],
            samples: &["1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11"],
            output_level: 0.0,
        }];
        assert!(matches!(
            Registry::new(&atomic, &[]),
            Err(RegistryError::AlphabetTooLong { len: 11, .. })
        ));
    }

    #[test]
    fn ids_list_atomic_then_composite() {
        let ids: Vec<&str> = registry().ids().collect();
        assert_eq!(ids.first(), Some(&"r1"));
        assert_eq!(ids.last(), Some(&"ggs"));
    }
}
