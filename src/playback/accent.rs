//! Accent rule: late, diacritic-free triggers for accented vowels.
//!
//! On every instrument except the raw kendang voices, an accented vowel is
//! played a thirty-second note late and resolved as its plain letter.

use unicode_normalization::UnicodeNormalization;

/// Symbols that carry an accent.
pub const ACCENTED: [char; 11] = ['Í', 'Ó', 'É', 'Ú', 'Á', 'í', 'ó', 'é', 'ú', 'á', 'ć'];

/// Labels whose accented symbols are distinct sounds, not accents.
pub const ACCENT_EXEMPT: [&str; 3] = ["kkr", "krw", "krl"];

/// How one symbol should be played on one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Articulation {
    /// Symbol to resolve against the instrument's alphabet.
    pub symbol: char,
    /// Whether the trigger is pushed back by the accent offset.
    pub delayed: bool,
}

pub fn is_accented(label: &str, symbol: char) -> bool {
    !ACCENT_EXEMPT.contains(&label) && ACCENTED.contains(&symbol)
}

/// Base letter of `symbol` with combining marks (U+0300..U+036F) removed.
pub fn strip_diacritics(symbol: char) -> char {
    symbol
        .nfd()
        .find(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .unwrap_or(symbol)
}

pub fn articulate(label: &str, symbol: char) -> Articulation {
    if is_accented(label, symbol) {
        Articulation {
            symbol: strip_diacritics(symbol),
            delayed: true,
        }
    } else {
        Articulation {
            symbol,
            delayed: false,
        }
    }
}
