//! Built-in instrument definitions.
//!
//! Atomic instruments own an alphabet, one sample file per alphabet symbol
//! and an output level in dB. Composite instruments are labels that fan out
//! to two or more atomic instruments.

/// Static definition of an atomic instrument.
#[derive(Debug, Clone, Copy)]
pub struct AtomicDef {
    pub id: &'static str,
    pub alphabet: &'static [char],
    pub samples: &'static [&'static str],
    pub output_level: f32,
}

/// Static definition of a composite instrument.
#[derive(Debug, Clone, Copy)]
pub struct CompositeDef {
    pub id: &'static str,
    pub members: &'static [&'static str],
}

const VOWELS_LOW_HIGH: &[char] = &['O', 'E', 'U', 'A', 'I', 'o', 'e', 'u', 'a', 'i'];
const KENDANG_ALPHABET: &[char] = &['o', 'e', 'n', 'u', 'D', 'T', 'k', 'p', 'ḱ', 'ṕ'];
#[rustfmt::skip]
const KENDANG_SAMPLES: &[&str] = &[
    "kkr_o.wav", "kkr_e.wav", "kkr_n.wav", "kkr_u.wav", "kkr_d.wav",
    "kkr_t.wav", "kkr_k.wav", "kkr_p.wav", "kkr_k-h.wav", "kkr_pak.wav",
];
#[rustfmt::skip]
const GK_SAMPLES: &[&str] = &[
    "gk_o.wav", "gk_e.wav", "gk_u.wav", "gk_a.wav", "gk_i.wav",
    "gk_o-h.wav", "gk_e-h.wav", "gk_u-h.wav", "gk_a-h.wav", "gk_i-h.wav",
];
#[rustfmt::skip]
const GP_SAMPLES: &[&str] = &[
    "gp_o.wav", "gp_e.wav", "gp_u.wav", "gp_a.wav", "gp_i.wav",
    "gp_o-h.wav", "gp_e-h.wav", "gp_u-h.wav", "gp_a-h.wav", "gp_i-h.wav",
];

#[rustfmt::skip]
pub const ATOMIC: &[AtomicDef] = &[
    AtomicDef {
        id: "r1",
        alphabet: &['E', 'U', 'A', 'I', 'O', 'e'],
        samples: &["r_e.wav", "r_u.wav", "r_a.wav", "r_i.wav", "r_o.wav", "r_e-h.wav"],
        output_level: -24.0,
    },
    AtomicDef {
        id: "r2",
        alphabet: &['A', 'I', 'O', 'e', 'u', 'a'],
        samples: &["r_a.wav", "r_i.wav", "r_o.wav", "r_e-h.wav", "r_u-h.wav", "r_a-h.wav"],
        output_level: -24.0,
    },
    AtomicDef {
        id: "r3",
        alphabet: &['e', 'u', 'a', 'i', 'o'],
        samples: &["r_e-h.wav", "r_u-h.wav", "r_a-h.wav", "r_i-h.wav", "r_o-h.wav"],
        output_level: -24.0,
    },
    AtomicDef {
        id: "r4",
        alphabet: &['U', 'a', 'i', 'o', 'e', 'u'],
        samples: &["r_u-h.wav", "r_a-h.wav", "r_i-h.wav", "r_o-h.wav", "r_e-hh.wav", "r_u-hh.wav"],
        output_level: -24.0,
    },
    AtomicDef {
        id: "rs2",
        alphabet: &['a', 'i', 'o', 'e', 'u'],
        samples: &["r_a.wav", "r_i.wav", "r_o.wav", "r_e-h.wav", "r_u-h.wav"],
        output_level: -24.0,
    },
    AtomicDef {
        id: "rs4",
        alphabet: &['a', 'i', 'o', 'e', 'u'],
        samples: &["r_a-h.wav", "r_i-h.wav", "r_o-h.wav", "r_e-hh.wav", "r_u-hh.wav"],
        output_level: -24.0,
    },
    AtomicDef {
        id: "rp1",
        alphabet: &['e', 'u', 'a', 'i', 'o'],
        samples: &["r_e.wav", "r_u.wav", "r_a.wav", "r_i.wav", "r_o.wav"],
        output_level: -24.0,
    },
    AtomicDef {
        id: "rp3",
        alphabet: &['e', 'u', 'a', 'i', 'o'],
        samples: &["r_e-h.wav", "r_u-h.wav", "r_a-h.wav", "r_i-h.wav", "r_o-h.wav"],
        output_level: -24.0,
    },
    AtomicDef {
        id: "ks",
        alphabet: VOWELS_LOW_HIGH,
        samples: GK_SAMPLES,
        output_level: -28.0,
    },
    AtomicDef {
        id: "kp",
        alphabet: VOWELS_LOW_HIGH,
        samples: GK_SAMPLES,
        output_level: -28.0,
    },
    AtomicDef {
        id: "ps",
        alphabet: VOWELS_LOW_HIGH,
        samples: GP_SAMPLES,
        output_level: -28.0,
    },
    AtomicDef {
        id: "pp",
        alphabet: VOWELS_LOW_HIGH,
        samples: GP_SAMPLES,
        output_level: -28.0,
    },
    AtomicDef {
        id: "gr1",
        alphabet: &['E', 'U', 'A', 'I', 'o', 'e', 'u', 'a', 'i'],
        samples: &[
            "gr_e.wav", "gr_u.wav", "gr_a.wav", "gr_i.wav", "gr_o.wav",
            "gr_e-h.wav", "gr_u-h.wav", "gr_a-h.wav", "gr_i-h.wav",
        ],
        output_level: -26.0,
    },
    AtomicDef {
        id: "gr2",
        alphabet: &['E', 'U', 'A', 'I', 'o', 'e', 'u', 'a', 'i'],
        samples: &[
            "gr_e-h.wav", "gr_u-h.wav", "gr_a-h.wav", "gr_i-h.wav", "gr_o-h.wav",
            "gr_e-hh.wav", "gr_u-hh.wav", "gr_a-hh.wav", "gr_i-hh.wav",
        ],
        output_level: -26.0,
    },
    AtomicDef {
        id: "u",
        alphabet: &[],
        samples: &[],
        output_level: -24.0,
    },
    AtomicDef {
        id: "t",
        alphabet: &[],
        samples: &[],
        output_level: -24.0,
    },
    AtomicDef {
        id: "p",
        alphabet: &['U', 'A', 'i', 'o', 'e', 'u', 'a'],
        samples: &[
            "pp_u.wav", "pp_a.wav", "pp_i.wav", "pp_o.wav", "pp_e.wav", "pp_u-h.wav", "pp_a-h.wav",
        ],
        output_level: -22.0,
    },
    AtomicDef {
        id: "c",
        alphabet: &['I', 'O', 'E', 'U', 'A'],
        samples: &["pc_i.wav", "pc_o.wav", "pc_e.wav", "pc_u.wav", "pc_a.wav"],
        output_level: -22.0,
    },
    AtomicDef {
        id: "j",
        alphabet: &['I', 'O', 'E', 'U', 'A'],
        samples: &["pj_i.wav", "pj_o.wav", "pj_e.wav", "pj_u.wav", "pj_a.wav"],
        output_level: -22.0,
    },
    AtomicDef {
        id: "g",
        alphabet: &['G', 'L', 'P', 't'],
        samples: &["g_g.wav", "g_l.wav", "g_p.wav", "g_t.wav"],
        output_level: -20.0,
    },
    AtomicDef {
        id: "km",
        alphabet: &['x'],
        samples: &["km.wav"],
        output_level: -20.0,
    },
    AtomicDef {
        id: "kn",
        alphabet: &['n'],
        samples: &["kn.wav"],
        output_level: -24.0,
    },
    AtomicDef {
        id: "cc",
        alphabet: &['x', 'c', 'C'],
        samples: &["c_x-l.wav", "c_c.wav", "c_c-o.wav"],
        output_level: -28.0,
    },
    AtomicDef {
        id: "kkr",
        alphabet: KENDANG_ALPHABET,
        samples: KENDANG_SAMPLES,
        output_level: -17.0,
    },
    AtomicDef {
        id: "krw",
        alphabet: KENDANG_ALPHABET,
        samples: KENDANG_SAMPLES,
        output_level: -17.0,
    },
    AtomicDef {
        id: "krl",
        alphabet: KENDANG_ALPHABET,
        samples: KENDANG_SAMPLES,
        output_level: -17.0,
    },
    AtomicDef {
        id: "tr",
        alphabet: &['o', 'p', 'x'],
        samples: &["tr_o.wav", "tr_p.wav", "tr_x.wav"],
        output_level: -18.0,
    },
];

#[rustfmt::skip]
pub const COMPOSITE: &[CompositeDef] = &[
    CompositeDef { id: "rs", members: &["rs2", "rs4"] },
    CompositeDef { id: "rp", members: &["rp1", "rp3"] },
    CompositeDef { id: "kt", members: &["ks", "kp"] },
    CompositeDef { id: "pd", members: &["ps", "pp"] },
    CompositeDef { id: "gs", members: &["ks", "ps"] },
    CompositeDef { id: "gp", members: &["kp", "pp"] },
    CompositeDef { id: "gr", members: &["gr1", "gr2"] },
    CompositeDef { id: "ggs", members: &["ks", "kp", "ps", "pp"] },
];
