//! Fixed domain tables for procedural objective generation.

use serde::{Deserialize, Serialize};

/// The four elements a djinn pool or class affinity can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    Venus,
    Mercury,
    Mars,
    Jupiter,
}

impl Element {
    pub const ALL: [Element; 4] = [
        Element::Venus,
        Element::Mercury,
        Element::Mars,
        Element::Jupiter,
    ];
}

pub const VENUS_DJINN: [&str; 17] = [
    "Flint", "Granite", "Quartz", "Vine", "Sap", "Ground", "Bane", "Echo", "Steel", "Mud",
    "Flower", "Meld", "Petra", "Salt", "Geode", "Mold", "Crystal",
];

pub const MERCURY_DJINN: [&str; 17] = [
    "Fizz", "Sleet", "Mist", "Spritz", "Hail", "Tonic", "Dew", "Fog", "Sour", "Spring", "Shade",
    "Steam", "Rime", "Gel", "Eddy", "Balm", "Serac",
];

pub const MARS_DJINN: [&str; 18] = [
    "Forge", "Fever", "Corona", "Scorch", "Ember", "Flash", "Torch", "Cannon", "Spark", "Kindle",
    "Char", "Coal", "Reflux", "Core", "Tinder", "Shine", "Fury", "Fugue",
];

pub const JUPITER_DJINN: [&str; 18] = [
    "Gust", "Breeze", "Zephyr", "Smog", "Kite", "Squall", "Luff", "Breath", "Blitz", "Ether",
    "Waft", "Haze", "Wheeze", "Aroma", "Whorl", "Gasp", "Lull", "Gale",
];

/// Djinn pool for an element.
pub fn djinn_pool(element: Element) -> &'static [&'static str] {
    match element {
        Element::Venus => &VENUS_DJINN,
        Element::Mercury => &MERCURY_DJINN,
        Element::Mars => &MARS_DJINN,
        Element::Jupiter => &JUPITER_DJINN,
    }
}

pub const SUMMONS: [&str; 13] = [
    "Zagan",
    "Megaera",
    "Flora",
    "Moloch",
    "Ulysses",
    "Eclipse",
    "Haures",
    "Coatlicue",
    "Daedalus",
    "Azul",
    "Catastrophe",
    "Charon",
    "Iris",
];

/// Summons banned from future draws once the named trigger objective has been
/// selected. The tier-6 trigger bans the whole top tier at once.
pub fn summons_banned_by(objective_name: &str) -> &'static [&'static str] {
    match objective_name {
        "Use Ulysses in battle" => &["Ulysses"],
        "Use Flora in battle" => &["Flora"],
        "Use Moloch in battle" => &["Moloch"],
        "Use a Tier 6 summon (or higher) in battle" => {
            &["Coatlicue", "Azul", "Daedalus", "Catastrophe", "Charon", "Iris"]
        }
        _ => &[],
    }
}

/// How many party members a class combination involves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Arity {
    Dual,
    Triple,
    Quad,
}

impl Arity {
    pub const ALL: [Arity; 3] = [Arity::Dual, Arity::Triple, Arity::Quad];
}

/// Elemental affinity of a class entry. Pairs are order-sensitive: the source
/// table distinguishes (Jupiter, Mercury) from (Mercury, Jupiter) and the
/// coexistence rule compares them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affinity {
    Pair(Element, Element),
    All,
}

/// One row of the class table.
#[derive(Debug, Clone, Copy)]
pub struct ClassEntry {
    pub name: &'static str,
    pub arity: Arity,
    pub affinity: Affinity,
    /// Pre-written objective phrasing; Dual objectives build theirs from the
    /// two class names instead.
    pub phrase: Option<&'static str>,
}

pub const CLASS_TABLE: [ClassEntry; 13] = [
    ClassEntry {
        name: "Enchanter",
        arity: Arity::Dual,
        affinity: Affinity::Pair(Element::Venus, Element::Mars),
        phrase: None,
    },
    ClassEntry {
        name: "Savage",
        arity: Arity::Dual,
        affinity: Affinity::Pair(Element::Venus, Element::Mars),
        phrase: None,
    },
    ClassEntry {
        name: "Cavalier",
        arity: Arity::Dual,
        affinity: Affinity::Pair(Element::Venus, Element::Mars),
        phrase: None,
    },
    ClassEntry {
        name: "Scholar",
        arity: Arity::Dual,
        affinity: Affinity::Pair(Element::Jupiter, Element::Mercury),
        phrase: None,
    },
    ClassEntry {
        name: "Ascetic",
        arity: Arity::Dual,
        affinity: Affinity::Pair(Element::Jupiter, Element::Mercury),
        phrase: None,
    },
    ClassEntry {
        name: "Shaman",
        arity: Arity::Dual,
        affinity: Affinity::Pair(Element::Jupiter, Element::Mercury),
        phrase: None,
    },
    ClassEntry {
        name: "Ninja",
        arity: Arity::Triple,
        affinity: Affinity::Pair(Element::Venus, Element::Mars),
        phrase: Some("Have someone be a Ninja (V, Ma | J)"),
    },
    ClassEntry {
        name: "Ranger",
        arity: Arity::Triple,
        affinity: Affinity::Pair(Element::Mercury, Element::Jupiter),
        phrase: Some("Have someone be a Ranger (Me, J | Ma)"),
    },
    ClassEntry {
        name: "Medium",
        arity: Arity::Triple,
        affinity: Affinity::Pair(Element::Mercury, Element::Jupiter),
        phrase: Some("Have someone be a Medium (Me, J | V)"),
    },
    ClassEntry {
        name: "Dragoon",
        arity: Arity::Triple,
        affinity: Affinity::Pair(Element::Venus, Element::Mars),
        phrase: Some("Have someone be a Dragoon (V, Ma | Me)"),
    },
    ClassEntry {
        name: "Beastkeeper",
        arity: Arity::Quad,
        affinity: Affinity::All,
        phrase: Some("Have someone be a Beastkeeper (T. Whip)"),
    },
    ClassEntry {
        name: "Punchinello",
        arity: Arity::Quad,
        affinity: Affinity::All,
        phrase: Some("Have someone be a Punchinello (M. Card)"),
    },
    ClassEntry {
        name: "Necrolyte",
        arity: Arity::Quad,
        affinity: Affinity::All,
        phrase: Some("Have someone be a Necrolyte (Tomega.)"),
    },
];

/// Class entries of a given arity.
pub fn classes_with_arity(arity: Arity) -> Vec<&'static ClassEntry> {
    CLASS_TABLE.iter().filter(|c| c.arity == arity).collect()
}

/// Whether two class picks may coexist on one board. Only a Dual/Triple pair
/// with identical affinity pairs conflicts.
pub fn classes_compatible(a: &ClassEntry, b: &ClassEntry) -> bool {
    match (a.arity, b.arity) {
        (Arity::Dual, Arity::Triple) | (Arity::Triple, Arity::Dual) => a.affinity != b.affinity,
        _ => true,
    }
}
