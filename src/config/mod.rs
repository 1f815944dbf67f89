//! Generation configuration: mode toggles, tag budgets, replaceable phrasings.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// Per-tag occurrence cap. `Unbounded` disables the check for that tag and is
/// written as `"-"` in config files, matching the catalog's tabular notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLimit {
    Capped(u32),
    Unbounded,
}

impl TagLimit {
    /// Whether `count` exceeds this limit.
    pub fn exceeded_by(&self, count: usize) -> bool {
        match self {
            TagLimit::Capped(cap) => count > *cap as usize,
            TagLimit::Unbounded => false,
        }
    }
}

impl fmt::Display for TagLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagLimit::Capped(cap) => write!(f, "{}", cap),
            TagLimit::Unbounded => write!(f, "-"),
        }
    }
}

impl Serialize for TagLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TagLimit::Capped(cap) => serializer.serialize_u32(*cap),
            TagLimit::Unbounded => serializer.serialize_str("-"),
        }
    }
}

impl<'de> Deserialize<'de> for TagLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u32),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(TagLimit::Capped(n)),
            Raw::Str(s) if s == "-" => Ok(TagLimit::Unbounded),
            Raw::Str(s) => s
                .trim()
                .parse::<u32>()
                .map(TagLimit::Capped)
                .map_err(|_| de::Error::custom(format!("invalid tag limit: {:?}", s))),
        }
    }
}

/// Generation settings for a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Race mode: at most 2 objectives per classification, two-phase fill
    /// (one late-game slot, then mid-range slots).
    #[serde(default)]
    pub race_mode: bool,

    /// During rerolls, exclude the easiest classifications (1 and 2).
    #[serde(default)]
    pub remove_easy: bool,

    /// Restrict fill-out and rerolls to the harder classification range (16-21).
    #[serde(default)]
    pub harder_board: bool,

    /// Fill by weighted bucket quotas instead of per-classification passes.
    #[serde(default)]
    pub bucket_mode: bool,

    /// Use the hard-mode bucket quota preset.
    #[serde(default)]
    pub bucket_hard_mode: bool,

    /// Skip objectives carrying the "Boss" core tag.
    #[serde(default)]
    pub exclude_boss_objectives: bool,

    /// Replace the reserved classifications with procedurally generated
    /// djinn/summon/class objectives.
    #[serde(default)]
    pub procedural_mode: bool,

    /// Per-tag occurrence caps checked against the finished board.
    #[serde(default = "default_tag_limits")]
    pub tag_limits: BTreeMap<String, TagLimit>,

    /// Exact objective names replaced by fresh summon objectives after
    /// selection, when procedural mode is on.
    #[serde(default = "default_replaceable_objectives")]
    pub replaceable_objectives: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            race_mode: false,
            remove_easy: false,
            harder_board: false,
            bucket_mode: false,
            bucket_hard_mode: false,
            exclude_boss_objectives: false,
            procedural_mode: false,
            tag_limits: default_tag_limits(),
            replaceable_objectives: default_replaceable_objectives(),
        }
    }
}

impl GenerationConfig {
    /// Load config from a JSON file.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to a file.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Per-classification cap implied by the mode toggles.
    pub fn max_per_classification(&self) -> usize {
        if self.race_mode {
            2
        } else {
            usize::MAX
        }
    }
}

fn default_tag_limits() -> BTreeMap<String, TagLimit> {
    use TagLimit::{Capped, Unbounded};

    [
        ("Whirlwind", Capped(5)),
        ("Lash", Capped(2)),
        ("Pound", Capped(2)),
        ("Scoop", Capped(2)),
        ("Reveal", Capped(2)),
        ("Douse", Capped(2)),
        ("Frost", Capped(2)),
        ("Growth", Capped(1)),
        ("Cyclone", Capped(2)),
        ("Sand", Capped(2)),
        ("Parch", Capped(2)),
        ("Burst", Capped(2)),
        ("Grind", Unbounded),
        ("Hover", Unbounded),
        ("Lift", Capped(1)),
        ("Carry", Capped(1)),
        ("Force", Capped(1)),
        ("Blaze", Capped(2)),
        ("Teleport", Capped(2)),
        ("Mind Read", Capped(1)),
        ("RarePsy", Capped(1)),
    ]
    .into_iter()
    .map(|(tag, limit)| (tag.to_string(), limit))
    .collect()
}

fn default_replaceable_objectives() -> Vec<String> {
    [
        "Learn Zagan or Megaera",
        "Learn Moloch or Flora",
        "Learn Ulysses or Coatlicue",
        "Learn Eclipse or Haures",
        "Learn two of Azul, Catastrophe or Daedalus",
        "Learn Iris or Charon",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_limit_roundtrip() {
        let json = serde_json::to_string(&TagLimit::Capped(3)).unwrap();
        assert_eq!(json, "3");
        let json = serde_json::to_string(&TagLimit::Unbounded).unwrap();
        assert_eq!(json, "\"-\"");

        let limit: TagLimit = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(limit, TagLimit::Capped(5));
        let limit: TagLimit = serde_json::from_str("\"-\"").unwrap();
        assert_eq!(limit, TagLimit::Unbounded);
    }

    #[test]
    fn test_default_limits_include_unbounded_entries() {
        let limits = default_tag_limits();
        assert_eq!(limits.get("Grind"), Some(&TagLimit::Unbounded));
        assert_eq!(limits.get("Growth"), Some(&TagLimit::Capped(1)));
        assert_eq!(limits.len(), 21);
    }

    #[test]
    fn test_max_per_classification() {
        let mut config = GenerationConfig::default();
        assert_eq!(config.max_per_classification(), usize::MAX);
        config.race_mode = true;
        assert_eq!(config.max_per_classification(), 2);
    }
}
