//! Candidate objective catalog, grouped by classification code.

pub mod loader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use loader::load_catalog;

/// A single candidate objective.
///
/// `restrictions` lists ids this objective mutually excludes. The relation is
/// declared one-directionally per record but enforced symmetrically: a pair is
/// invalid if either side names the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub core_tags: Vec<String>,
    #[serde(default)]
    pub supp_tags: Vec<String>,
    #[serde(default)]
    pub restrictions: Vec<u32>,
}

impl Objective {
    /// A bare objective carrying only a display name. Used for procedural
    /// substitutions, which discard tags, id, and restrictions.
    pub fn name_only(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            core_tags: Vec::new(),
            supp_tags: Vec::new(),
            restrictions: Vec::new(),
        }
    }

    /// Whether this objective carries the given core tag.
    pub fn has_core_tag(&self, tag: &str) -> bool {
        self.core_tags.iter().any(|t| t == tag)
    }
}

/// A board slot: the chosen objective paired with the classification it was
/// drawn from, so removal and bucket accounting never rescan the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct BoardEntry {
    pub classification: u32,
    pub objective: Objective,
}

/// Catalog of candidate objectives keyed by classification code.
///
/// Built once per run. Procedural mode replaces the reserved classifications
/// before selection begins; after that the catalog is read-only.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    by_classification: BTreeMap<u32, Vec<Objective>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All classification codes present, in ascending order.
    pub fn classifications(&self) -> Vec<u32> {
        self.by_classification.keys().copied().collect()
    }

    /// Objectives under a classification; empty slice if absent.
    pub fn objectives(&self, classification: u32) -> &[Objective] {
        self.by_classification
            .get(&classification)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn insert(&mut self, classification: u32, objective: Objective) {
        self.by_classification
            .entry(classification)
            .or_default()
            .push(objective);
    }

    /// Swap out everything under a classification, returning the previous
    /// contents. Used by procedural mode to reserve classifications.
    pub fn replace(&mut self, classification: u32, objectives: Vec<Objective>) -> Vec<Objective> {
        std::mem::replace(
            self.by_classification.entry(classification).or_default(),
            objectives,
        )
    }

    /// Total objective count across all classifications.
    pub fn len(&self) -> usize {
        self.by_classification.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Objective])> {
        self.by_classification
            .iter()
            .map(|(c, objs)| (*c, objs.as_slice()))
    }
}
