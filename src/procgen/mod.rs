//! Procedural objective generation: djinn combos, summon pairs, class combos.
//!
//! All three generators draw from fixed domain tables and share a per-run
//! [`ProcContext`] so no item repeats across calls within one generation.

pub mod classes;
pub mod elemental;
pub mod pairs;
pub mod tables;

use std::collections::BTreeSet;

pub use classes::{generate_class_objectives, ClassBatch};
pub use elemental::{generate_djinn_objectives, DjinnBatch, DjinnDraw};
pub use pairs::generate_summon_objective;
pub use tables::{Affinity, Arity, ClassEntry, Element};

/// Retry bound for a single procedurally generated objective.
pub const MAX_COMBO_ATTEMPTS: usize = 100;

/// A generator stopped short of its requested count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub requested: usize,
    pub produced: usize,
}

impl std::fmt::Display for Shortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "produced {} of {} requested objectives",
            self.produced, self.requested
        )
    }
}

/// Run-scoped procedural state. Created fresh at the start of each
/// generation and never persisted across runs.
#[derive(Debug, Default)]
pub struct ProcContext {
    used_djinn: BTreeSet<String>,
    banned_summons: BTreeSet<&'static str>,
}

impl ProcContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a djinn name has already been consumed this run.
    pub fn djinn_used(&self, name: &str) -> bool {
        self.used_djinn.contains(name)
    }

    /// Consume a djinn name for the remainder of the run.
    pub fn mark_djinn_used(&mut self, name: &str) {
        self.used_djinn.insert(name.to_string());
    }

    /// Whether a summon is currently banned from draws.
    pub fn summon_banned(&self, name: &str) -> bool {
        self.banned_summons.contains(name)
    }

    /// Apply the ban set of a selected trigger objective, if it is one.
    pub fn register_trigger(&mut self, objective_name: &str) {
        for banned in tables::summons_banned_by(objective_name) {
            self.banned_summons.insert(banned);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_starts_empty() {
        let ctx = ProcContext::new();
        assert!(!ctx.djinn_used("Flint"));
        assert!(!ctx.summon_banned("Flora"));
    }

    #[test]
    fn test_register_trigger_accumulates() {
        let mut ctx = ProcContext::new();
        ctx.register_trigger("Use Flora in battle");
        ctx.register_trigger("Use a Tier 6 summon (or higher) in battle");
        assert!(ctx.summon_banned("Flora"));
        assert!(ctx.summon_banned("Charon"));
        assert!(!ctx.summon_banned("Zagan"));
    }
}
