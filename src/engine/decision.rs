//! Reroll decision providers.
//!
//! The engine never decides on its own whether to reroll a board that busts a
//! tag budget; it asks an injected provider. The CLI injects the interactive
//! prompt, batch callers and tests inject a fixed policy.

use std::collections::BTreeMap;

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::config::TagLimit;

/// Synchronous approve/decline gate for rerolling tag-budget violations.
/// Invoked zero or more times per run.
pub trait DecisionProvider {
    fn confirm_reroll(
        &mut self,
        violations: &BTreeMap<String, usize>,
        limits: &BTreeMap<String, TagLimit>,
    ) -> bool;
}

/// Always approves. Useful for headless runs that want a clean board.
#[derive(Debug, Default)]
pub struct AlwaysReroll;

impl DecisionProvider for AlwaysReroll {
    fn confirm_reroll(
        &mut self,
        _violations: &BTreeMap<String, usize>,
        _limits: &BTreeMap<String, TagLimit>,
    ) -> bool {
        true
    }
}

/// Always declines; the board is returned with violations still present.
#[derive(Debug, Default)]
pub struct NeverReroll;

impl DecisionProvider for NeverReroll {
    fn confirm_reroll(
        &mut self,
        _violations: &BTreeMap<String, usize>,
        _limits: &BTreeMap<String, TagLimit>,
    ) -> bool {
        false
    }
}

/// Interactive prompt used by the CLI.
#[derive(Debug, Default)]
pub struct PromptDecision;

impl DecisionProvider for PromptDecision {
    fn confirm_reroll(
        &mut self,
        violations: &BTreeMap<String, usize>,
        limits: &BTreeMap<String, TagLimit>,
    ) -> bool {
        println!("\n{}", style("Tag occurrence limits exceeded:").yellow());
        for (tag, count) in violations {
            let limit = limits
                .get(tag)
                .map(|l| l.to_string())
                .unwrap_or_else(|| "?".to_string());
            println!("  {}: {} occurrences (limit: {})", style(tag).cyan(), count, limit);
        }

        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Reroll the objectives that violate these limits?")
            .default(true)
            .interact()
            .unwrap_or_else(|e| {
                tracing::warn!("prompt failed, keeping board as-is: {}", e);
                false
            })
    }
}

/// Approves a fixed number of rerolls, then declines. Keeps test runs and
/// scripted batch runs bounded even on pathological pools.
#[derive(Debug)]
pub struct BoundedReroll {
    remaining: usize,
}

impl BoundedReroll {
    pub fn new(max_rerolls: usize) -> Self {
        Self {
            remaining: max_rerolls,
        }
    }
}

impl DecisionProvider for BoundedReroll {
    fn confirm_reroll(
        &mut self,
        _violations: &BTreeMap<String, usize>,
        _limits: &BTreeMap<String, TagLimit>,
    ) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
