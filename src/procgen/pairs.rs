//! Summon pair generator.
//!
//! Draws two distinct summons not currently banned by a selected trigger
//! objective. With only one eligible summon left the phrasing degrades to a
//! single name; with none left there is no valid combination.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::tables::SUMMONS;
use super::ProcContext;

/// Generate a summon objective phrase, or `None` if every summon is banned.
pub fn generate_summon_objective<R: Rng>(rng: &mut R, ctx: &ProcContext) -> Option<String> {
    let available: Vec<&'static str> = SUMMONS
        .iter()
        .copied()
        .filter(|name| !ctx.summon_banned(name))
        .collect();

    match available.len() {
        0 => None,
        1 => Some(format!("Learn {}", available[0])),
        _ => {
            let picks: Vec<&'static str> = available.choose_multiple(rng, 2).copied().collect();
            Some(format!("Learn {} or {}", picks[0], picks[1]))
        }
    }
}
