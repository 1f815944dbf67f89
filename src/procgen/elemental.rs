//! Djinn combo generator.
//!
//! Each objective names two djinn from a primary element and one from a
//! different secondary element. Djinn are consumed for the rest of the run,
//! and each objective in a batch takes a distinct primary element.

use std::collections::BTreeSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use super::tables::{djinn_pool, Element};
use super::{ProcContext, Shortfall, MAX_COMBO_ATTEMPTS};

/// One generated djinn objective.
#[derive(Debug, Clone)]
pub struct DjinnDraw {
    pub phrase: String,
    pub primary: Element,
    pub names: [String; 3],
}

/// Result of a batch request. `shortfall` is set when the retry bound ran out
/// before `requested` objectives were produced.
#[derive(Debug)]
pub struct DjinnBatch {
    pub draws: Vec<DjinnDraw>,
    pub shortfall: Option<Shortfall>,
}

/// Generate up to `count` djinn objectives, consuming djinn from `ctx`.
pub fn generate_djinn_objectives<R: Rng>(
    rng: &mut R,
    ctx: &mut ProcContext,
    count: usize,
) -> DjinnBatch {
    let mut used_primaries: BTreeSet<Element> = BTreeSet::new();
    let mut draws = Vec::with_capacity(count);

    'objectives: for _ in 0..count {
        for _ in 0..MAX_COMBO_ATTEMPTS {
            let Some(draw) = draw_once(rng, ctx) else {
                continue;
            };
            if used_primaries.contains(&draw.primary) {
                continue;
            }
            used_primaries.insert(draw.primary);
            for name in &draw.names {
                ctx.mark_djinn_used(name);
            }
            draws.push(draw);
            continue 'objectives;
        }
        break;
    }

    let shortfall = (draws.len() < count).then(|| Shortfall {
        requested: count,
        produced: draws.len(),
    });
    DjinnBatch { draws, shortfall }
}

/// One draw attempt: pick a primary element with at least two unused djinn
/// and a different secondary element with at least one. The phrase lists the
/// primary pair first.
fn draw_once<R: Rng>(rng: &mut R, ctx: &ProcContext) -> Option<DjinnDraw> {
    let pools: Vec<(Element, Vec<&'static str>)> = Element::ALL
        .iter()
        .map(|&element| {
            let unused = djinn_pool(element)
                .iter()
                .copied()
                .filter(|name| !ctx.djinn_used(name))
                .collect();
            (element, unused)
        })
        .collect();

    let primary_pool: Vec<&(Element, Vec<&'static str>)> =
        pools.iter().filter(|entry| entry.1.len() >= 2).collect();
    let chosen = primary_pool.choose(rng)?;
    let primary = chosen.0;

    let pair: Vec<&'static str> = chosen.1.choose_multiple(rng, 2).copied().collect();

    let secondary_pool: Vec<&(Element, Vec<&'static str>)> = pools
        .iter()
        .filter(|entry| entry.0 != primary && !entry.1.is_empty())
        .collect();
    let secondary = secondary_pool.choose(rng)?;
    let third = *secondary.1.choose(rng)?;

    Some(DjinnDraw {
        phrase: format!("Befriend {}, {}, or {}", pair[0], pair[1], third),
        primary,
        names: [pair[0].to_string(), pair[1].to_string(), third.to_string()],
    })
}
