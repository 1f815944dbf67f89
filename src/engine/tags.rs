//! Tag budget tracking: occurrence counts and overage detection.

use std::collections::BTreeMap;

use crate::catalog::{BoardEntry, Objective};
use crate::config::TagLimit;

/// Count core-tag occurrences across the board, restricted to tags that
/// appear in the limit table.
pub fn occurrences(
    board: &[BoardEntry],
    limits: &BTreeMap<String, TagLimit>,
) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for entry in board {
        for tag in &entry.objective.core_tags {
            if limits.contains_key(tag) {
                *counts.entry(tag.clone()).or_default() += 1;
            }
        }
    }
    counts
}

/// Tags whose occurrence count exceeds their configured cap. Unbounded caps
/// never violate.
pub fn violations(
    board: &[BoardEntry],
    limits: &BTreeMap<String, TagLimit>,
) -> BTreeMap<String, usize> {
    occurrences(board, limits)
        .into_iter()
        .filter(|(tag, count)| {
            limits
                .get(tag)
                .is_some_and(|limit| limit.exceeded_by(*count))
        })
        .collect()
}

/// Whether adding `candidate` to the board would leave any tag over budget.
/// Used prospectively when rerolling, so a replacement never recreates the
/// overage it is fixing.
pub fn would_violate(
    board: &[BoardEntry],
    candidate: &Objective,
    limits: &BTreeMap<String, TagLimit>,
) -> bool {
    let mut counts = occurrences(board, limits);
    for tag in &candidate.core_tags {
        if limits.contains_key(tag) {
            *counts.entry(tag.clone()).or_default() += 1;
        }
    }
    counts.into_iter().any(|(tag, count)| {
        limits
            .get(&tag)
            .is_some_and(|limit| limit.exceeded_by(count))
    })
}
