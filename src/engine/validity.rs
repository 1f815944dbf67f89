//! Candidate validity predicates. Pure; no side effects.

use std::collections::BTreeMap;

use crate::catalog::{BoardEntry, Objective};
use crate::config::TagLimit;

use super::tags;

/// Whether `candidate` may join the board under the basic constraints:
/// no mutual exclusion against any selected objective (checked in both
/// directions), no duplicate name, and the per-classification cap not yet
/// reached for `classification`.
pub fn is_valid(
    candidate: &Objective,
    board: &[BoardEntry],
    counts: &BTreeMap<u32, usize>,
    max_per_classification: usize,
    classification: u32,
) -> bool {
    for entry in board {
        let selected = &entry.objective;
        if selected.restrictions.contains(&candidate.id)
            || candidate.restrictions.contains(&selected.id)
        {
            return false;
        }
        if selected.name == candidate.name {
            return false;
        }
    }

    counts.get(&classification).copied().unwrap_or(0) < max_per_classification
}

/// Reroll variant: basic validity plus a prospective tag-budget check, so a
/// replacement cannot introduce a new overage.
#[allow(clippy::too_many_arguments)]
pub fn is_valid_reroll(
    candidate: &Objective,
    board: &[BoardEntry],
    counts: &BTreeMap<u32, usize>,
    max_per_classification: usize,
    classification: u32,
    limits: &BTreeMap<String, TagLimit>,
) -> bool {
    is_valid(candidate, board, counts, max_per_classification, classification)
        && !tags::would_violate(board, candidate, limits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obj(id: u32, name: &str, restrictions: &[u32]) -> Objective {
        Objective {
            id,
            name: name.to_string(),
            core_tags: vec![],
            supp_tags: vec![],
            restrictions: restrictions.to_vec(),
        }
    }

    fn entry(classification: u32, objective: Objective) -> BoardEntry {
        BoardEntry {
            classification,
            objective,
        }
    }

    #[test]
    fn test_restriction_checked_both_directions() {
        let board = vec![entry(1, obj(10, "selected", &[20]))];
        let counts = BTreeMap::from([(1, 1)]);

        // Selected names the candidate.
        assert!(!is_valid(&obj(20, "candidate", &[]), &board, &counts, usize::MAX, 2));
        // Candidate names the selected.
        assert!(!is_valid(&obj(30, "candidate", &[10]), &board, &counts, usize::MAX, 2));
        // Unrelated pair passes.
        assert!(is_valid(&obj(40, "candidate", &[99]), &board, &counts, usize::MAX, 2));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let board = vec![entry(1, obj(10, "same", &[]))];
        let counts = BTreeMap::from([(1, 1)]);
        assert!(!is_valid(&obj(11, "same", &[]), &board, &counts, usize::MAX, 2));
    }

    #[test]
    fn test_classification_cap() {
        let board = vec![
            entry(5, obj(1, "a", &[])),
            entry(5, obj(2, "b", &[])),
        ];
        let counts = BTreeMap::from([(5, 2)]);
        assert!(!is_valid(&obj(3, "c", &[]), &board, &counts, 2, 5));
        // A different classification is unaffected.
        assert!(is_valid(&obj(3, "c", &[]), &board, &counts, 2, 6));
        // Unbounded cap admits it.
        assert!(is_valid(&obj(3, "c", &[]), &board, &counts, usize::MAX, 5));
    }

    #[test]
    fn test_reroll_validity_rejects_new_overage() {
        let mut tagged = obj(1, "tagged", &[]);
        tagged.core_tags = vec!["Lift".to_string()];
        let board = vec![entry(1, tagged.clone())];
        let counts = BTreeMap::from([(1, 1)]);
        let limits = BTreeMap::from([("Lift".to_string(), TagLimit::Capped(1))]);

        let mut candidate = obj(2, "candidate", &[]);
        candidate.core_tags = vec!["Lift".to_string()];
        assert!(!is_valid_reroll(&candidate, &board, &counts, usize::MAX, 2, &limits));

        candidate.core_tags.clear();
        assert!(is_valid_reroll(&candidate, &board, &counts, usize::MAX, 2, &limits));
    }
}
