//! Board selection engine.
//!
//! Assembles a 25-slot board from the catalog: fill (standard, race, or
//! bucket-quota), tag-budget violation check, and a reroll loop gated by an
//! injected [`DecisionProvider`]. Under-fill is never a hard failure; the
//! engine returns the best board achievable with a warning trail.

pub mod buckets;
pub mod decision;
pub mod tags;
pub mod validity;

use std::collections::BTreeMap;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::catalog::{BoardEntry, Catalog, Objective};
use crate::config::GenerationConfig;
use crate::procgen::{
    generate_class_objectives, generate_djinn_objectives, generate_summon_objective, ProcContext,
};

use buckets::{quota_preset, Bucket};
use decision::DecisionProvider;

/// Target board size.
pub const BOARD_TARGET: usize = 25;

/// Classifications above this are late-game; race mode seats exactly one.
const LATE_GAME_FLOOR: u32 = 21;
/// Mid-range classifications drawn one-per-classification in race mode.
const MID_RANGE: std::ops::RangeInclusive<u32> = 3..=21;
/// Narrower range used when a harder board is requested.
const HARDER_RANGE: std::ops::RangeInclusive<u32> = 16..=21;
/// Classifications excluded by the remove-easy reroll option.
const EASY_CEILING: u32 = 2;

/// Reserved classifications repopulated by procedural mode.
const DJINN_CLASSIFICATION: u32 = 11;
const CLASS_CLASSIFICATION: u32 = 12;
const RESERVED_PICK_CLASSIFICATIONS: [u32; 2] = [21, 23];
/// Synthetic objectives get ids from this range, well clear of catalog ids.
const SYNTHETIC_ID_RANGE: std::ops::RangeInclusive<u32> = 10_000..=99_999;

const BOSS_TAG: &str = "Boss";

/// Finished generation: the board, the warning trail, and any tag violations
/// left standing because the decision provider declined a reroll.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub board: Vec<BoardEntry>,
    pub warnings: Vec<String>,
    pub violations: BTreeMap<String, usize>,
}

impl GenerationOutcome {
    pub fn is_complete(&self) -> bool {
        self.board.len() == BOARD_TARGET
    }
}

/// One run of the selection state machine. Consumes itself on [`run`];
/// board, counts, and procedural state are all scoped to that call.
///
/// [`run`]: SelectionEngine::run
pub struct SelectionEngine<'a, R: Rng, D: DecisionProvider> {
    catalog: Catalog,
    config: &'a GenerationConfig,
    rng: &'a mut R,
    decider: &'a mut D,
    board: Vec<BoardEntry>,
    counts: BTreeMap<u32, usize>,
    warnings: Vec<String>,
}

/// Convenience wrapper around [`SelectionEngine`].
pub fn generate_board<R: Rng, D: DecisionProvider>(
    catalog: Catalog,
    config: &GenerationConfig,
    rng: &mut R,
    decider: &mut D,
) -> GenerationOutcome {
    SelectionEngine::new(catalog, config, rng, decider).run()
}

impl<'a, R: Rng, D: DecisionProvider> SelectionEngine<'a, R, D> {
    pub fn new(
        catalog: Catalog,
        config: &'a GenerationConfig,
        rng: &'a mut R,
        decider: &'a mut D,
    ) -> Self {
        Self {
            catalog,
            config,
            rng,
            decider,
            board: Vec::with_capacity(BOARD_TARGET),
            counts: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Run the full state machine and return the finished board.
    pub fn run(mut self) -> GenerationOutcome {
        let mut ctx = ProcContext::new();

        if self.config.procedural_mode {
            self.procedural_init(&mut ctx);
        }

        if self.config.bucket_mode {
            self.fill_buckets();
        } else if self.config.race_mode {
            self.fill_race();
        } else {
            self.fill_standard();
        }

        let violations = loop {
            let violations = tags::violations(&self.board, &self.config.tag_limits);
            if violations.is_empty() {
                break BTreeMap::new();
            }
            if !self.decider.confirm_reroll(&violations, &self.config.tag_limits) {
                self.warn(format!(
                    "board kept with {} unresolved tag violation(s)",
                    violations.len()
                ));
                break violations;
            }
            self.remove_violating(&violations);
            if self.config.bucket_mode {
                self.refill_buckets();
            } else {
                self.refill_standard();
            }
        };

        if self.config.procedural_mode {
            self.substitute_replaceables(&mut ctx);
        }

        GenerationOutcome {
            board: self.board,
            warnings: self.warnings,
            violations,
        }
    }

    // ---- INIT: procedural repopulation of the reserved classifications ----

    fn procedural_init(&mut self, ctx: &mut ProcContext) {
        // Reserve: clear the procedural classifications, keeping the catalog
        // picks for 21/23 aside.
        let mut originals: BTreeMap<u32, Vec<Objective>> = BTreeMap::new();
        for c in RESERVED_PICK_CLASSIFICATIONS {
            originals.insert(c, self.catalog.replace(c, Vec::new()));
        }
        self.catalog.replace(DJINN_CLASSIFICATION, Vec::new());
        self.catalog.replace(CLASS_CLASSIFICATION, Vec::new());

        let target = if self.config.bucket_mode && self.config.bucket_hard_mode {
            5
        } else {
            4
        };
        let take_21 = self.rng.random_bool(0.5);
        let take_23 = self.rng.random_bool(0.5);
        let remaining = target - usize::from(take_21) - usize::from(take_23);

        // At least one djinn and one class objective; each extra slot leans
        // 2:1 toward djinn, capped at four djinn objectives.
        let extra_slots = remaining.saturating_sub(2);
        let extra_djinn = (0..extra_slots)
            .filter(|_| self.rng.random_bool(2.0 / 3.0))
            .count();
        let num_djinn = (1 + extra_djinn).min(4);
        let num_class = remaining - num_djinn;

        if take_21 {
            self.pick_reserved(21, &originals, ctx, false);
        }
        if take_23 {
            // Classification 23 holds summon triggers; a pick here bans
            // summons from later pair draws.
            self.pick_reserved(23, &originals, ctx, true);
        }

        let batch = generate_djinn_objectives(self.rng, ctx, num_djinn);
        if let Some(shortfall) = batch.shortfall {
            self.warn(format!("djinn generator {}", shortfall));
        }
        for draw in batch.draws {
            self.insert_synthetic(DJINN_CLASSIFICATION, draw.phrase);
        }

        let batch = generate_class_objectives(self.rng, num_class);
        if let Some(shortfall) = batch.shortfall {
            self.warn(format!("class generator {}", shortfall));
        }
        for name in batch.names {
            self.insert_synthetic(CLASS_CLASSIFICATION, name);
        }
    }

    /// Pick one objective from a reserved classification's saved pool, seat
    /// it, and freeze the classification down to that single entry.
    fn pick_reserved(
        &mut self,
        classification: u32,
        originals: &BTreeMap<u32, Vec<Objective>>,
        ctx: &mut ProcContext,
        registers_triggers: bool,
    ) {
        let Some(pool) = originals.get(&classification) else {
            return;
        };
        let eligible: Vec<&Objective> = pool
            .iter()
            .filter(|o| !(self.config.exclude_boss_objectives && o.has_core_tag(BOSS_TAG)))
            .collect();
        let Some(&chosen) = eligible.choose(&mut *self.rng) else {
            return;
        };
        let chosen = chosen.clone();
        if registers_triggers {
            ctx.register_trigger(&chosen.name);
        }
        self.catalog.replace(classification, vec![chosen.clone()]);
        self.push(classification, chosen);
    }

    fn insert_synthetic(&mut self, classification: u32, name: String) {
        let objective = Objective {
            id: self.rng.random_range(SYNTHETIC_ID_RANGE),
            name,
            core_tags: Vec::new(),
            supp_tags: Vec::new(),
            restrictions: Vec::new(),
        };
        self.catalog.insert(classification, objective.clone());
        self.push(classification, objective);
    }

    // ---- FILLING ----

    fn fill_standard(&mut self) {
        let mut classifications = self.catalog.classifications();
        classifications.shuffle(&mut *self.rng);

        for &c in &classifications {
            if self.board.len() >= BOARD_TARGET {
                break;
            }
            self.select_from(&[c], false);
        }
        while self.board.len() < BOARD_TARGET {
            if !self.select_from(&classifications, false) {
                self.warn_shortfall();
                break;
            }
        }
    }

    fn fill_race(&mut self) {
        let all = self.catalog.classifications();

        // One forced late-game pick.
        let mut late: Vec<u32> = all.iter().copied().filter(|&c| c > LATE_GAME_FLOOR).collect();
        late.shuffle(&mut *self.rng);
        if let Some(&first) = late.first() {
            self.select_from(&[first], false);
        }

        // Mid-range, one per classification, up to 24.
        let mut mid: Vec<u32> = all
            .iter()
            .copied()
            .filter(|c| MID_RANGE.contains(c))
            .collect();
        mid.shuffle(&mut *self.rng);
        for &c in &mid {
            if self.board.len() >= BOARD_TARGET - 1 {
                break;
            }
            self.select_from(&[c], false);
        }

        // Fill out to 25 from the mid-range pool, or the harder range when
        // configured.
        let fill_pool: Vec<u32> = if self.config.harder_board {
            all.iter()
                .copied()
                .filter(|c| HARDER_RANGE.contains(c))
                .collect()
        } else {
            mid
        };
        while self.board.len() < BOARD_TARGET {
            if !self.select_from(&fill_pool, false) {
                self.warn_shortfall();
                break;
            }
        }
    }

    fn fill_buckets(&mut self) {
        let pools = self.bucket_pools();
        let quotas = quota_preset(self.config.bucket_hard_mode);

        // Quota multiset, minus slots already seated by procedural init.
        let mut draws: Vec<Bucket> = Vec::new();
        for bucket in Bucket::QUOTA_BUCKETS {
            let already = self.bucket_count(bucket);
            let quota = quotas.get(&bucket).copied().unwrap_or(0);
            draws.extend(std::iter::repeat(bucket).take(quota.saturating_sub(already)));
        }
        draws.shuffle(&mut *self.rng);

        for bucket in draws {
            if !self.select_from_bucket(bucket, &pools, false) {
                self.warn(format!("unable to find valid objective from bucket {}", bucket));
            }
        }
    }

    // ---- REMOVE_AND_REFILL ----

    /// Remove every entry carrying at least one violating tag, newest first,
    /// keeping the classification counts in lockstep.
    fn remove_violating(&mut self, violations: &BTreeMap<String, usize>) {
        for i in (0..self.board.len()).rev() {
            let carries_violation = self.board[i]
                .objective
                .core_tags
                .iter()
                .any(|tag| violations.contains_key(tag));
            if carries_violation {
                let entry = self.board.remove(i);
                if let Some(count) = self.counts.get_mut(&entry.classification) {
                    *count = count.saturating_sub(1);
                }
                tracing::debug!(
                    "removed violating objective {:?} from classification {}",
                    entry.objective.name,
                    entry.classification
                );
            }
        }
    }

    fn refill_standard(&mut self) {
        let mut pool = self.catalog.classifications();
        pool.shuffle(&mut *self.rng);

        if self.config.race_mode {
            if self.config.remove_easy {
                pool.retain(|&c| c > EASY_CEILING);
            }
            if self.config.harder_board {
                pool.retain(|c| *c > LATE_GAME_FLOOR || HARDER_RANGE.contains(c));
            }
            // With the late-game slot already seated, rerolls stay mid-range.
            let late_selected = self
                .board
                .iter()
                .filter(|e| e.classification > LATE_GAME_FLOOR)
                .count();
            if late_selected == 1 {
                pool.retain(|&c| c <= LATE_GAME_FLOOR);
            }
        }

        while self.board.len() < BOARD_TARGET {
            if !self.select_from(&pool, true) {
                self.warn_shortfall();
                break;
            }
        }
    }

    fn refill_buckets(&mut self) {
        let pools = self.bucket_pools();
        let quotas = quota_preset(self.config.bucket_hard_mode);

        while self.board.len() < BOARD_TARGET {
            let mut progressed = false;
            for bucket in Bucket::QUOTA_BUCKETS {
                let quota = quotas.get(&bucket).copied().unwrap_or(0);
                if self.bucket_count(bucket) < quota
                    && self.select_from_bucket(bucket, &pools, true)
                {
                    progressed = true;
                    break;
                }
            }
            if !progressed {
                self.warn_shortfall();
                break;
            }
        }
    }

    // ---- Post-loop substitution (procedural mode) ----

    /// Replace entries whose name is on the configured replaceable list with
    /// fresh summon objectives carrying only a name.
    fn substitute_replaceables(&mut self, ctx: &mut ProcContext) {
        let targets: Vec<usize> = self
            .board
            .iter()
            .enumerate()
            .filter(|(_, entry)| {
                self.config
                    .replaceable_objectives
                    .iter()
                    .any(|name| *name == entry.objective.name)
            })
            .map(|(i, _)| i)
            .collect();

        for i in targets {
            match generate_summon_objective(self.rng, ctx) {
                Some(phrase) => {
                    tracing::debug!(
                        "replaced {:?} with summon objective {:?}",
                        self.board[i].objective.name,
                        phrase
                    );
                    self.board[i].objective = Objective::name_only(phrase);
                }
                None => {
                    self.warn(format!(
                        "no summon combination left to replace {:?}",
                        self.board[i].objective.name
                    ));
                }
            }
        }
    }

    // ---- Selection helpers ----

    /// Try classifications in order; seat the first valid candidate found.
    fn select_from(&mut self, classifications: &[u32], reroll: bool) -> bool {
        for &c in classifications {
            if self.try_select(c, reroll) {
                return true;
            }
        }
        false
    }

    fn try_select(&mut self, classification: u32, reroll: bool) -> bool {
        let mut indices: Vec<usize> = (0..self.catalog.objectives(classification).len()).collect();
        indices.shuffle(&mut *self.rng);

        for i in indices {
            let candidate = &self.catalog.objectives(classification)[i];
            if self.config.exclude_boss_objectives && candidate.has_core_tag(BOSS_TAG) {
                continue;
            }
            let valid = if reroll {
                validity::is_valid_reroll(
                    candidate,
                    &self.board,
                    &self.counts,
                    self.config.max_per_classification(),
                    classification,
                    &self.config.tag_limits,
                )
            } else {
                validity::is_valid(
                    candidate,
                    &self.board,
                    &self.counts,
                    self.config.max_per_classification(),
                    classification,
                )
            };
            if valid {
                let chosen = candidate.clone();
                tracing::debug!(
                    "selected {:?} from classification {}",
                    chosen.name,
                    classification
                );
                self.push(classification, chosen);
                return true;
            }
        }
        false
    }

    fn select_from_bucket(
        &mut self,
        bucket: Bucket,
        pools: &BTreeMap<Bucket, Vec<(u32, Objective)>>,
        reroll: bool,
    ) -> bool {
        let Some(pool) = pools.get(&bucket) else {
            return false;
        };
        let mut indices: Vec<usize> = (0..pool.len()).collect();
        indices.shuffle(&mut *self.rng);

        for i in indices {
            let (classification, candidate) = &pool[i];
            if self.config.exclude_boss_objectives && candidate.has_core_tag(BOSS_TAG) {
                continue;
            }
            let valid = if reroll {
                validity::is_valid_reroll(
                    candidate,
                    &self.board,
                    &self.counts,
                    self.config.max_per_classification(),
                    *classification,
                    &self.config.tag_limits,
                )
            } else {
                validity::is_valid(
                    candidate,
                    &self.board,
                    &self.counts,
                    self.config.max_per_classification(),
                    *classification,
                )
            };
            if valid {
                let (classification, chosen) = (*classification, candidate.clone());
                tracing::debug!("selected {:?} from bucket {}", chosen.name, bucket);
                self.push(classification, chosen);
                return true;
            }
        }
        false
    }

    /// Bucket pools derived from the (frozen) catalog. Unknown-bucket
    /// classifications are excluded from bucket draws entirely.
    fn bucket_pools(&self) -> BTreeMap<Bucket, Vec<(u32, Objective)>> {
        let mut pools: BTreeMap<Bucket, Vec<(u32, Objective)>> = BTreeMap::new();
        for (classification, objectives) in self.catalog.iter() {
            let bucket = Bucket::of(classification);
            if bucket == Bucket::Unknown {
                continue;
            }
            pools
                .entry(bucket)
                .or_default()
                .extend(objectives.iter().map(|o| (classification, o.clone())));
        }
        pools
    }

    fn bucket_count(&self, bucket: Bucket) -> usize {
        self.board
            .iter()
            .filter(|e| Bucket::of(e.classification) == bucket)
            .count()
    }

    fn push(&mut self, classification: u32, objective: Objective) {
        self.board.push(BoardEntry {
            classification,
            objective,
        });
        *self.counts.entry(classification).or_default() += 1;
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    fn warn_shortfall(&mut self) {
        let len = self.board.len();
        self.warn(format!(
            "unable to find more valid objectives, stopping at {} of {}",
            len, BOARD_TARGET
        ));
    }
}
