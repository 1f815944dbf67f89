//! Generate command: build a board from a catalog CSV.

use std::path::PathBuf;

use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::catalog::{load_catalog, BoardEntry};
use crate::config::GenerationConfig;
use crate::engine::decision::{AlwaysReroll, NeverReroll, PromptDecision};
use crate::engine::{generate_board, GenerationOutcome, BOARD_TARGET};

/// How reroll confirmations are answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RerollPolicy {
    /// Ask interactively.
    #[default]
    Prompt,
    /// Approve every reroll.
    Always,
    /// Decline every reroll; violations are reported on the final board.
    Never,
}

/// Options for the generate command
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Catalog CSV path
    pub catalog: PathBuf,
    /// Board output path (JSON array of names)
    pub output: PathBuf,
    /// Optional generation config file
    pub config: Option<PathBuf>,
    /// RNG seed for reproducible boards
    pub seed: Option<u64>,
    /// Skip interactive prompts (use config + CLI flags)
    pub yes: bool,
    pub race_mode: bool,
    pub remove_easy: bool,
    pub harder_board: bool,
    pub bucket_mode: bool,
    pub bucket_hard_mode: bool,
    pub procedural_mode: bool,
    pub exclude_boss: bool,
    pub reroll: RerollPolicy,
}

#[derive(Serialize)]
struct BoardName<'a> {
    name: &'a str,
}

/// Execute the generate command
pub fn execute_generate(options: GenerateOptions) -> Result<()> {
    let catalog = load_catalog(&options.catalog)?;
    println!(
        "{} Loaded {} objectives across {} classifications",
        style("✓").green(),
        catalog.len(),
        catalog.classifications().len()
    );

    let mut config = match &options.config {
        Some(path) => GenerationConfig::load(path)?,
        None => GenerationConfig::default(),
    };
    if options.yes {
        apply_cli_options(&mut config, &options);
    } else {
        run_interactive_setup(&mut config)?;
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let outcome = match options.reroll {
        RerollPolicy::Prompt => {
            generate_board(catalog, &config, &mut rng, &mut PromptDecision)
        }
        RerollPolicy::Always => generate_board(catalog, &config, &mut rng, &mut AlwaysReroll),
        RerollPolicy::Never => generate_board(catalog, &config, &mut rng, &mut NeverReroll),
    };

    let names: Vec<BoardName<'_>> = outcome
        .board
        .iter()
        .map(|entry| BoardName {
            name: &entry.objective.name,
        })
        .collect();
    std::fs::write(&options.output, serde_json::to_string_pretty(&names)?)?;

    println!(
        "{} Wrote {} objectives to {}",
        style("✓").green(),
        outcome.board.len(),
        options.output.display()
    );
    report(&outcome);
    audit(&outcome.board);

    Ok(())
}

fn run_interactive_setup(config: &mut GenerationConfig) -> Result<()> {
    let theme = ColorfulTheme::default();

    config.bucket_mode = Confirm::with_theme(&theme)
        .with_prompt("Use bucket classification mode?")
        .default(config.bucket_mode)
        .interact()?;

    if config.bucket_mode {
        config.bucket_hard_mode = Confirm::with_theme(&theme)
            .with_prompt("Use the hard-mode bucket quotas?")
            .default(config.bucket_hard_mode)
            .interact()?;
        config.race_mode = false;
        config.remove_easy = false;
        config.harder_board = false;
    } else {
        config.bucket_hard_mode = false;
        config.race_mode = Confirm::with_theme(&theme)
            .with_prompt("Enable race mode?")
            .default(config.race_mode)
            .interact()?;
        config.remove_easy = false;
        config.harder_board = false;
        if config.race_mode {
            config.remove_easy = Confirm::with_theme(&theme)
                .with_prompt("Remove easy objectives (classifications 1 and 2) from rerolls?")
                .default(false)
                .interact()?;
            if config.remove_easy {
                config.harder_board = Confirm::with_theme(&theme)
                    .with_prompt("Generate a harder board (fill from classifications 16-21)?")
                    .default(false)
                    .interact()?;
            }
        }
    }

    config.procedural_mode = Confirm::with_theme(&theme)
        .with_prompt("Enable randomized djinn/summon/class objectives?")
        .default(config.procedural_mode)
        .interact()?;

    config.exclude_boss_objectives = Confirm::with_theme(&theme)
        .with_prompt("Playing a mode that rewards beating bosses?")
        .default(config.exclude_boss_objectives)
        .interact()?;

    Ok(())
}

fn apply_cli_options(config: &mut GenerationConfig, options: &GenerateOptions) {
    // Flags only switch modes on, so a loaded config file keeps its settings
    // unless overridden.
    if options.race_mode {
        config.race_mode = true;
    }
    if options.remove_easy {
        config.remove_easy = true;
    }
    if options.harder_board {
        config.harder_board = true;
    }
    if options.bucket_mode {
        config.bucket_mode = true;
    }
    if options.bucket_hard_mode {
        config.bucket_hard_mode = true;
    }
    if options.procedural_mode {
        config.procedural_mode = true;
    }
    if options.exclude_boss {
        config.exclude_boss_objectives = true;
    }
}

fn report(outcome: &GenerationOutcome) {
    if !outcome.is_complete() {
        println!(
            "{} Board stopped at {} of {} objectives",
            style("⚠").yellow(),
            outcome.board.len(),
            BOARD_TARGET
        );
    }
    for warning in &outcome.warnings {
        println!("{} {}", style("⚠").yellow(), warning);
    }
    if !outcome.violations.is_empty() {
        println!("{} Unresolved tag violations:", style("⚠").yellow());
        for (tag, count) in &outcome.violations {
            println!("    {}: {} occurrences", style(tag).cyan(), count);
        }
    }
}

/// Post-run audit, mirroring the constraints the engine enforces. Anything
/// printed here indicates an engine bug or pathological catalog data.
fn audit(board: &[BoardEntry]) {
    for (i, a) in board.iter().enumerate() {
        for b in &board[i + 1..] {
            let excluded = (a.objective.id != 0
                && b.objective.restrictions.contains(&a.objective.id))
                || (b.objective.id != 0 && a.objective.restrictions.contains(&b.objective.id));
            if excluded {
                println!(
                    "{} Mutual exclusion violated between {:?} and {:?}",
                    style("✗").red(),
                    a.objective.name,
                    b.objective.name
                );
            }
        }
    }

    let mut counts: std::collections::BTreeMap<u32, usize> = std::collections::BTreeMap::new();
    for entry in board {
        *counts.entry(entry.classification).or_default() += 1;
    }
    for (classification, count) in counts {
        if count > 2 {
            println!(
                "{} Classification {} holds {} objectives (more than 2)",
                style("⚠").yellow(),
                classification,
                count
            );
        }
    }
}
