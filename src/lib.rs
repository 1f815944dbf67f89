#![forbid(unsafe_code)]

//! # boardgen
//!
//! Constraint-driven bingo board generator. Assembles a randomized board of
//! 25 objectives from a classified catalog, subject to mutual exclusion,
//! per-classification quotas, weighted bucket quotas, and per-tag occurrence
//! budgets, with an approve/decline reroll loop and optional procedurally
//! generated objectives.
//!
//! ## Example
//!
//! ```rust,no_run
//! use boardgen::{generate_board, load_catalog, AlwaysReroll, GenerationConfig};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! fn main() -> boardgen::Result<()> {
//!     let catalog = load_catalog("objectives.csv")?;
//!     let config = GenerationConfig::default();
//!     let mut rng = StdRng::seed_from_u64(42);
//!
//!     let outcome = generate_board(catalog, &config, &mut rng, &mut AlwaysReroll);
//!     for entry in &outcome.board {
//!         println!("{}", entry.objective.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod procgen;

// Re-exports
pub use catalog::{load_catalog, BoardEntry, Catalog, Objective};
pub use config::{GenerationConfig, TagLimit};
pub use engine::buckets::Bucket;
pub use engine::decision::{
    AlwaysReroll, BoundedReroll, DecisionProvider, NeverReroll, PromptDecision,
};
pub use engine::{generate_board, GenerationOutcome, SelectionEngine, BOARD_TARGET};
pub use error::{BoardgenError, Result};
pub use procgen::ProcContext;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
