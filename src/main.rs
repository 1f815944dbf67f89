#![forbid(unsafe_code)]
//! boardgen command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use boardgen::commands::{
    execute_convert, execute_generate, ConvertOptions, GenerateOptions, RerollPolicy,
};

#[derive(Parser)]
#[command(name = "boardgen")]
#[command(about = "Constraint-driven bingo board generator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a board from a catalog CSV
    Generate {
        /// Catalog CSV path
        catalog: PathBuf,

        /// Board output path (JSON array of objective names)
        #[arg(short, long, default_value = "selected_objectives.json")]
        output: PathBuf,

        /// Generation config file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RNG seed for a reproducible board
        #[arg(long)]
        seed: Option<u64>,

        /// Skip interactive prompts (use config + flags)
        #[arg(short = 'y', long)]
        yes: bool,

        /// Race mode: at most 2 objectives per classification
        #[arg(long)]
        race: bool,

        /// Exclude classifications 1-2 from rerolls
        #[arg(long)]
        remove_easy: bool,

        /// Fill out the board from the harder classification range (16-21)
        #[arg(long)]
        harder_board: bool,

        /// Fill by weighted bucket quotas
        #[arg(long)]
        buckets: bool,

        /// Use the hard-mode bucket quotas
        #[arg(long)]
        bucket_hard: bool,

        /// Generate procedural djinn/summon/class objectives
        #[arg(long)]
        procedural: bool,

        /// Skip objectives tagged "Boss"
        #[arg(long)]
        exclude_boss: bool,

        /// Reroll confirmation policy
        #[arg(long, value_enum, default_value_t = RerollPolicy::Prompt)]
        reroll: RerollPolicy,
    },

    /// Convert a catalog CSV to the legacy JavaScript bingo list
    Convert {
        /// Catalog CSV path
        input: PathBuf,

        /// JavaScript output path
        #[arg(short, long, default_value = "bingo_list.js")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Generate {
            catalog,
            output,
            config,
            seed,
            yes,
            race,
            remove_easy,
            harder_board,
            buckets,
            bucket_hard,
            procedural,
            exclude_boss,
            reroll,
        } => execute_generate(GenerateOptions {
            catalog,
            output,
            config,
            seed,
            yes,
            race_mode: race,
            remove_easy,
            harder_board,
            bucket_mode: buckets,
            bucket_hard_mode: bucket_hard,
            procedural_mode: procedural,
            exclude_boss,
            reroll,
        }),
        Commands::Convert { input, output } => execute_convert(ConvertOptions { input, output }),
    }
}
