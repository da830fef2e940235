//! CLI - command-line argument parsing.
//!
//! Defines the clap structure; execution lives in `commands`.

use clap::{Parser, Subcommand};
use questline::StatKey;

/// Questline progression CLI
#[derive(Parser)]
#[command(name = "questlinectl")]
#[command(about = "Questline - achievements, skill tree, XP and ranks", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Override the state directory (default: platform data dir)
    #[arg(long, global = true)]
    pub state_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show XP, rank and stat counters
    Stats,

    /// List achievements grouped by category
    Achievements {
        /// Include locked achievements
        #[arg(long)]
        all: bool,
    },

    /// Show the skill tree with per-node status
    Tree,

    /// Show recent unlock events
    Timeline {
        /// Number of entries to show (default from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Increment a stat counter
    Record {
        /// Stat name (snake_case, e.g. lessons_completed)
        stat: StatKey,
        /// Amount to add
        #[arg(default_value_t = 1)]
        amount: u64,
    },

    /// Fire a custom-trigger event by tag
    Event {
        /// Event tag (e.g. tour_completed)
        tag: String,
    },

    /// Mark a skill node completed
    Complete {
        /// Skill node id
        node: String,
    },

    /// Mark a skill node not completed
    Uncomplete {
        /// Skill node id
        node: String,
    },

    /// Pin up to three featured achievements
    Feature {
        /// Achievement ids, order-significant
        ids: Vec<String>,
    },
}
