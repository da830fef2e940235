//! Command execution against the progression engine.

use crate::cli::Commands;
use crate::config::Config;
use crate::render;
use anyhow::Result;
use chrono::Local;
use questline::{EventTag, FileStore, ProgressionEngine, Registry, SNAPSHOT_FILE};
use std::path::PathBuf;

fn open_engine(state_dir: &PathBuf) -> Result<ProgressionEngine> {
    let registry = Registry::builtin()?;
    let store = FileStore::new(state_dir.join(SNAPSHOT_FILE));
    Ok(ProgressionEngine::open(registry, Box::new(store)))
}

pub fn run(command: Commands, config: &Config) -> Result<()> {
    let mut engine = open_engine(&config.state_dir)?;

    // Count today before any mutation so dedication triggers see the
    // up-to-date streak and account age.
    engine.begin_session(Local::now().date_naive());

    match command {
        Commands::Stats => render::stats(&engine),
        Commands::Achievements { all } => render::achievements(&engine, all),
        Commands::Tree => render::tree(&engine),
        Commands::Timeline { limit } => {
            render::timeline(&engine, limit.unwrap_or(config.timeline_limit));
        }
        Commands::Record { stat, amount } => {
            engine.record(stat, amount);
            println!("{} += {}", stat.as_str(), amount);
            render::stats(&engine);
        }
        Commands::Event { tag } => {
            let tag = EventTag::parse(&tag);
            if tag == EventTag::Unrecognized {
                println!("Unknown event tag (nothing fired).");
            } else {
                engine.fire(tag);
                println!("Event fired: {}", tag.as_str());
            }
        }
        Commands::Complete { node } => {
            engine.set_node_completed(&node, true);
            render::tree(&engine);
        }
        Commands::Uncomplete { node } => {
            engine.set_node_completed(&node, false);
            render::tree(&engine);
        }
        Commands::Feature { ids } => {
            engine.set_featured(&ids);
            println!("Featured: {}", engine.featured().join(", "));
        }
    }

    Ok(())
}
