//! Questline Control - CLI client for the progression engine.

mod cli;
mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();

    let mut config = config::Config::load();
    if let Some(dir) = &args.state_dir {
        config.state_dir = dir.into();
    }

    commands::run(args.command, &config)
}
