pub mod command;
pub mod config;
pub mod shell;
pub mod storage;

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::shell::Shell;

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();

    // Logs go to stderr so they never interleave with prompts
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut shell = Shell::new(io::stdin().lock(), io::stdout(), config.calendar());

    if let Some(path) = config.startup_deck() {
        tracing::info!(path = %path.display(), "opening deck");
        shell
            .open_or_create(&path)
            .with_context(|| format!("failed to open deck {}", path.display()))?;
    }

    shell.run().context("terminal I/O failed")?;
    Ok(())
}
