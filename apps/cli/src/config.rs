//! Command-line and environment configuration.

use std::path::PathBuf;

use chrono::{Local, Offset};
use clap::Parser;
use flashcard_core::StudyCalendar;

/// Spaced repetition flashcards in the terminal.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Deck file to open at startup.
    ///
    /// Defaults to `<data dir>/flashcards/deck.json` when that file exists.
    #[arg(long, env = "FLASHCARDS_DECK")]
    pub deck: Option<PathBuf>,

    /// Hour of day (0-23) when a new study day begins.
    #[arg(
        long,
        env = "FLASHCARDS_RESET_HOUR",
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..24)
    )]
    pub reset_hour: u32,

    /// Log filter, e.g. `info` or `flashcard_core=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log: String,
}

impl Config {
    /// Study calendar in the machine's current UTC offset.
    pub fn calendar(&self) -> StudyCalendar {
        StudyCalendar::new(Local::now().offset().fix(), self.reset_hour)
    }

    /// Deck to open at startup, if any.
    pub fn startup_deck(&self) -> Option<PathBuf> {
        match &self.deck {
            Some(path) => Some(path.clone()),
            None => default_deck_path().filter(|path| path.is_file()),
        }
    }
}

pub fn default_deck_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("flashcards").join("deck.json"))
}
