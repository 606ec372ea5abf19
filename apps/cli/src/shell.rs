//! Interactive command loop.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use flashcard_core::{Deck, Flashcard, StudyCalendar};

use crate::command::{parse_recall, Command, CommandError, HELP, QUALITY_MAP, QUIT_WORD};
use crate::storage::{load_deck_file, save_deck_file, StorageError};

/// Line-oriented shell over a deck.
///
/// Reads commands from `input` and writes prompts and results to `output`.
/// A deck opened from a file is saved back to it when the shell exits.
pub struct Shell<R, W> {
    input: R,
    output: W,
    deck: Deck,
    source: Option<PathBuf>,
    calendar: StudyCalendar,
    clock: fn() -> DateTime<Utc>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, calendar: StudyCalendar) -> Self {
        Self {
            input,
            output,
            deck: Deck::new(Utc::now()),
            source: None,
            calendar,
            clock: Utc::now,
        }
    }

    /// Use a different time source, starting from an empty deck.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.deck = Deck::new(clock());
        self.clock = clock;
        self
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Open a deck file, replacing the current deck.
    pub fn open(&mut self, path: &Path) -> Result<(), StorageError> {
        let data = load_deck_file(path)?;
        self.deck = Deck::load(data, self.now(), &self.calendar)?;
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    /// Like [`Shell::open`], but a missing file starts an empty deck that
    /// will be saved to `path`.
    pub fn open_or_create(&mut self, path: &Path) -> Result<(), StorageError> {
        match self.open(path) {
            Err(StorageError::Io { ref source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "deck file not found, starting a new deck");
                self.deck = Deck::new(self.now());
                self.source = Some(path.to_path_buf());
                Ok(())
            }
            result => result,
        }
    }

    /// Save the deck to `path`, or to the file it was opened from.
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf, StorageError> {
        let target = path
            .or(self.source.as_deref())
            .ok_or(StorageError::NoSource)?;
        save_deck_file(target, &self.deck.to_data(self.now()))?;
        Ok(target.to_path_buf())
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        while let Some(line) = self.prompt("> ")? {
            match Command::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.execute(command)?,
                Err(e @ CommandError::Unknown(_)) => writeln!(self.output, "{e}")?,
                Err(e) => writeln!(self.output, "Invalid arguments provided. {e}")?,
            }
        }
        self.finish()
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Help => writeln!(self.output, "{HELP}"),
            Command::Quit => Ok(()),
            Command::Stats => self.print_stats(),
            Command::Load(path) => match self.open(&path) {
                Ok(()) => writeln!(self.output, "Deck loaded."),
                Err(e) => writeln!(self.output, "Could not load deck. {e}"),
            },
            Command::Save(path) => match self.save(path.as_deref()) {
                Ok(_) => writeln!(self.output, "Deck saved."),
                Err(e) => writeln!(self.output, "Could not save deck. {e}"),
            },
            Command::Create => self.create(),
            Command::Clear => self.clear(),
            Command::Start => self.study(),
        }
    }

    fn print_stats(&mut self) -> io::Result<()> {
        let stats = self.deck.stats();
        let source = self
            .source
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "None".to_string());
        let last_opened = stats
            .last_seen
            .with_timezone(&self.calendar.offset())
            .date_naive();

        writeln!(self.output, "Source: {source}")?;
        writeln!(self.output, "Total flashcards: {}", stats.total_cards)?;
        writeln!(self.output, "Last opened: {last_opened}")?;
        writeln!(self.output, "Current stack: {}", stats.queued)
    }

    fn create(&mut self) -> io::Result<()> {
        let Some(question) = self.prompt("Question: ")? else {
            return Ok(());
        };
        let Some(content) = self.prompt("Content: ")? else {
            return Ok(());
        };

        let card = Flashcard::new(question, content, self.now());
        match self.deck.add(card) {
            Ok(()) => writeln!(self.output, "Flashcard created."),
            Err(e) => writeln!(self.output, "Could not create flashcard. {e}"),
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        let Some(response) = self.prompt("Confirm (y/n): ")? else {
            return Ok(());
        };
        if response.trim().eq_ignore_ascii_case("y") {
            self.deck.clear();
            writeln!(self.output, "Deck cleared.")?;
        }
        Ok(())
    }

    fn study(&mut self) -> io::Result<()> {
        if self.deck.is_empty() {
            return writeln!(self.output, "No flashcards have been added.");
        }
        if self.deck.queue_len() == 0 {
            return writeln!(self.output, "Stack is empty. Come back later.");
        }

        writeln!(self.output, "Session started.")?;
        loop {
            // The card stays queued until it has been graded
            let Some(card) = self.deck.peek().cloned() else {
                return writeln!(self.output, "Stack is empty. Come back later.");
            };

            match self.prompt(&format!("{}\n", card.question))? {
                Some(response) if response.trim() != QUIT_WORD => {}
                _ => return Ok(()),
            }
            writeln!(self.output, "{}", card.content)?;

            let Some(quality) = self.read_quality()? else {
                return Ok(());
            };

            self.deck.next();
            if let Err(e) = self.deck.assess(&card.id, quality, self.now()) {
                tracing::error!(id = %card.id, error = %e, "failed to assess card");
            }
        }
    }

    fn read_quality(&mut self) -> io::Result<Option<i32>> {
        let prompt = format!("Recall quality (1 - {}): ", QUALITY_MAP.len());
        loop {
            let Some(answer) = self.prompt(&prompt)? else {
                return Ok(None);
            };
            if answer.trim() == QUIT_WORD {
                return Ok(None);
            }
            match parse_recall(&answer) {
                Ok(quality) => return Ok(Some(quality)),
                Err(e) => writeln!(self.output, "Invalid arguments provided. {e}")?,
            }
        }
    }

    fn finish(&mut self) -> io::Result<()> {
        if self.source.is_some() {
            if let Err(e) = self.save(None) {
                tracing::error!(error = %e, "failed to save deck on exit");
                writeln!(self.output, "Could not save deck. {e}")?;
            }
        }
        writeln!(self.output, "Thank you. Good bye!")
    }

    /// Write `text` and read one line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
