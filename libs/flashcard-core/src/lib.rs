//! Core flashcard library.
//!
//! Provides:
//! - SM-2 review scheduling
//! - Deck state with a daily study queue
//! - Study-day calendar for due-date comparisons
//! - Persisted deck shape and shared types (Flashcard, DeckData, etc.)

pub mod algorithm;
pub mod calendar;
pub mod deck;
pub mod error;
pub mod timestamp;
pub mod types;

pub use algorithm::{ReviewOutcome, Sm2};
pub use calendar::StudyCalendar;
pub use deck::{build_initial_queue, Deck, DeckData};
pub use error::{DeckError, Result};
pub use types::{DeckStats, Flashcard, INITIAL_EASINESS, MINIMUM_EASINESS};
