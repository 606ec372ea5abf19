//! Spaced repetition scheduling.

pub mod sm2;

pub use sm2::Sm2;

use crate::types::Flashcard;

/// Result of reviewing a card.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    /// The card with its updated scheduling state.
    pub card: Flashcard,
    /// Whether the card should be shown again later in the same session.
    pub retry_today: bool,
}
