//! Core types for the flashcard scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Easiness factor given to a brand-new card.
pub const INITIAL_EASINESS: f64 = 2.5;

/// Lowest easiness factor a card can reach.
pub const MINIMUM_EASINESS: f64 = 1.3;

/// A single flashcard with its scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    /// Text shown on the front of the card.
    pub question: String,
    /// The answer to the question.
    pub content: String,
    /// Multiplier controlling how fast intervals grow.
    pub easiness: f64,
    /// Days until the next scheduled review.
    pub interval: u32,
    /// Consecutive successful reviews.
    pub repetitions: u32,
    /// The earliest instant the card may be presented again.
    #[serde(with = "crate::timestamp")]
    pub next_review: DateTime<Utc>,
}

impl Flashcard {
    /// Create a new card with a random ID, due immediately at `now`.
    pub fn new(question: impl Into<String>, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), question, content, now)
    }

    /// Create a new card with a caller-chosen ID.
    pub fn with_id(
        id: impl Into<String>,
        question: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            content: content.into(),
            easiness: INITIAL_EASINESS,
            interval: 0,
            repetitions: 0,
            next_review: now,
        }
    }

    /// Whether the card has ever been reviewed.
    pub fn is_new(&self) -> bool {
        self.repetitions == 0
    }
}

/// Summary of a deck's contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub total_cards: usize,
    pub queued: usize,
    #[serde(with = "crate::timestamp")]
    pub last_seen: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn new_card_has_default_schedule() {
        let card = Flashcard::new("What is Rust?", "A language.", now());
        assert_eq!(card.easiness, 2.5);
        assert_eq!(card.interval, 0);
        assert_eq!(card.repetitions, 0);
        assert_eq!(card.next_review, now());
        assert!(card.is_new());
    }

    #[test]
    fn new_cards_get_distinct_ids() {
        let a = Flashcard::new("Q", "A", now());
        let b = Flashcard::new("Q", "A", now());
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let card = Flashcard::with_id("c1", "Q", "A", now());
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "c1",
                "question": "Q",
                "content": "A",
                "easiness": 2.5,
                "interval": 0,
                "repetitions": 0,
                "nextReview": "2024-03-01T09:30:00Z",
            })
        );
    }
}
