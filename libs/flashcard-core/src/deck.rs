//! Deck state and the daily study queue.
//!
//! A [`Deck`] owns every card plus the FIFO queue of card IDs still due in
//! the current session. Cards answered poorly go to the back of the queue so
//! they come round again before the session ends. The queue survives
//! restarts within a study day and is rebuilt from due dates on a new day.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::algorithm::{ReviewOutcome, Sm2};
use crate::calendar::StudyCalendar;
use crate::error::{DeckError, Result};
use crate::types::{DeckStats, Flashcard, MINIMUM_EASINESS};

/// Persisted form of a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckData {
    #[serde(with = "crate::timestamp")]
    pub last_seen: DateTime<Utc>,
    /// Queue of card IDs, front first.
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default)]
    pub flashcards: IndexMap<String, Flashcard>,
}

impl DeckData {
    /// Check the structural invariants a loaded deck must satisfy.
    pub fn validate(&self) -> Result<()> {
        for (key, card) in &self.flashcards {
            if *key != card.id {
                return Err(DeckError::MismatchedId {
                    key: key.clone(),
                    id: card.id.clone(),
                });
            }
            if !card.easiness.is_finite() || card.easiness < MINIMUM_EASINESS {
                return Err(DeckError::InvalidEasiness {
                    id: card.id.clone(),
                    easiness: card.easiness,
                });
            }
        }

        if let Some(missing) = self
            .stack
            .iter()
            .find(|id| !self.flashcards.contains_key(*id))
        {
            return Err(DeckError::DanglingQueueEntry(missing.clone()));
        }

        Ok(())
    }
}

/// Collect the IDs of every card due at `now`, in deck order.
pub fn build_initial_queue(
    cards: &IndexMap<String, Flashcard>,
    now: DateTime<Utc>,
    calendar: &StudyCalendar,
) -> VecDeque<String> {
    cards
        .values()
        .filter(|card| calendar.is_due(card.next_review, now))
        .map(|card| card.id.clone())
        .collect()
}

/// A deck of cards and its current study queue.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: IndexMap<String, Flashcard>,
    queue: VecDeque<String>,
    last_seen: DateTime<Utc>,
    scheduler: Sm2,
}

impl Deck {
    /// An empty deck, first seen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            cards: IndexMap::new(),
            queue: VecDeque::new(),
            last_seen: now,
            scheduler: Sm2::default(),
        }
    }

    /// Rehydrate a persisted deck.
    ///
    /// The saved queue is kept if the deck was last seen on the same study
    /// day as `now`; otherwise it is rebuilt from the cards' due dates.
    pub fn load(data: DeckData, now: DateTime<Utc>, calendar: &StudyCalendar) -> Result<Self> {
        data.validate()?;

        let queue = if calendar.same_day(data.last_seen, now) {
            VecDeque::from(data.stack)
        } else {
            let queue = build_initial_queue(&data.flashcards, now, calendar);
            tracing::debug!(
                last_seen = %data.last_seen,
                due = queue.len(),
                "new study day, rebuilt queue"
            );
            queue
        };

        Ok(Self {
            cards: data.flashcards,
            queue,
            last_seen: data.last_seen,
            scheduler: Sm2::default(),
        })
    }

    /// Persisted form of the deck, stamped as seen at `now`.
    pub fn to_data(&self, now: DateTime<Utc>) -> DeckData {
        DeckData {
            last_seen: now,
            stack: self.queue.iter().cloned().collect(),
            flashcards: self.cards.clone(),
        }
    }

    /// Take the card at the front of the queue, if any.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<Flashcard> {
        while let Some(id) = self.queue.pop_front() {
            match self.cards.get(&id) {
                Some(card) => return Some(card.clone()),
                None => tracing::warn!(id = %id, "skipping queued ID with no card"),
            }
        }
        None
    }

    /// The card at the front of the queue, without taking it.
    pub fn peek(&self) -> Option<&Flashcard> {
        self.queue.iter().find_map(|id| self.cards.get(id))
    }

    /// Record a review of card `id`.
    ///
    /// Cards that need another look today are appended to the queue.
    pub fn assess(&mut self, id: &str, quality: i32, now: DateTime<Utc>) -> Result<ReviewOutcome> {
        let card = self
            .cards
            .get_mut(id)
            .ok_or_else(|| DeckError::UnknownCard(id.to_string()))?;

        let outcome = self.scheduler.review(card, quality, now);
        *card = outcome.card.clone();

        if outcome.retry_today {
            tracing::debug!(id, quality, "card requeued for today");
            self.queue.push_back(id.to_string());
        }

        Ok(outcome)
    }

    /// Add a new card. It joins the back of today's queue.
    pub fn add(&mut self, card: Flashcard) -> Result<()> {
        if self.cards.contains_key(&card.id) {
            return Err(DeckError::DuplicateId(card.id));
        }

        self.queue.push_back(card.id.clone());
        self.cards.insert(card.id.clone(), card);
        Ok(())
    }

    /// Remove every card and empty the queue.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.queue.clear();
    }

    pub fn get(&self, id: &str) -> Option<&Flashcard> {
        self.cards.get(id)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Flashcard> {
        self.cards.values()
    }

    /// IDs still due this session, front first.
    pub fn queue(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// When the deck was loaded, as recorded in its persisted data.
    pub fn last_seen(&self) -> DateTime<Utc> {
        self.last_seen
    }

    pub fn stats(&self) -> DeckStats {
        DeckStats {
            total_cards: self.cards.len(),
            queued: self.queue.len(),
            last_seen: self.last_seen,
        }
    }
}
