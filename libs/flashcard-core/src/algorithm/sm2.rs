//! SM-2 spaced repetition algorithm.
//!
//! Quality is scored on the usual 0-5 scale, but any integer is accepted:
//! scores below `passing_quality` are failures, scores below `retry_below`
//! put the card back into today's session.
//!
//! Intervals from the third repetition on are `round(interval * easiness)`,
//! rounding half away from zero (`f64::round`), and never longer than
//! `maximum_interval` days.

use super::ReviewOutcome;
use crate::types::{Flashcard, MINIMUM_EASINESS};
use chrono::{DateTime, Duration, Utc};

/// SM-2 algorithm parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub minimum_ease: f64,
    pub first_interval: u32,
    pub second_interval: u32,
    pub maximum_interval: u32,
    pub passing_quality: i32,
    pub retry_below: i32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            minimum_ease: MINIMUM_EASINESS,
            first_interval: 1,
            second_interval: 6,
            maximum_interval: 36500,
            passing_quality: 3,
            retry_below: 4,
        }
    }
}

impl Sm2 {
    /// Review `card` with the given recall quality at `now`.
    ///
    /// Only the scheduling fields of the returned card differ from the input.
    pub fn review(&self, card: &Flashcard, quality: i32, now: DateTime<Utc>) -> ReviewOutcome {
        let mut repetitions = card.repetitions.saturating_add(1);

        let mut interval = match repetitions {
            1 => self.first_interval,
            2 => self.second_interval,
            _ => self.grow_interval(card.interval, card.easiness),
        };

        let mut easiness = card.easiness;
        if quality < self.passing_quality {
            // Lapse: start over, keep the old easiness
            interval = self.first_interval;
            repetitions = 1;
        } else {
            easiness = self.next_easiness(card.easiness, quality);
        }

        let next_review = now
            .checked_add_signed(Duration::days(i64::from(interval)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        ReviewOutcome {
            card: Flashcard {
                easiness,
                interval,
                repetitions,
                next_review,
                ..card.clone()
            },
            retry_today: quality < self.retry_below,
        }
    }

    /// Easiness after a review of the given quality, floored at `minimum_ease`.
    pub fn next_easiness(&self, easiness: f64, quality: i32) -> f64 {
        let miss = 5.0 - f64::from(quality);
        let updated = easiness + (0.1 - miss * (0.08 + miss * 0.02));
        updated.max(self.minimum_ease)
    }

    fn grow_interval(&self, interval: u32, easiness: f64) -> u32 {
        // Float-to-int casts saturate, so huge products clamp cleanly
        let grown = (f64::from(interval) * easiness).round() as u32;
        grown.clamp(self.first_interval, self.maximum_interval)
    }
}
