//! Spaced repetition over a fixed ladder of review intervals.
//!
//! Each correct review climbs one rung, each mistake drops one, and the next review is scheduled
//! the rung's interval after the review.

use crate::error::VocabularyError;
use chrono::{DateTime, TimeDelta, Utc};
use gems_derive::api_model;

/// Days until the next review, indexed by level.
pub const SPACED_REPETITION_INTERVALS: [i64; 6] = [1, 3, 7, 14, 30, 90];
pub const MAX_LEVEL: u8 = 5;
/// Items at or above this level count as mastered.
pub const MASTERED_LEVEL: u8 = 4;

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ReviewState {
    pub item_id: String,
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub incorrect: u32,
    /// Never-reviewed items have no date and are always due.
    #[serde(default)]
    pub next_review: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl ReviewState {
    #[must_use]
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            level: 0,
            correct: 0,
            incorrect: 0,
            next_review: None,
            last_reviewed: None,
        }
    }

    /// Rejects states that could not have come out of [`ReviewState::record`].
    ///
    /// # Errors
    /// [`VocabularyError::InvalidReview`] for an empty item id or a level above [`MAX_LEVEL`].
    pub fn validate(&self) -> Result<(), VocabularyError> {
        if self.item_id.trim().is_empty() {
            return Err(VocabularyError::InvalidReview { message: "item id is required".into(), context: None });
        }
        if self.level > MAX_LEVEL {
            return Err(VocabularyError::InvalidReview {
                message: format!("level {} is above {MAX_LEVEL}", self.level).into(),
                context: Some(self.item_id.clone().into()),
            });
        }
        Ok(())
    }

    /// Applies one review outcome and schedules the next review.
    pub fn record(&mut self, correct: bool, now: DateTime<Utc>) {
        if correct {
            self.level = (self.level + 1).min(MAX_LEVEL);
            self.correct = self.correct.saturating_add(1);
        } else {
            self.level = self.level.saturating_sub(1);
            self.incorrect = self.incorrect.saturating_add(1);
        }
        self.last_reviewed = Some(now);
        self.next_review = Some(now + interval(self.level));
        tracing::debug!(item = %self.item_id, level = self.level, correct, "Review recorded");
    }

    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review.is_none_or(|next| next <= now)
    }

    #[must_use]
    pub const fn is_mastered(&self) -> bool {
        self.level >= MASTERED_LEVEL
    }

    /// Share of correct reviews as a rounded percentage; 0 before the first review.
    #[must_use]
    pub fn accuracy(&self) -> u32 {
        let total = u64::from(self.correct) + u64::from(self.incorrect);
        if total == 0 {
            return 0;
        }
        (f64::from(self.correct) / total as f64 * 100.0).round() as u32
    }
}

fn interval(level: u8) -> TimeDelta {
    let index = usize::from(level.min(MAX_LEVEL));
    TimeDelta::days(SPACED_REPETITION_INTERVALS[index])
}

/// Due states, most overdue first. Never-reviewed items come before everything else.
#[must_use]
pub fn due_items(states: &[ReviewState], now: DateTime<Utc>) -> Vec<ReviewState> {
    let mut due: Vec<ReviewState> = states.iter().filter(|state| state.is_due(now)).cloned().collect();
    due.sort_by_key(|state| state.next_review);
    due
}

#[api_model]
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct ReviewSummary {
    pub total: usize,
    pub due: usize,
    pub mastered: usize,
    pub accuracy: u32,
}

/// Collection-wide counts; accuracy is taken over every review of every item.
#[must_use]
pub fn summarize(states: &[ReviewState], now: DateTime<Utc>) -> ReviewSummary {
    let (correct, reviews) = states
        .iter()
        .fold((0_u64, 0_u64), |(c, t), s| {
            (c + u64::from(s.correct), t + u64::from(s.correct) + u64::from(s.incorrect))
        });
    ReviewSummary {
        total: states.len(),
        due: states.iter().filter(|s| s.is_due(now)).count(),
        mastered: states.iter().filter(|s| s.is_mastered()).count(),
        accuracy: if reviews == 0 { 0 } else { (correct as f64 / reviews as f64 * 100.0).round() as u32 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_clamped_at_both_ends() {
        let now = Utc::now();
        let mut state = ReviewState::new("perro");
        state.record(false, now);
        assert_eq!(state.level, 0);
        assert_eq!(state.next_review, Some(now + TimeDelta::days(1)));

        for _ in 0..8 {
            state.record(true, now);
        }
        assert_eq!(state.level, MAX_LEVEL);
        assert_eq!(state.next_review, Some(now + TimeDelta::days(90)));
        assert_eq!((state.correct, state.incorrect), (8, 1));
        assert_eq!(state.accuracy(), 89);
    }

    #[test]
    fn validation() {
        assert!(ReviewState::new("gato").validate().is_ok());
        assert!(ReviewState::new(" ").validate().is_err());
        let state = ReviewState { level: 6, ..ReviewState::new("gato") };
        assert!(matches!(state.validate(), Err(VocabularyError::InvalidReview { .. })));
    }
}
