use crate::answer::Answer;
use crate::attempt::{Attempt, AttemptStatus, AttemptView, Navigation};
use crate::error::AssessmentError;
use crate::events::AttemptSubmitted;
use crate::paper::AssessmentPaper;
use crate::result::AssessmentResult;
use chrono::{DateTime, Utc};
use gems_domain::config::AssessmentConfig;
use gems_event_bus::EventBus;
use gems_kernel::safe_nanoid;
use moka::sync::Cache;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Live attempts, evicted after a period without access.
#[derive(Debug, Clone)]
pub struct AttemptStore {
    attempts: Cache<String, Arc<Mutex<Attempt>>>,
    events: EventBus,
    default_time_limit_minutes: u32,
}

impl AttemptStore {
    #[must_use]
    pub fn new(config: &AssessmentConfig, events: EventBus) -> Self {
        let attempts = Cache::builder()
            .max_capacity(config.max_attempts)
            .time_to_idle(Duration::from_secs(config.attempt_idle_minutes.saturating_mul(60)))
            .build();
        Self { attempts, events, default_time_limit_minutes: config.default_time_limit_minutes }
    }

    /// # Errors
    /// Returns [`AssessmentError::InvalidPaper`] when the paper cannot be sat.
    pub fn start(&self, paper: &AssessmentPaper, now: DateTime<Utc>) -> Result<AttemptView, AssessmentError> {
        let attempt = Attempt::start(safe_nanoid!(), paper, self.default_time_limit_minutes, now)?;
        let view = attempt.view(now);
        self.attempts.insert(view.id.clone(), Arc::new(Mutex::new(attempt)));
        Ok(view)
    }

    /// Snapshot of an attempt; expires it first when its time is up.
    ///
    /// # Errors
    /// Returns [`AssessmentError::AttemptNotFound`] for unknown or evicted ids.
    pub fn view(&self, id: &str, now: DateTime<Utc>) -> Result<AttemptView, AssessmentError> {
        self.with_attempt(id, |attempt| {
            attempt.refresh(now);
            Ok(attempt.view(now))
        })
    }

    /// # Errors
    /// See [`Attempt::answer`].
    pub fn answer(
        &self,
        id: &str,
        index: usize,
        answer: Answer,
        now: DateTime<Utc>,
    ) -> Result<AttemptView, AssessmentError> {
        self.with_attempt(id, |attempt| {
            attempt.answer(index, answer, now)?;
            Ok(attempt.view(now))
        })
    }

    /// # Errors
    /// See [`Attempt::navigate`].
    pub fn navigate(
        &self,
        id: &str,
        navigation: Navigation,
        now: DateTime<Utc>,
    ) -> Result<AttemptView, AssessmentError> {
        self.with_attempt(id, |attempt| {
            attempt.navigate(navigation, now)?;
            Ok(attempt.view(now))
        })
    }

    /// # Errors
    /// See [`Attempt::submit`].
    pub fn submit(&self, id: &str, now: DateTime<Utc>) -> Result<AssessmentResult, AssessmentError> {
        self.with_attempt(id, |attempt| attempt.submit(now).cloned())
    }

    /// # Errors
    /// See [`Attempt::apply_manual_mark`].
    pub fn mark(
        &self,
        id: &str,
        question_number: u32,
        points: u32,
    ) -> Result<AssessmentResult, AssessmentError> {
        self.with_attempt(id, |attempt| {
            attempt.apply_manual_mark(question_number, points)?;
            attempt.result().cloned().ok_or_else(|| AssessmentError::from("marked attempt has no result"))
        })
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.attempts.run_pending_tasks();
        self.attempts.entry_count()
    }

    /// Runs `op` under the attempt's lock and publishes [`AttemptSubmitted`] when `op` closed it.
    fn with_attempt<R>(
        &self,
        id: &str,
        op: impl FnOnce(&mut Attempt) -> Result<R, AssessmentError>,
    ) -> Result<R, AssessmentError> {
        let entry = self.attempts.get(id).ok_or_else(|| AssessmentError::AttemptNotFound {
            message: id.to_owned().into(),
            context: None,
        })?;

        let mut attempt = entry.lock();
        let was_open = attempt.status() == AttemptStatus::InProgress;
        let outcome = op(&mut attempt);
        if was_open && attempt.status() != AttemptStatus::InProgress {
            self.publish_submitted(&attempt)?;
        }
        outcome
    }

    fn publish_submitted(&self, attempt: &Attempt) -> Result<(), AssessmentError> {
        let Some(result) = attempt.result() else {
            return Ok(());
        };
        let event = AttemptSubmitted {
            attempt_id: attempt.id().to_owned(),
            paper_id: attempt.paper_id().to_owned(),
            status: attempt.status(),
            total_score: result.total_score,
            total_possible: result.total_possible,
            percentage: result.percentage,
        };
        let delivered = self.events.publish(event)?;
        debug!(attempt = attempt.id(), delivered, "AttemptSubmitted published");
        Ok(())
    }
}
