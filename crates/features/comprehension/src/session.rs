//! A timed sitting of one comprehension task.
//!
//! Answers may be changed until the countdown ends. The first call after the deadline submits
//! the session with whatever was answered and reports it as expired.

use crate::error::ComprehensionError;
use crate::grade::{ComprehensionResult, grade};
use crate::task::{AnswerText, ComprehensionTask};
use chrono::{DateTime, TimeDelta, Utc};
use gems_domain::config::ComprehensionConfig;
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ComprehensionSession {
    task: ComprehensionTask,
    passing_score: u8,
    started_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
    answers: BTreeMap<String, AnswerText>,
    result: Option<ComprehensionResult>,
    expired: bool,
}

impl ComprehensionSession {
    /// # Errors
    /// [`ComprehensionError::InvalidTask`] when the task has no questions.
    pub fn new(
        task: ComprehensionTask,
        config: &ComprehensionConfig,
        now: DateTime<Utc>,
    ) -> Result<Self, ComprehensionError> {
        if task.questions.is_empty() {
            return Err(ComprehensionError::InvalidTask {
                message: "task has no questions".into(),
                context: Some(task.id.into()),
            });
        }
        let minutes = task.time_limit_minutes.unwrap_or(config.default_time_limit_minutes);
        debug!(task_id = %task.id, minutes, "Comprehension session started");

        Ok(Self {
            passing_score: task.passing_score.unwrap_or(config.passing_score),
            deadline: now + TimeDelta::minutes(i64::from(minutes)),
            started_at: now,
            answers: BTreeMap::new(),
            result: None,
            expired: false,
            task,
        })
    }

    #[must_use]
    pub const fn task(&self) -> &ComprehensionTask {
        &self.task
    }

    #[must_use]
    pub const fn result(&self) -> Option<&ComprehensionResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.expired
    }

    /// Seconds left on the countdown, 0 once finished.
    #[must_use]
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> u64 {
        if self.result.is_some() {
            return 0;
        }
        (self.deadline - now).num_seconds().max(0) as u64
    }

    /// # Errors
    /// * [`ComprehensionError::SessionClosed`] after submission.
    /// * [`ComprehensionError::SessionExpired`] when the countdown has ended.
    /// * [`ComprehensionError::QuestionNotFound`] for an id not in the task.
    pub fn answer(
        &mut self,
        question_id: &str,
        answer: AnswerText,
        now: DateTime<Utc>,
    ) -> Result<(), ComprehensionError> {
        self.ensure_open(now)?;
        if self.task.question(question_id).is_none() {
            return Err(ComprehensionError::QuestionNotFound {
                message: question_id.to_owned().into(),
                context: Some(self.task.id.clone().into()),
            });
        }
        self.answers.insert(question_id.to_owned(), answer);
        Ok(())
    }

    /// # Errors
    /// * [`ComprehensionError::SessionClosed`] when already submitted.
    /// * [`ComprehensionError::SessionExpired`] when the countdown has ended; the session is
    ///   submitted anyway and the result is available through [`Self::result`].
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<&ComprehensionResult, ComprehensionError> {
        self.ensure_open(now)?;
        Ok(self.finish(now))
    }

    fn ensure_open(&mut self, now: DateTime<Utc>) -> Result<(), ComprehensionError> {
        if self.result.is_some() {
            return Err(self.closed_error());
        }
        if now >= self.deadline {
            self.expired = true;
            self.finish(now);
            return Err(ComprehensionError::SessionExpired {
                message: "time limit reached; answers were submitted".into(),
                context: Some(self.task.id.clone().into()),
            });
        }
        Ok(())
    }

    fn closed_error(&self) -> ComprehensionError {
        if self.expired {
            ComprehensionError::SessionExpired {
                message: "session already submitted at the time limit".into(),
                context: Some(self.task.id.clone().into()),
            }
        } else {
            ComprehensionError::SessionClosed {
                message: "session already submitted".into(),
                context: Some(self.task.id.clone().into()),
            }
        }
    }

    fn finish(&mut self, now: DateTime<Utc>) -> &ComprehensionResult {
        let spent = (now.min(self.deadline) - self.started_at).num_seconds().max(0) as u64;
        let result = grade(&self.task, &self.answers, spent, self.passing_score);
        info!(
            task_id = %self.task.id,
            score = result.score,
            passed = result.passed,
            expired = self.expired,
            "Comprehension session submitted"
        );
        self.result.insert(result)
    }
}
