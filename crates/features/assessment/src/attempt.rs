//! A timed sitting of one paper.
//!
//! Every operation takes the current instant explicitly. Time spent on a question is added to
//! its running total whenever the student leaves it, so revisits accumulate. Once the time limit
//! has passed, the next operation submits the attempt as [`AttemptStatus::Expired`].

use crate::answer::Answer;
use crate::error::AssessmentError;
use crate::paper::AssessmentPaper;
use crate::question::Question;
use crate::result::AssessmentResult;
use chrono::{DateTime, TimeDelta, Utc};
use gems_derive::api_model;
use strum_macros::Display;
use tracing::{debug, info};

#[api_model]
#[derive(Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "camelCase")]
pub enum AttemptStatus {
    InProgress,
    Submitted,
    /// Submitted automatically at the time limit.
    Expired,
}

/// Cursor movement within an attempt.
#[api_model]
#[derive(Clone, Copy, PartialEq, Eq)]
#[serde(tag = "action")]
pub enum Navigation {
    GoTo { index: usize },
    Next,
    Previous,
}

/// Client-facing snapshot of an attempt.
#[api_model]
#[derive(Clone, PartialEq)]
pub struct AttemptView {
    pub id: String,
    pub paper_id: String,
    pub title: String,
    pub status: AttemptStatus,
    /// 0-based index of the question on screen.
    pub current_question: usize,
    pub total_questions: usize,
    pub answered: usize,
    pub started_at: DateTime<Utc>,
    pub time_limit_seconds: u64,
    pub elapsed_seconds: u64,
    pub remaining_seconds: u64,
    pub result: Option<AssessmentResult>,
}

#[derive(Debug, Clone)]
pub struct Attempt {
    id: String,
    paper_id: String,
    title: String,
    questions: Vec<Question>,
    answers: Vec<Option<Answer>>,
    time_spent: Vec<TimeDelta>,
    current: usize,
    entered_at: DateTime<Utc>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    time_limit: TimeDelta,
    status: AttemptStatus,
    result: Option<AssessmentResult>,
}

impl Attempt {
    /// Starts the clock on the paper's student questions.
    ///
    /// # Errors
    /// Returns [`AssessmentError::InvalidPaper`] when there is nothing to answer or no time to do it.
    pub fn start(
        id: impl Into<String>,
        paper: &AssessmentPaper,
        default_time_limit_minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<Self, AssessmentError> {
        let questions = paper.student_questions();
        if questions.is_empty() {
            return Err(AssessmentError::InvalidPaper {
                message: "paper has no student questions".into(),
                context: Some(paper.id.clone().into()),
            });
        }

        let minutes = paper.time_limit_minutes.unwrap_or(default_time_limit_minutes);
        if minutes == 0 {
            return Err(AssessmentError::InvalidPaper {
                message: "time limit must be positive".into(),
                context: Some(paper.id.clone().into()),
            });
        }

        let id = id.into();
        debug!(attempt = %id, paper = %paper.id, questions = questions.len(), minutes, "Attempt started");

        Ok(Self {
            id,
            paper_id: paper.id.clone(),
            title: paper.title.clone(),
            answers: vec![None; questions.len()],
            time_spent: vec![TimeDelta::zero(); questions.len()],
            questions,
            current: 0,
            entered_at: now,
            started_at: now,
            finished_at: None,
            time_limit: TimeDelta::minutes(i64::from(minutes)),
            status: AttemptStatus::InProgress,
            result: None,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn paper_id(&self) -> &str {
        &self.paper_id
    }

    #[must_use]
    pub const fn status(&self) -> AttemptStatus {
        self.status
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answer_at(&self, index: usize) -> Option<&Answer> {
        self.answers.get(index).and_then(Option::as_ref)
    }

    #[must_use]
    pub const fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn deadline(&self) -> DateTime<Utc> {
        self.started_at + self.time_limit
    }

    /// Time since the start, frozen once the attempt is finished and never past the limit.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> TimeDelta {
        let end = self.finished_at.unwrap_or(now).min(self.deadline());
        (end - self.started_at).max(TimeDelta::zero())
    }

    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> TimeDelta {
        (self.time_limit - self.elapsed(now)).max(TimeDelta::zero())
    }

    /// Accumulated seconds on a question, including the running visit.
    #[must_use]
    pub fn time_spent_seconds(&self, index: usize, now: DateTime<Utc>) -> u64 {
        let Some(spent) = self.time_spent.get(index) else {
            return 0;
        };
        let running = if index == self.current && self.status == AttemptStatus::InProgress {
            (now.min(self.deadline()) - self.entered_at).max(TimeDelta::zero())
        } else {
            TimeDelta::zero()
        };
        seconds(*spent + running)
    }

    /// Expires the attempt when its time is up. Returns `true` on that transition.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> bool {
        if self.status == AttemptStatus::InProgress && now >= self.deadline() {
            self.finish(now, AttemptStatus::Expired);
            return true;
        }
        false
    }

    /// Stores or replaces the answer to question `index`.
    ///
    /// # Errors
    /// [`AssessmentError::QuestionOutOfRange`], or the attempt is no longer open.
    pub fn answer(&mut self, index: usize, answer: Answer, now: DateTime<Utc>) -> Result<(), AssessmentError> {
        self.ensure_open(now)?;
        let slot = self.answers.get_mut(index).ok_or_else(|| out_of_range(index))?;
        *slot = Some(answer);
        Ok(())
    }

    /// Moves to question `index`, banking the time spent on the current one.
    ///
    /// # Errors
    /// [`AssessmentError::QuestionOutOfRange`], or the attempt is no longer open.
    pub fn go_to(&mut self, index: usize, now: DateTime<Utc>) -> Result<usize, AssessmentError> {
        self.ensure_open(now)?;
        if index >= self.questions.len() {
            return Err(out_of_range(index));
        }
        self.close_timer(now);
        self.current = index;
        Ok(index)
    }

    /// Next question; stays on the last one.
    ///
    /// # Errors
    /// The attempt is no longer open.
    pub fn next(&mut self, now: DateTime<Utc>) -> Result<usize, AssessmentError> {
        let index = (self.current + 1).min(self.questions.len() - 1);
        self.go_to(index, now)
    }

    /// Previous question; stays on the first one.
    ///
    /// # Errors
    /// The attempt is no longer open.
    pub fn previous(&mut self, now: DateTime<Utc>) -> Result<usize, AssessmentError> {
        self.go_to(self.current.saturating_sub(1), now)
    }

    /// # Errors
    /// See [`Attempt::go_to`].
    pub fn navigate(&mut self, navigation: Navigation, now: DateTime<Utc>) -> Result<usize, AssessmentError> {
        match navigation {
            Navigation::GoTo { index } => self.go_to(index, now),
            Navigation::Next => self.next(now),
            Navigation::Previous => self.previous(now),
        }
    }

    /// Scores the attempt. Past the time limit the attempt is recorded as expired.
    ///
    /// # Errors
    /// [`AssessmentError::AttemptClosed`] if it was already submitted,
    /// [`AssessmentError::AttemptExpired`] if it already timed out.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<&AssessmentResult, AssessmentError> {
        self.closed_error()?;
        let status =
            if now >= self.deadline() { AttemptStatus::Expired } else { AttemptStatus::Submitted };
        self.finish(now, status);
        self.result.as_ref().ok_or_else(|| AssessmentError::from("attempt finished without a result"))
    }

    /// Applies a teacher's mark to a finished attempt.
    ///
    /// # Errors
    /// [`AssessmentError::AttemptInProgress`] before submission, or an unknown question number.
    pub fn apply_manual_mark(&mut self, question_number: u32, points: u32) -> Result<u32, AssessmentError> {
        let result = self.result.as_mut().ok_or_else(|| AssessmentError::AttemptInProgress {
            message: self.id.clone().into(),
            context: None,
        })?;
        result.apply_manual_mark(question_number, points)
    }

    #[must_use]
    pub fn view(&self, now: DateTime<Utc>) -> AttemptView {
        AttemptView {
            id: self.id.clone(),
            paper_id: self.paper_id.clone(),
            title: self.title.clone(),
            status: self.status,
            current_question: self.current,
            total_questions: self.questions.len(),
            answered: self.answers.iter().flatten().filter(|a| !a.is_empty()).count(),
            started_at: self.started_at,
            time_limit_seconds: seconds(self.time_limit),
            elapsed_seconds: seconds(self.elapsed(now)),
            remaining_seconds: seconds(self.remaining(now)),
            result: self.result.clone(),
        }
    }

    fn ensure_open(&mut self, now: DateTime<Utc>) -> Result<(), AssessmentError> {
        self.refresh(now);
        self.closed_error()
    }

    fn closed_error(&self) -> Result<(), AssessmentError> {
        let message = || self.id.clone().into();
        match self.status {
            AttemptStatus::InProgress => Ok(()),
            AttemptStatus::Submitted => {
                Err(AssessmentError::AttemptClosed { message: message(), context: None })
            },
            AttemptStatus::Expired => {
                Err(AssessmentError::AttemptExpired { message: message(), context: None })
            },
        }
    }

    fn close_timer(&mut self, now: DateTime<Utc>) {
        let now = now.min(self.deadline());
        let spent = (now - self.entered_at).max(TimeDelta::zero());
        if let Some(total) = self.time_spent.get_mut(self.current) {
            *total += spent;
        }
        self.entered_at = now;
    }

    fn finish(&mut self, now: DateTime<Utc>, status: AttemptStatus) {
        let at = now.min(self.deadline());
        self.close_timer(at);
        self.finished_at = Some(at);
        self.status = status;

        let spent: Vec<u64> = self.time_spent.iter().map(|d| seconds(*d)).collect();
        let mut result = AssessmentResult::aggregate(&self.questions, &self.answers, &spent);
        result.total_time_seconds = seconds(self.elapsed(at));

        info!(
            attempt = %self.id,
            paper = %self.paper_id,
            %status,
            score = result.total_score,
            possible = result.total_possible,
            "Attempt finished"
        );
        self.result = Some(result);
    }
}

fn seconds(delta: TimeDelta) -> u64 {
    u64::try_from(delta.num_seconds()).unwrap_or(0)
}

fn out_of_range(index: usize) -> AssessmentError {
    AssessmentError::QuestionOutOfRange { message: format!("question index {index}").into(), context: None }
}
