//! Scored attempts: per-question responses, totals and the GCSE grade band.

use crate::answer::Answer;
use crate::error::AssessmentError;
use crate::question::Question;
use gems_derive::api_model;
use strum_macros::Display;

/// GCSE grade band, 9 (highest) to 1, or U (ungraded).
#[api_model]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum Grade {
    #[serde(rename = "U")]
    #[strum(to_string = "U")]
    Ungraded,
    #[serde(rename = "1")]
    #[strum(to_string = "1")]
    One,
    #[serde(rename = "2")]
    #[strum(to_string = "2")]
    Two,
    #[serde(rename = "3")]
    #[strum(to_string = "3")]
    Three,
    #[serde(rename = "4")]
    #[strum(to_string = "4")]
    Four,
    #[serde(rename = "5")]
    #[strum(to_string = "5")]
    Five,
    #[serde(rename = "6")]
    #[strum(to_string = "6")]
    Six,
    #[serde(rename = "7")]
    #[strum(to_string = "7")]
    Seven,
    #[serde(rename = "8")]
    #[strum(to_string = "8")]
    Eight,
    #[serde(rename = "9")]
    #[strum(to_string = "9")]
    Nine,
}

impl Grade {
    /// Bands every ten percent: 90+ is a 9, 10..=19 a 1, below 10 ungraded.
    #[must_use]
    pub const fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Self::Nine,
            80..=89 => Self::Eight,
            70..=79 => Self::Seven,
            60..=69 => Self::Six,
            50..=59 => Self::Five,
            40..=49 => Self::Four,
            30..=39 => Self::Three,
            20..=29 => Self::Two,
            10..=19 => Self::One,
            _ => Self::Ungraded,
        }
    }
}

/// `round(score / possible * 100)`, 0 when nothing was possible.
#[must_use]
pub fn percentage(score: u32, possible: u32) -> u32 {
    if possible == 0 {
        return 0;
    }
    (f64::from(score) / f64::from(possible) * 100.0).round() as u32
}

/// Outcome of one question.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct QuestionResponse {
    pub question_id: String,
    /// 1-based position in the paper.
    pub question_number: u32,
    pub question_type: String,
    pub points_awarded: u32,
    pub marks_possible: u32,
    pub is_correct: bool,
    pub requires_manual_marking: bool,
    pub time_spent_seconds: u64,
}

/// Totals for a finished attempt.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct AssessmentResult {
    pub total_score: u32,
    pub total_possible: u32,
    pub percentage: u32,
    pub grade: Grade,
    /// Questions with a non-empty answer.
    pub questions_completed: u32,
    pub total_time_seconds: u64,
    pub responses: Vec<QuestionResponse>,
}

impl AssessmentResult {
    /// Scores every question. `answers` and `time_spent` are aligned with `questions`;
    /// missing entries count as unanswered and zero seconds.
    #[must_use]
    pub fn aggregate(questions: &[Question], answers: &[Option<Answer>], time_spent: &[u64]) -> Self {
        let responses: Vec<_> = questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let answer = answers.get(index).and_then(Option::as_ref);
                let points_awarded = question.score(answer);
                QuestionResponse {
                    question_id: question.id.clone(),
                    question_number: index as u32 + 1,
                    question_type: question.question_type.clone(),
                    points_awarded,
                    marks_possible: question.marks,
                    is_correct: is_correct(points_awarded, question.marks),
                    requires_manual_marking: question.requires_manual_marking(),
                    time_spent_seconds: time_spent.get(index).copied().unwrap_or(0),
                }
            })
            .collect();

        let questions_completed =
            answers.iter().flatten().filter(|answer| !answer.is_empty()).count() as u32;

        let mut result = Self {
            total_score: 0,
            total_possible: 0,
            percentage: 0,
            grade: Grade::Ungraded,
            questions_completed,
            total_time_seconds: responses.iter().map(|r| r.time_spent_seconds).sum(),
            responses,
        };
        result.recompute();
        result
    }

    /// Records a teacher's mark for a question, clamped to its marks, and refreshes the totals.
    ///
    /// # Errors
    /// Returns [`AssessmentError::QuestionOutOfRange`] for an unknown question number.
    pub fn apply_manual_mark(&mut self, question_number: u32, points: u32) -> Result<u32, AssessmentError> {
        let response = self
            .responses
            .iter_mut()
            .find(|r| r.question_number == question_number)
            .ok_or_else(|| AssessmentError::QuestionOutOfRange {
                message: format!("question {question_number}").into(),
                context: None,
            })?;

        response.points_awarded = points.min(response.marks_possible);
        response.is_correct = is_correct(response.points_awarded, response.marks_possible);
        let awarded = response.points_awarded;
        self.recompute();
        Ok(awarded)
    }

    fn recompute(&mut self) {
        self.total_score = self.responses.iter().map(|r| r.points_awarded).sum();
        self.total_possible = self.responses.iter().map(|r| r.marks_possible).sum();
        self.percentage = percentage(self.total_score, self.total_possible);
        self.grade = Grade::from_percentage(self.percentage);
    }
}

const fn is_correct(points: u32, marks: u32) -> bool {
    marks > 0 && points == marks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::QuestionRecord;
    use gems_domain::language::Skill;
    use serde_json::json;

    fn questions() -> Vec<Question> {
        let mc = QuestionRecord {
            id: "mc".to_owned(),
            question_type: "multiple-choice".to_owned(),
            marks: 2,
            data: json!({"questions": [{"correctAnswer": "a"}, {"correctAnswer": "b"}]}),
            ..Default::default()
        };
        let open = QuestionRecord {
            id: "open".to_owned(),
            question_type: "open-response".to_owned(),
            marks: 4,
            ..Default::default()
        };
        vec![mc.parse(Skill::Reading), open.parse(Skill::Reading)]
    }

    #[test]
    fn percentage_rounds_and_handles_zero() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn grade_bands() {
        assert_eq!(Grade::from_percentage(100), Grade::Nine);
        assert_eq!(Grade::from_percentage(90), Grade::Nine);
        assert_eq!(Grade::from_percentage(89), Grade::Eight);
        assert_eq!(Grade::from_percentage(10), Grade::One);
        assert_eq!(Grade::from_percentage(9), Grade::Ungraded);
        assert_eq!(Grade::Five.to_string(), "5");
        assert_eq!(serde_json::to_value(Grade::Ungraded).unwrap(), json!("U"));
    }

    #[test]
    fn aggregates_responses() {
        let answers = vec![Some(Answer::list(["a", "b"])), None];
        let result = AssessmentResult::aggregate(&questions(), &answers, &[30, 12]);

        assert_eq!(result.total_score, 2);
        assert_eq!(result.total_possible, 6);
        assert_eq!(result.percentage, 33);
        assert_eq!(result.questions_completed, 1);
        assert_eq!(result.total_time_seconds, 42);
        assert_eq!(result.responses[0].question_number, 1);
        assert!(result.responses[0].is_correct);
        assert!(!result.responses[1].is_correct);
        assert!(result.responses[1].requires_manual_marking);
    }

    #[test]
    fn manual_marks_are_clamped() {
        let mut result = AssessmentResult::aggregate(&questions(), &[], &[]);
        assert_eq!(result.total_score, 0);

        assert_eq!(result.apply_manual_mark(2, 9).unwrap(), 4);
        assert_eq!(result.total_score, 4);
        assert_eq!(result.percentage, 67);
        assert_eq!(result.grade, Grade::Six);
        assert!(result.responses[1].is_correct);

        assert!(matches!(
            result.apply_manual_mark(7, 1),
            Err(AssessmentError::QuestionOutOfRange { .. })
        ));
    }
}
