use crate::matching::{award_points, check_answer, check_choice};
use crate::task::{AnswerText, ComprehensionQuestion, ComprehensionTask};
use gems_derive::api_model;
use std::collections::BTreeMap;
use tracing::debug;

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct QuestionFeedback {
    pub question_id: String,
    pub user_answer: Option<AnswerText>,
    pub correct_answer: AnswerText,
    pub is_correct: bool,
    pub points: u32,
    pub max_points: u32,
    pub explanation: Option<String>,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct ComprehensionResult {
    pub task_id: String,
    /// Percentage of the available points, rounded.
    pub score: u32,
    pub total_points: u32,
    pub max_points: u32,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub passing_score: u8,
    pub passed: bool,
    pub time_spent_seconds: u64,
    pub feedback: Vec<QuestionFeedback>,
}

/// Marks every question of `task`. Unanswered questions earn nothing; answers keyed by
/// unknown question ids are ignored.
#[must_use]
pub fn grade(
    task: &ComprehensionTask,
    answers: &BTreeMap<String, AnswerText>,
    time_spent_seconds: u64,
    default_passing_score: u8,
) -> ComprehensionResult {
    let feedback: Vec<QuestionFeedback> = task
        .questions
        .iter()
        .map(|question| {
            let user_answer = answers.get(&question.id).filter(|answer| !answer.is_blank());
            let (is_correct, points) = user_answer.map_or((false, 0), |answer| mark(question, answer));
            QuestionFeedback {
                question_id: question.id.clone(),
                user_answer: user_answer.cloned(),
                correct_answer: question.correct_answer.clone(),
                is_correct,
                points,
                max_points: question.points,
                explanation: question.explanation.clone(),
            }
        })
        .collect();

    let total_points = feedback.iter().map(|f| f.points).sum();
    let max_points = task.max_points();
    let score = percentage(total_points, max_points);
    let passing_score = task.passing_score.unwrap_or(default_passing_score);
    let correct_answers = feedback.iter().filter(|f| f.is_correct).count();

    debug!(task_id = %task.id, score, correct_answers, "Comprehension task graded");

    ComprehensionResult {
        task_id: task.id.clone(),
        score,
        total_points,
        max_points,
        total_questions: task.questions.len(),
        correct_answers,
        passing_score,
        passed: score >= u32::from(passing_score),
        time_spent_seconds,
        feedback,
    }
}

/// Whether `answer` is correct and the points it earns.
#[must_use]
pub fn mark(question: &ComprehensionQuestion, answer: &AnswerText) -> (bool, u32) {
    if question.question_type.is_choice() {
        let correct = check_choice(answer, &question.correct_answer);
        return (correct, if correct { question.points } else { 0 });
    }
    let points = award_points(answer, &question.correct_answer, question.points);
    (check_answer(answer, &question.correct_answer), points)
}

fn percentage(points: u32, possible: u32) -> u32 {
    if possible == 0 {
        return 0;
    }
    (f64::from(points) / f64::from(possible) * 100.0).round() as u32
}
