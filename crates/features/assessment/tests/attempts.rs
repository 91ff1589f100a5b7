use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use gems_assessment::AssessmentError;
use gems_assessment::answer::Answer;
use gems_assessment::attempt::{Attempt, AttemptStatus, Navigation};
use gems_assessment::events::AttemptSubmitted;
use gems_assessment::paper::AssessmentPaper;
use gems_assessment::question::QuestionRecord;
use gems_assessment::store::AttemptStore;
use gems_domain::config::AssessmentConfig;
use gems_domain::language::{Language, Skill, Tier};
use gems_event_bus::EventBus;
use serde_json::json;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 14, 9, 0, 0).unwrap()
}

fn at(seconds: i64) -> DateTime<Utc> {
    t0() + TimeDelta::seconds(seconds)
}

fn paper(limit: Option<u32>) -> AssessmentPaper {
    AssessmentPaper {
        id: "reading-f-1".to_owned(),
        title: "Reading Foundation".to_owned(),
        skill: Skill::Reading,
        language: Language::Spanish,
        tier: Tier::Foundation,
        time_limit_minutes: limit,
        questions: vec![
            QuestionRecord {
                id: "q1".to_owned(),
                question_number: 1,
                question_type: "multiple-choice".to_owned(),
                marks: 3,
                data: json!({"questions": [
                    {"correctAnswer": "a"}, {"correctAnswer": "b"}, {"correctAnswer": "c"}
                ]}),
                ..Default::default()
            },
            QuestionRecord {
                id: "q2".to_owned(),
                question_number: 2,
                question_type: "sentence-completion".to_owned(),
                marks: 1,
                data: json!({"sentences": [{"correctCompletion": "Madrid"}]}),
                ..Default::default()
            },
            QuestionRecord {
                id: "q3".to_owned(),
                question_number: 3,
                question_type: "translation".to_owned(),
                marks: 4,
                ..Default::default()
            },
        ],
    }
}

#[test]
fn time_accumulates_across_revisits() {
    let mut attempt = Attempt::start("a1", &paper(Some(30)), 60, t0()).unwrap();

    attempt.go_to(1, at(20)).unwrap();
    attempt.previous(at(50)).unwrap();
    attempt.next(at(65)).unwrap();
    attempt.answer(1, Answer::list([" madrid "]), at(70)).unwrap();

    assert_eq!(attempt.time_spent_seconds(0, at(70)), 35);
    assert_eq!(attempt.time_spent_seconds(1, at(70)), 35);

    let result = attempt.submit(at(90)).unwrap().clone();
    assert_eq!(attempt.status(), AttemptStatus::Submitted);
    assert_eq!(result.responses[1].time_spent_seconds, 55);
    assert_eq!(result.total_score, 1);
    assert_eq!(result.total_possible, 8);
    assert_eq!(result.total_time_seconds, 90);
}

#[test]
fn navigation_stays_in_bounds() {
    let mut attempt = Attempt::start("a1", &paper(None), 60, t0()).unwrap();
    assert_eq!(attempt.previous(at(1)).unwrap(), 0);
    assert_eq!(attempt.navigate(Navigation::GoTo { index: 2 }, at(2)).unwrap(), 2);
    assert_eq!(attempt.next(at(3)).unwrap(), 2);
    assert!(matches!(attempt.go_to(3, at(4)), Err(AssessmentError::QuestionOutOfRange { .. })));
    assert!(matches!(
        attempt.answer(9, Answer::text("x"), at(5)),
        Err(AssessmentError::QuestionOutOfRange { .. })
    ));
}

#[test]
fn remaining_time_saturates() {
    let attempt = Attempt::start("a1", &paper(Some(1)), 60, t0()).unwrap();
    assert_eq!(attempt.remaining(at(15)), TimeDelta::seconds(45));
    assert_eq!(attempt.remaining(at(600)), TimeDelta::zero());
    assert_eq!(attempt.elapsed(at(600)), TimeDelta::minutes(1));
}

#[test]
fn operations_after_the_limit_expire_the_attempt() {
    let mut attempt = Attempt::start("a1", &paper(Some(1)), 60, t0()).unwrap();
    attempt.answer(0, Answer::list(["a", "b", "x"]), at(10)).unwrap();

    let err = attempt.answer(1, Answer::list(["Madrid"]), at(61)).unwrap_err();
    assert!(matches!(err, AssessmentError::AttemptExpired { .. }));
    assert_eq!(attempt.status(), AttemptStatus::Expired);

    let result = attempt.result().unwrap();
    assert_eq!(result.total_score, 2);
    assert_eq!(result.total_time_seconds, 60);
    assert!(matches!(attempt.submit(at(70)), Err(AssessmentError::AttemptExpired { .. })));
}

#[test]
fn submitting_late_records_expiry_and_twice_fails() {
    let mut attempt = Attempt::start("a1", &paper(Some(1)), 60, t0()).unwrap();
    attempt.submit(at(120)).unwrap();
    assert_eq!(attempt.status(), AttemptStatus::Expired);

    let mut attempt = Attempt::start("a2", &paper(Some(1)), 60, t0()).unwrap();
    attempt.submit(at(5)).unwrap();
    assert!(matches!(attempt.submit(at(6)), Err(AssessmentError::AttemptClosed { .. })));
    assert!(matches!(attempt.go_to(1, at(7)), Err(AssessmentError::AttemptClosed { .. })));
}

#[test]
fn empty_papers_cannot_be_started() {
    let mut empty = paper(None);
    empty.questions.clear();
    assert!(matches!(Attempt::start("a", &empty, 60, t0()), Err(AssessmentError::InvalidPaper { .. })));
    assert!(matches!(Attempt::start("a", &paper(None), 0, t0()), Err(AssessmentError::InvalidPaper { .. })));
}

#[test]
fn manual_marks_after_submission() {
    let mut attempt = Attempt::start("a1", &paper(None), 60, t0()).unwrap();
    assert!(matches!(attempt.apply_manual_mark(3, 2), Err(AssessmentError::AttemptInProgress { .. })));

    attempt.submit(at(30)).unwrap();
    assert_eq!(attempt.apply_manual_mark(3, 2).unwrap(), 2);
    assert_eq!(attempt.result().unwrap().total_score, 2);
}

#[tokio::test]
async fn store_publishes_once_on_submit() {
    let events = EventBus::new();
    let mut rx = events.subscribe::<AttemptSubmitted>().unwrap();
    let store = AttemptStore::new(&AssessmentConfig::default(), events);

    let view = store.start(&paper(None), t0()).unwrap();
    assert_eq!(view.status, AttemptStatus::InProgress);
    assert_eq!(view.total_questions, 3);
    assert_eq!(view.remaining_seconds, 3600);

    let view = store.answer(&view.id, 0, Answer::list(["a", "b", "c"]), at(10)).unwrap();
    assert_eq!(view.answered, 1);

    let result = store.submit(&view.id, at(20)).unwrap();
    assert_eq!(result.total_score, 3);

    let event = rx.recv().await.unwrap();
    assert_eq!(event.attempt_id, view.id);
    assert_eq!(event.status, AttemptStatus::Submitted);
    assert_eq!(event.total_score, 3);

    assert!(matches!(store.submit(&view.id, at(30)), Err(AssessmentError::AttemptClosed { .. })));
    assert!(rx.try_recv().is_err());
}

#[test]
fn store_expires_on_view_and_reports_unknown_ids() {
    let store = AttemptStore::new(&AssessmentConfig::default(), EventBus::new());
    let view = store.start(&paper(Some(1)), t0()).unwrap();

    let view = store.view(&view.id, at(300)).unwrap();
    assert_eq!(view.status, AttemptStatus::Expired);
    assert_eq!(view.remaining_seconds, 0);
    assert!(view.result.is_some());

    assert!(matches!(store.view("missing", t0()), Err(AssessmentError::AttemptNotFound { .. })));
    assert_eq!(store.len(), 1);
}
