use gems_assessment::answer::Answer;
use gems_assessment::question::{QuestionBody, QuestionRecord};
use gems_domain::language::Skill;
use serde_json::json;

fn question(skill: Skill, raw: serde_json::Value) -> gems_assessment::question::Question {
    serde_json::from_value::<QuestionRecord>(raw).unwrap().parse(skill)
}

#[test]
fn multiple_choice_two_of_three() {
    let q = question(
        Skill::Reading,
        json!({
            "id": "q1",
            "questionNumber": 1,
            "type": "multiple-choice",
            "title": "Free time",
            "marks": 3,
            "data": {"questions": [
                {"question": "¿Qué deporte?", "options": ["a", "b", "c"], "correctAnswer": "a"},
                {"question": "¿Cuándo?", "options": ["a", "b", "c"], "correctAnswer": "c"},
                {"question": "¿Dónde?", "options": ["a", "b", "c"], "correctAnswer": "b"}
            ]}
        }),
    );

    let answer: Answer = serde_json::from_value(json!(["a", "c", "a"])).unwrap();
    assert_eq!(q.score(Some(&answer)), 2);
}

#[test]
fn empty_answers_score_zero_for_every_type() {
    let types = [
        (Skill::Reading, "multiple-choice"),
        (Skill::Reading, "letter-matching"),
        (Skill::Reading, "student-grid"),
        (Skill::Reading, "time-sequence"),
        (Skill::Reading, "sentence-completion"),
        (Skill::Reading, "headline-matching"),
        (Skill::Reading, "open-response"),
        (Skill::Reading, "translation"),
        (Skill::Listening, "lifestyle-grid"),
        (Skill::Listening, "activity-timing"),
        (Skill::Listening, "multi-part"),
        (Skill::Writing, "extended-writing"),
        (Skill::Reading, "crossword"),
    ];
    let empties = [
        None,
        Some(Answer::Empty),
        Some(Answer::text("")),
        Some(Answer::list(["", "  "])),
        Some(Answer::map([("x", Answer::Empty)])),
    ];

    for (skill, kind) in types {
        let q = question(skill, json!({"type": kind, "marks": 5, "data": {"questions": [{"correct": ""}]}}));
        for answer in &empties {
            assert_eq!(q.score(answer.as_ref()), 0, "{kind} with {answer:?}");
        }
    }
}

#[test]
fn malformed_data_is_unscored_not_an_error() {
    let q = question(Skill::Reading, json!({"type": "multiple-choice", "marks": 2, "data": {"questions": 7}}));
    assert_eq!(q.body, QuestionBody::Unscored);
    assert_eq!(q.score(Some(&Answer::list(["a"]))), 0);

    let q = question(Skill::Reading, json!({"type": "mystery", "marks": 2}));
    assert_eq!(q.body, QuestionBody::Unscored);
    assert_eq!(q.kind, None);
    assert_eq!(q.question_type, "mystery");
}

#[test]
fn wrong_answer_shape_scores_zero() {
    let q = question(
        Skill::Reading,
        json!({"type": "letter-matching", "marks": 2, "data": {"students": [{"name": "Ana", "correct": "B"}]}}),
    );
    assert_eq!(q.score(Some(&Answer::text("B"))), 0);
    assert_eq!(q.score(Some(&Answer::list(["B"]))), 0);
}

#[test]
fn stored_row_aliases_are_accepted() {
    let q = question(
        Skill::Reading,
        json!({
            "id": "row-1",
            "question_type": "headline-matching",
            "marks": 1,
            "question_data": {"articles": [{"correct": "D"}]},
            "theme": "Theme 1"
        }),
    );
    assert_eq!(q.score(Some(&Answer::list(["D"]))), 1);
}
