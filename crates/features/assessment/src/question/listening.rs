use super::{KeyedItem, Lookup, Matching, PairedRow, QuestionBody, QuestionType, RawItem, raw_items};
use crate::answer::Scalar;
use serde_json::Value;

/// Listening answers are objects keyed by sub-question id; items carry their own marks.
pub(super) fn parse(kind: QuestionType, data: &Value) -> Option<QuestionBody> {
    let field = match kind {
        QuestionType::LetterMatching | QuestionType::MultipleChoice => "questions",
        QuestionType::OpinionRating => "aspects",
        QuestionType::MultiPart => "parts",
        QuestionType::LifestyleGrid => return paired(data, "speakers", grid_columns),
        QuestionType::ActivityTiming => return paired(data, "questions", timing_columns),
        QuestionType::OpenResponse | QuestionType::Dictation => {
            return Some(QuestionBody::Manual { band: None });
        },
        _ => return None,
    };

    let items = raw_items(data, field)?
        .into_iter()
        .map(|item| KeyedItem {
            expected: item.expected(item.correct_answer.as_ref()),
            key: item.id_text(),
            marks: item.marks.unwrap_or(1),
        })
        .collect();

    Some(QuestionBody::Keyed { items, lookup: Lookup::KeyOrPosition, matching: Matching::Exact })
}

fn paired(
    data: &Value,
    field: &str,
    columns: fn(&RawItem) -> Vec<(&'static str, Option<Scalar>)>,
) -> Option<QuestionBody> {
    let rows = raw_items(data, field)?
        .iter()
        .map(|item| PairedRow { key: item.id_text(), columns: columns(item) })
        .collect();
    Some(QuestionBody::Paired { rows })
}

fn grid_columns(item: &RawItem) -> Vec<(&'static str, Option<Scalar>)> {
    vec![("good", item.good.clone()), ("needsImprovement", item.needs_improvement.clone())]
}

fn timing_columns(item: &RawItem) -> Vec<(&'static str, Option<Scalar>)> {
    vec![("activity", item.correct_activity.clone()), ("time", item.correct_time.clone())]
}

#[cfg(test)]
mod tests {
    use crate::answer::Answer;
    use crate::question::QuestionRecord;
    use gems_domain::language::Skill;
    use serde_json::json;

    fn record(kind: &str, marks: u32, data: serde_json::Value) -> QuestionRecord {
        QuestionRecord { question_type: kind.to_owned(), marks, data, ..Default::default() }
    }

    #[test]
    fn keyed_by_id_with_item_marks() {
        let question = record(
            "multiple-choice",
            3,
            json!({"questions": [
                {"id": "q1", "correctAnswer": "B", "marks": 2},
                {"id": "q2", "correctAnswer": "A"},
            ]}),
        )
        .parse(Skill::Listening);

        let answer = Answer::map([("q1", Answer::text("B")), ("q2", Answer::text("C"))]);
        assert_eq!(question.score(Some(&answer)), 2);

        let answer = Answer::map([("q1", Answer::text("B")), ("q2", Answer::text("A"))]);
        assert_eq!(question.score(Some(&answer)), 3);
    }

    #[test]
    fn numeric_ids_and_positional_fallback() {
        let question = record(
            "opinion-rating",
            2,
            json!({"aspects": [
                {"id": 1, "correctAnswer": "P"},
                {"correctAnswer": "P+N"},
            ]}),
        )
        .parse(Skill::Listening);

        let answer = Answer::map([("1", Answer::text("P")), ("1x", Answer::text("N"))]);
        assert_eq!(question.score(Some(&answer)), 1);

        let answer = Answer::list(["N", "P+N"]);
        assert_eq!(question.score(Some(&answer)), 1);
    }

    #[test]
    fn lifestyle_grid_scores_each_column() {
        let question = record(
            "lifestyle-grid",
            4,
            json!({"speakers": [
                {"id": "s1", "good": "A", "needsImprovement": "C"},
                {"id": "s2", "good": "B", "needsImprovement": "D"},
            ]}),
        )
        .parse(Skill::Listening);

        let answer = Answer::map([
            ("s1", Answer::map([("good", Answer::text("A")), ("needsImprovement", Answer::text("C"))])),
            ("s2", Answer::map([("good", Answer::text("B")), ("needsImprovement", Answer::text("A"))])),
        ]);
        assert_eq!(question.score(Some(&answer)), 3);
    }

    #[test]
    fn activity_timing_scores_each_column() {
        let question = record(
            "activity-timing",
            2,
            json!({"questions": [{"id": "t1", "correctActivity": "swim", "correctTime": "morning"}]}),
        )
        .parse(Skill::Listening);

        let answer = Answer::map([(
            "t1",
            Answer::map([("activity", Answer::text("swim")), ("time", Answer::text("evening"))]),
        )]);
        assert_eq!(question.score(Some(&answer)), 1);
    }

    #[test]
    fn dictation_is_manual() {
        let question = record("dictation", 5, json!({"sentences": []})).parse(Skill::Listening);
        assert!(question.requires_manual_marking());
        assert_eq!(question.score(Some(&Answer::text("hola"))), 0);
    }
}
