use super::{KeyedItem, Lookup, Matching, QuestionBody, QuestionType, RawItem, raw_items};
use crate::answer::Scalar;
use serde_json::Value;

/// Reading papers award one mark per correct sub-item.
pub(super) fn parse(kind: QuestionType, data: &Value) -> Option<QuestionBody> {
    let (field, lookup, matching) = match kind {
        QuestionType::MultipleChoice | QuestionType::StudentGrid => {
            ("questions", Lookup::Position, Matching::Exact)
        },
        QuestionType::LetterMatching => ("students", Lookup::Key, Matching::Exact),
        QuestionType::TimeSequence => ("events", Lookup::Position, Matching::Exact),
        QuestionType::SentenceCompletion => ("sentences", Lookup::Position, Matching::Loose),
        QuestionType::HeadlineMatching => ("articles", Lookup::Position, Matching::Exact),
        QuestionType::OpenResponse | QuestionType::Translation => {
            return Some(QuestionBody::Manual { band: None });
        },
        _ => return None,
    };

    let items = raw_items(data, field)?
        .into_iter()
        .map(|item| KeyedItem {
            expected: item.expected(answer_key(kind, &item)),
            key: item.name,
            marks: 1,
        })
        .collect();

    Some(QuestionBody::Keyed { items, lookup, matching })
}

fn answer_key(kind: QuestionType, item: &RawItem) -> Option<&Scalar> {
    match kind {
        QuestionType::LetterMatching => item.correct_letter.as_ref(),
        QuestionType::StudentGrid => item.correct_student.as_ref(),
        QuestionType::TimeSequence => item.correct_sequence.as_ref(),
        QuestionType::SentenceCompletion => item.correct_completion.as_ref(),
        QuestionType::HeadlineMatching => item.correct_headline.as_ref(),
        _ => item.correct_answer.as_ref(),
    }
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
    fn multiple_choice_counts_correct_positions() {
        let question = record(
            "multiple-choice",
            3,
            json!({"questions": [
                {"question": "q1", "correctAnswer": "a"},
                {"question": "q2", "correct": "b"},
                {"question": "q3", "correctAnswer": "c"},
            ]}),
        )
        .parse(Skill::Reading);

        assert_eq!(question.score(Some(&Answer::list(["a", "b", "d"]))), 2);
        assert_eq!(question.score(Some(&Answer::list(["a", "b", "c"]))), 3);
    }

    #[test]
    fn score_is_capped_at_marks() {
        let question = record(
            "student-grid",
            2,
            json!({"questions": [
                {"correctStudent": "Ana"}, {"correctStudent": "Luis"}, {"correctStudent": "Eva"},
            ]}),
        )
        .parse(Skill::Reading);

        assert_eq!(question.score(Some(&Answer::list(["Ana", "Luis", "Eva"]))), 2);
    }

    #[test]
    fn letter_matching_uses_student_names() {
        let question = record(
            "letter-matching",
            2,
            json!({"students": [
                {"name": "Ana", "correctLetter": "B"},
                {"name": "Luis", "correct": "D"},
            ]}),
        )
        .parse(Skill::Reading);

        let answer = Answer::map([("Luis", Answer::text("D")), ("Ana", Answer::text("C"))]);
        assert_eq!(question.score(Some(&answer)), 1);
    }

    #[test]
    fn sentence_completion_is_loose() {
        let question = record(
            "sentence-completion",
            1,
            json!({"sentences": [{"incomplete": "La capital es...", "correctCompletion": "madrid"}]}),
        )
        .parse(Skill::Reading);

        assert_eq!(question.score(Some(&Answer::list([" Madrid "]))), 1);
    }

    #[test]
    fn exact_types_are_case_sensitive() {
        let question = record(
            "headline-matching",
            1,
            json!({"articles": [{"text": "...", "correctHeadline": "A"}]}),
        )
        .parse(Skill::Reading);

        assert_eq!(question.score(Some(&Answer::list(["a"]))), 0);
        assert_eq!(question.score(Some(&Answer::map([("0", Answer::text("A"))]))), 1);
    }

    #[test]
    fn manual_types_score_zero() {
        for kind in ["open-response", "translation"] {
            let question = record(kind, 4, json!({})).parse(Skill::Reading);
            assert!(question.requires_manual_marking());
            assert_eq!(question.score(Some(&Answer::text("Me gusta el fútbol"))), 0);
        }
    }

    #[test]
    fn blank_answer_keys_never_match() {
        let question = record(
            "time-sequence",
            2,
            json!({"events": [{"event": "x", "correctSequence": ""}, {"event": "y"}]}),
        )
        .parse(Skill::Reading);

        assert_eq!(question.score(Some(&Answer::list(["", "1"]))), 0);
    }
}
