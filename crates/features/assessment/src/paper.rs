use crate::question::{Question, QuestionRecord};
use gems_derive::api_model;
use gems_domain::language::{Language, Skill, Tier};

/// A complete exam paper for one skill.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq)]
pub struct AssessmentPaper {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub skill: Skill,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub tier: Tier,
    /// Falls back to the configured default when absent.
    #[serde(default)]
    pub time_limit_minutes: Option<u32>,
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
}

impl AssessmentPaper {
    /// Questions a student sees, ordered by question number; standardization rows are dropped.
    #[must_use]
    pub fn student_records(&self) -> Vec<&QuestionRecord> {
        let mut records: Vec<_> = self.questions.iter().filter(|q| !q.is_standardization()).collect();
        records.sort_by_key(|q| q.question_number);
        records
    }

    /// Parsed, scorable student questions.
    #[must_use]
    pub fn student_questions(&self) -> Vec<Question> {
        self.student_records().into_iter().map(|record| record.parse(self.skill)).collect()
    }

    #[must_use]
    pub fn total_marks(&self) -> u32 {
        self.student_records().iter().map(|q| q.marks).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(number: u32, title: &str, marks: u32) -> QuestionRecord {
        QuestionRecord {
            id: format!("q{number}"),
            question_number: number,
            question_type: "multiple-choice".to_owned(),
            title: title.to_owned(),
            marks,
            ..Default::default()
        }
    }

    #[test]
    fn standardization_questions_are_filtered() {
        let paper = AssessmentPaper {
            id: "p1".to_owned(),
            title: "Reading Foundation".to_owned(),
            skill: Skill::Reading,
            language: Language::Spanish,
            tier: Tier::Foundation,
            time_limit_minutes: Some(45),
            questions: vec![
                record(2, "Holidays", 4),
                record(1, "Standardization question: calibration", 6),
                record(1, "Family", 3),
            ],
        };

        let ids: Vec<_> = paper.student_records().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["q1", "q2"]);
        assert_eq!(paper.total_marks(), 7);
        assert_eq!(paper.student_questions().len(), 2);
    }

    #[test]
    fn deserializes_wire_shape() {
        let paper: AssessmentPaper = serde_json::from_value(serde_json::json!({
            "id": "p",
            "skill": "listening",
            "language": "fr",
            "tier": "higher",
            "timeLimitMinutes": 35,
            "questions": [{"type": "dictation", "marks": 8, "data": {}}]
        }))
        .unwrap();

        assert_eq!(paper.language, Language::French);
        assert_eq!(paper.time_limit_minutes, Some(35));
        assert_eq!(paper.questions[0].question_type, "dictation");
    }
}
