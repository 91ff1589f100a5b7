//! Question rows and their typed, scorable form.
//!
//! Rows keep their type-specific `data` as raw JSON. [`QuestionRecord::parse`] turns a row into a
//! [`Question`] whose [`QuestionBody`] knows how to score an [`Answer`]. Rows that cannot be
//! understood become [`QuestionBody::Unscored`] and always score 0.

mod listening;
mod reading;
mod writing;

pub use writing::{WordCountBand, WordCountCheck};

use crate::answer::{Answer, Scalar};
use gems_derive::api_model;
use gems_domain::constants::STANDARDIZATION_MARKER;
use gems_domain::language::Skill;
use gems_kernel::text::eq_loose;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::warn;

/// Every question type tag known to the exam papers.
#[api_model(rename_all = "kebab-case")]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    LetterMatching,
    StudentGrid,
    TimeSequence,
    SentenceCompletion,
    HeadlineMatching,
    OpenResponse,
    Translation,
    LifestyleGrid,
    OpinionRating,
    ActivityTiming,
    MultiPart,
    Dictation,
    PhotoDescription,
    ShortMessage,
    GapFill,
    ExtendedWriting,
}

/// A stored question row.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Default)]
pub struct QuestionRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub question_number: u32,
    /// Type tag such as `multiple-choice`.
    #[serde(rename = "type", alias = "questionType", alias = "question_type")]
    pub question_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub marks: u32,
    /// Type-specific payload (sub-questions, answer keys, word counts).
    #[serde(default, alias = "questionData", alias = "question_data")]
    pub data: Value,
}

impl QuestionRecord {
    /// Teacher-only calibration questions are never shown to students.
    #[must_use]
    pub fn is_standardization(&self) -> bool {
        self.title.contains(STANDARDIZATION_MARKER) || self.instructions.contains(STANDARDIZATION_MARKER)
    }

    /// Parses the row for a paper of the given skill.
    #[must_use]
    pub fn parse(&self, skill: Skill) -> Question {
        let kind = QuestionType::from_str(&self.question_type).ok();
        let body = match kind {
            Some(kind) => match skill {
                Skill::Reading => reading::parse(kind, &self.data),
                Skill::Listening => listening::parse(kind, &self.data),
                Skill::Writing => writing::parse(kind, &self.data),
            },
            None => None,
        };

        let body = body.unwrap_or_else(|| {
            warn!(
                id = %self.id,
                question_type = %self.question_type,
                skill = %skill,
                "Unscorable question, scoring as 0"
            );
            QuestionBody::Unscored
        });

        Question {
            id: self.id.clone(),
            question_type: self.question_type.clone(),
            kind,
            marks: self.marks,
            body,
        }
    }
}

/// A question ready to be scored.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: String,
    /// The raw tag, kept for reporting even when unknown.
    pub question_type: String,
    pub kind: Option<QuestionType>,
    pub marks: u32,
    pub body: QuestionBody,
}

/// How a question is marked.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionBody {
    /// One expected value per sub-item.
    Keyed { items: Vec<KeyedItem>, lookup: Lookup, matching: Matching },
    /// Grid rows where each column is checked on its own.
    Paired { rows: Vec<PairedRow> },
    /// Marked by a teacher; optionally carries a word count band.
    Manual { band: Option<WordCountBand> },
    Unscored,
}

/// Where a sub-item's answer is found inside the question answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Position,
    Key,
    /// The item's key first, then its position.
    KeyOrPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matching {
    Exact,
    /// Trimmed and case-insensitive.
    Loose,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyedItem {
    pub key: Option<String>,
    pub expected: Option<Scalar>,
    pub marks: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairedRow {
    pub key: Option<String>,
    /// `(answer field, expected value)` pairs.
    pub columns: Vec<(&'static str, Option<Scalar>)>,
}

impl Question {
    /// Points for `answer`, capped at the question's marks.
    #[must_use]
    pub fn score(&self, answer: Option<&Answer>) -> u32 {
        let Some(answer) = answer.filter(|answer| !answer.is_empty()) else {
            return 0;
        };

        let raw: u32 = match &self.body {
            QuestionBody::Keyed { items, lookup, matching } => items
                .iter()
                .enumerate()
                .filter(|(index, item)| {
                    item.matches(locate(answer, *index, item.key.as_deref(), *lookup), *matching)
                })
                .map(|(_, item)| item.marks)
                .sum(),
            QuestionBody::Paired { rows } => rows
                .iter()
                .enumerate()
                .map(|(index, row)| {
                    row.matched_columns(locate(answer, index, row.key.as_deref(), Lookup::KeyOrPosition))
                })
                .sum(),
            QuestionBody::Manual { .. } | QuestionBody::Unscored => 0,
        };

        raw.min(self.marks)
    }

    #[must_use]
    pub const fn requires_manual_marking(&self) -> bool {
        matches!(self.body, QuestionBody::Manual { .. })
    }

    /// Word count of a written answer against the question's band, for manual questions.
    #[must_use]
    pub fn word_count(&self, answer: Option<&Answer>) -> Option<WordCountCheck> {
        match &self.body {
            QuestionBody::Manual { band } => {
                Some(WordCountCheck::new(answer.map(Answer::text_content).as_deref().unwrap_or(""), *band))
            },
            _ => None,
        }
    }
}

impl KeyedItem {
    fn matches(&self, answer: Option<&Answer>, matching: Matching) -> bool {
        let (Some(expected), Some(given)) = (&self.expected, answer.and_then(Answer::as_scalar)) else {
            return false;
        };
        match matching {
            Matching::Exact => given.text() == expected.text(),
            Matching::Loose => eq_loose(&given.text(), &expected.text()),
        }
    }
}

impl PairedRow {
    fn matched_columns(&self, answer: Option<&Answer>) -> u32 {
        let Some(answer) = answer else {
            return 0;
        };
        let matched = self.columns.iter().filter(|(field, expected)| {
            match (expected, answer.get(field).and_then(Answer::as_scalar)) {
                (Some(expected), Some(given)) => given.text() == expected.text(),
                _ => false,
            }
        });
        matched.count() as u32
    }
}

fn locate<'a>(answer: &'a Answer, index: usize, key: Option<&str>, lookup: Lookup) -> Option<&'a Answer> {
    match lookup {
        Lookup::Position => answer.at(index),
        Lookup::Key => key.and_then(|key| answer.get(key)),
        Lookup::KeyOrPosition => key.and_then(|key| answer.get(key)).or_else(|| answer.at(index)),
    }
}

/// One entry of a `data` array, with every answer-key spelling the rows use.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawItem {
    id: Option<Scalar>,
    name: Option<String>,
    marks: Option<u32>,
    correct: Option<Scalar>,
    correct_answer: Option<Scalar>,
    correct_letter: Option<Scalar>,
    correct_student: Option<Scalar>,
    correct_sequence: Option<Scalar>,
    correct_completion: Option<Scalar>,
    correct_headline: Option<Scalar>,
    good: Option<Scalar>,
    needs_improvement: Option<Scalar>,
    correct_activity: Option<Scalar>,
    correct_time: Option<Scalar>,
}

impl RawItem {
    /// The type-specific key when present and not blank, else the generic `correct`.
    fn expected(&self, primary: Option<&Scalar>) -> Option<Scalar> {
        non_blank(primary).or_else(|| non_blank(self.correct.as_ref()))
    }

    fn id_text(&self) -> Option<String> {
        self.id.as_ref().filter(|id| !id.is_blank()).map(|id| id.text().into_owned())
    }
}

fn non_blank(value: Option<&Scalar>) -> Option<Scalar> {
    value.filter(|value| !value.is_blank()).cloned()
}

/// Entries of `data[field]`. A missing array yields `None`; unreadable entries become empty
/// items so positions stay aligned.
fn raw_items(data: &Value, field: &str) -> Option<Vec<RawItem>> {
    let Some(entries) = data.get(field).and_then(Value::as_array) else {
        warn!(field, "Question data has no item array");
        return None;
    };

    let items = entries
        .iter()
        .map(|entry| {
            RawItem::deserialize(entry).unwrap_or_else(|err| {
                warn!(field, error = %err, "Unreadable question item");
                RawItem::default()
            })
        })
        .collect();
    Some(items)
}
