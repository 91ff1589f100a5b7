use gems_derive::api_model;
use gems_domain::language::Language;
use strum_macros::{Display, EnumString};

#[api_model(rename_all = "kebab-case")]
#[derive(Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ComprehensionQuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Matching,
    GapFill,
}

impl ComprehensionQuestionType {
    /// Answered by picking an option, so only exact answers count.
    #[must_use]
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::MultipleChoice | Self::TrueFalse | Self::Matching)
    }
}

/// How demanding a passage is. Sits between the two exam tiers.
#[api_model(rename_all = "lowercase")]
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TaskDifficulty {
    #[default]
    Foundation,
    Intermediate,
    Higher,
}

/// One answer or several: used both for answer keys and for what a student wrote.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum AnswerText {
    One(String),
    Many(Vec<String>),
}

impl AnswerText {
    /// Non-blank entries, trimmed.
    #[must_use]
    pub fn entries(&self) -> Vec<&str> {
        match self {
            Self::One(text) => vec![text.trim()],
            Self::Many(items) => items.iter().map(|item| item.trim()).collect(),
        }
        .into_iter()
        .filter(|entry| !entry.is_empty())
        .collect()
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.entries().is_empty()
    }
}

impl From<&str> for AnswerText {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<Vec<&str>> for AnswerText {
    fn from(values: Vec<&str>) -> Self {
        Self::Many(values.into_iter().map(str::to_owned).collect())
    }
}

#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct ComprehensionQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: ComprehensionQuestionType,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: AnswerText,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A passage with its questions.
#[api_model(deny_unknown_fields = false)]
#[derive(Clone, PartialEq, Eq)]
pub struct ComprehensionTask {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub passage: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub difficulty: TaskDifficulty,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    /// Falls back to the configured default.
    #[serde(default)]
    pub time_limit_minutes: Option<u32>,
    /// Percentage needed to pass; falls back to the configured default.
    #[serde(default)]
    pub passing_score: Option<u8>,
    pub questions: Vec<ComprehensionQuestion>,
}

impl ComprehensionTask {
    #[must_use]
    pub fn max_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    #[must_use]
    pub fn question(&self, id: &str) -> Option<&ComprehensionQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }
}

const fn default_points() -> u32 {
    1
}
