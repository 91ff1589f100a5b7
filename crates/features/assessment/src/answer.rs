//! Student answers as they arrive from the client.
//!
//! Answers are free-form JSON: a single value, a list indexed by sub-question, or an object keyed
//! by sub-question id (or student name). Nested objects carry grid rows.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// A leaf answer value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Textual form used for every comparison; `1` and `"1"` compare equal.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Bool(value) => Cow::Owned(value.to_string()),
            Self::Int(value) => Cow::Owned(value.to_string()),
            Self::Float(value) => Cow::Owned(value.to_string()),
        }
    }

    /// Blank text never counts as an answer or as an answer key.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Any answer shape a question can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Empty,
    Scalar(Scalar),
    List(Vec<Answer>),
    Map(BTreeMap<String, Answer>),
}

impl Answer {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(value.into()))
    }

    /// Builds a list answer from text values.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Self::text).collect())
    }

    /// Builds an object answer from `(key, answer)` pairs.
    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Self)>,
        K: Into<String>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// `true` when nothing meaningful was answered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Scalar(scalar) => scalar.is_blank(),
            Self::List(items) => items.iter().all(Self::is_empty),
            Self::Map(entries) => entries.values().all(Self::is_empty),
        }
    }

    /// Sub-answer by position. Objects are indexed by the decimal key, as clients often
    /// send `{"0": "b", "1": "c"}` instead of a list.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Self> {
        match self {
            Self::List(items) => items.get(index),
            Self::Map(entries) => entries.get(&index.to_string()),
            Self::Empty | Self::Scalar(_) => None,
        }
    }

    /// Sub-answer by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// All text in the answer, in order, joined by spaces. Used for word counts.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<Cow<'a, str>>) {
        match self {
            Self::Empty => {},
            Self::Scalar(scalar) => parts.push(scalar.text()),
            Self::List(items) => items.iter().for_each(|item| item.collect_text(parts)),
            Self::Map(entries) => entries.values().for_each(|item| item.collect_text(parts)),
        }
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}
