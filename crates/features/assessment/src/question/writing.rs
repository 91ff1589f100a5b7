use super::{QuestionBody, QuestionType};
use gems_derive::api_model;
use gems_kernel::text::word_count;
use serde_json::Value;

/// Inclusive range of words a written response should contain.
#[api_model]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WordCountBand {
    pub min: u32,
    pub max: u32,
}

impl WordCountBand {
    pub const SHORT_MESSAGE: Self = Self { min: 40, max: 60 };
    pub const ARTICLE: Self = Self { min: 70, max: 110 };

    #[must_use]
    pub const fn contains(self, words: u32) -> bool {
        words >= self.min && words <= self.max
    }
}

/// Word count of a written response compared with its band.
#[api_model]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WordCountCheck {
    pub words: u32,
    pub band: Option<WordCountBand>,
    /// `true` when there is no band to miss.
    pub within_band: bool,
}

impl WordCountCheck {
    #[must_use]
    pub fn new(text: &str, band: Option<WordCountBand>) -> Self {
        let words = word_count(text) as u32;
        Self { words, band, within_band: band.is_none_or(|band| band.contains(words)) }
    }
}

/// Writing is always marked by a teacher.
pub(super) fn parse(kind: QuestionType, data: &Value) -> Option<QuestionBody> {
    let default_band = match kind {
        QuestionType::ShortMessage => Some(WordCountBand::SHORT_MESSAGE),
        QuestionType::ExtendedWriting => Some(WordCountBand::ARTICLE),
        QuestionType::PhotoDescription | QuestionType::GapFill | QuestionType::Translation => None,
        _ => return None,
    };
    Some(QuestionBody::Manual { band: band_from_data(data).or(default_band) })
}

/// `minWords`/`maxWords`, or a single `wordCount` / `wordCountRequirement` used as the minimum.
fn band_from_data(data: &Value) -> Option<WordCountBand> {
    let number = |key: &str| data.get(key).and_then(Value::as_u64).map(|n| n as u32);

    match (number("minWords"), number("maxWords")) {
        (Some(min), Some(max)) if min <= max => return Some(WordCountBand { min, max }),
        _ => {},
    }
    number("wordCountRequirement")
        .or_else(|| number("wordCount"))
        .map(|min| WordCountBand { min, max: u32::MAX })
}
