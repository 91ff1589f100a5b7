//! Exam-board vocabulary: languages, tiers, skills and difficulty levels.

use gems_derive::api_model;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A taught (or source) language.
#[api_model(rename_all = "lowercase")]
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[default]
    #[serde(alias = "en")]
    #[strum(to_string = "english", serialize = "en")]
    English,
    #[serde(alias = "es")]
    #[strum(to_string = "spanish", serialize = "es")]
    Spanish,
    #[serde(alias = "fr")]
    #[strum(to_string = "french", serialize = "fr")]
    French,
    #[serde(alias = "de")]
    #[strum(to_string = "german", serialize = "de")]
    German,
    #[serde(alias = "pt")]
    #[strum(to_string = "portuguese", serialize = "pt")]
    Portuguese,
}

impl Language {
    /// Two-letter ISO 639-1 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
            Self::Portuguese => "pt",
        }
    }

    /// Extra keys shown on on-screen keyboards, beyond `a-z`.
    #[must_use]
    pub const fn accented_letters(self) -> &'static [char] {
        match self {
            Self::English => &[],
            Self::Spanish => &['á', 'é', 'í', 'ó', 'ú', 'ñ'],
            Self::French => &['é', 'è', 'ê', 'à', 'ç'],
            Self::German => &['ä', 'ö', 'ü', 'ß'],
            Self::Portuguese => &['á', 'é', 'í', 'ó', 'ú', 'ã', 'ç'],
        }
    }
}

/// GCSE paper tier.
#[api_model(rename_all = "lowercase")]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tier {
    #[default]
    Foundation,
    Higher,
}

/// The skill an assessment paper examines.
#[api_model(rename_all = "lowercase")]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Skill {
    Reading,
    Listening,
    Writing,
}

/// Learner level used by games and comprehension tasks.
#[api_model(rename_all = "lowercase")]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}
