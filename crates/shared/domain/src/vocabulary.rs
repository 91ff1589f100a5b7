//! Teacher-curated vocabulary, the word source for games and reviews.

use crate::language::{Difficulty, Language};
use gems_derive::api_model;

#[api_model(deny_unknown_fields = false)]
#[derive(Clone, Default, PartialEq, Eq)]
pub struct VocabularyItem {
    #[serde(default)]
    pub id: String,
    /// The word or phrase in the taught language.
    #[serde(alias = "word")]
    pub term: String,
    /// English meaning.
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, alias = "audio")]
    pub audio_url: Option<String>,
}

impl VocabularyItem {
    #[must_use]
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self { term: term.into(), translation: translation.into(), ..Self::default() }
    }

    /// A term without spaces, hyphens or digits.
    #[must_use]
    pub fn is_single_word(&self) -> bool {
        let term = self.term.trim();
        !term.is_empty() && term.chars().all(char::is_alphabetic)
    }
}

#[api_model(deny_unknown_fields = false)]
#[derive(Clone, Default, PartialEq, Eq)]
pub struct VocabularyList {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub items: Vec<VocabularyItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_words() {
        assert!(VocabularyItem::new("pájaro", "bird").is_single_word());
        assert!(!VocabularyItem::new("el perro", "the dog").is_single_word());
        assert!(!VocabularyItem::new("arc-en-ciel", "rainbow").is_single_word());
        assert!(!VocabularyItem::new("  ", "").is_single_word());
    }

    #[test]
    fn stored_rows_use_word_and_audio() {
        let item: VocabularyItem = serde_json::from_value(serde_json::json!({
            "id": "v1", "word": "gato", "translation": "cat", "language": "es", "audio": "es_gato.mp3"
        }))
        .unwrap();
        assert_eq!(item.term, "gato");
        assert_eq!(item.language, Language::Spanish);
        assert_eq!(item.audio_url.as_deref(), Some("es_gato.mp3"));
    }
}
