//! Detective Listening: identify each piece of evidence heard on a foreign radio station.

use crate::error::GameError;
use crate::session::{Game, GameKind, GameStatus, game_over};
use crate::words::builtin_evidence;
use gems_derive::api_model;
use gems_domain::language::Language;
use gems_domain::vocabulary::VocabularyItem;
use gems_kernel::text::{fold_case, strip_diacritics};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::debug;

const DISTRACTORS: usize = 2;
/// Evidence in a case unless the request asks for another amount.
pub const DEFAULT_EVIDENCE: usize = 10;

#[api_model(rename_all = "lowercase")]
#[derive(Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum CaseType {
    Animals,
    Food,
    Family,
    School,
    Travel,
    Colors,
    Numbers,
}

/// Frequency of the station broadcasting in `language`, if there is one.
#[must_use]
pub const fn radio_frequency(language: Language) -> Option<&'static str> {
    match language {
        Language::Spanish => Some("101.5 FM"),
        Language::French => Some("102.3 FM"),
        Language::German => Some("103.7 FM"),
        Language::English | Language::Portuguese => None,
    }
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct Evidence {
    pub word: String,
    pub audio_url: Option<String>,
    /// The correct translation and its distractors, shuffled.
    pub options: Vec<String>,
    /// The student's choice, once answered.
    pub answer: Option<String>,
    pub is_correct: Option<bool>,
    #[serde(skip)]
    correct: String,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct DetectiveView {
    pub id: String,
    pub case_type: CaseType,
    pub language: Language,
    pub frequency: String,
    pub evidence: Vec<Evidence>,
    pub answered: usize,
    pub correct_answers: usize,
    /// `correct_answers / evidence`, as a rounded percentage.
    pub percentage: u32,
    pub status: GameStatus,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct EvidenceOutcome {
    pub is_correct: bool,
    pub correct_answer: String,
}

#[derive(Debug, Clone)]
pub struct DetectiveCase {
    id: String,
    case_type: CaseType,
    language: Language,
    evidence: Vec<Evidence>,
    status: GameStatus,
}

impl DetectiveCase {
    /// Builds a case of at most `count` random pieces of evidence from `vocabulary`, or from
    /// the built-in evidence when it is empty. Distractors come from the whole pool.
    ///
    /// # Errors
    /// [`GameError::InvalidSetup`] when `count` is zero, `language` has no radio station or
    /// fewer than three distinct translations are available.
    pub fn new(
        id: impl Into<String>,
        case_type: CaseType,
        language: Language,
        vocabulary: &[VocabularyItem],
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<Self, GameError> {
        if count == 0 {
            return Err(GameError::InvalidSetup {
                message: "a case needs at least one piece of evidence".into(),
                context: Some(case_type.to_string().into()),
            });
        }
        if radio_frequency(language).is_none() {
            return Err(GameError::InvalidSetup {
                message: format!("no radio station broadcasts in {language}").into(),
                context: Some(case_type.to_string().into()),
            });
        }

        let items = if vocabulary.is_empty() { builtin_items(language, case_type) } else { vocabulary.to_vec() };
        let mut items: Vec<VocabularyItem> =
            items.into_iter().filter(|item| !item.term.trim().is_empty() && !item.translation.trim().is_empty()).collect();

        let mut translations: Vec<String> = items.iter().map(|item| item.translation.trim().to_owned()).collect();
        translations.sort_unstable();
        translations.dedup();
        if translations.len() <= DISTRACTORS {
            return Err(GameError::InvalidSetup {
                message: format!("a case needs at least {} distinct translations", DISTRACTORS + 1).into(),
                context: Some(case_type.to_string().into()),
            });
        }

        items.shuffle(rng);
        let evidence = items
            .iter()
            .take(count)
            .map(|item| {
                let correct = item.translation.trim();
                let others: Vec<&str> = translations.iter().map(String::as_str).filter(|t| *t != correct).collect();
                let mut options: Vec<String> = std::iter::once(correct)
                    .chain(others.choose_multiple(rng, DISTRACTORS).copied())
                    .map(str::to_owned)
                    .collect();
                options.shuffle(rng);
                Evidence {
                    word: item.term.trim().to_owned(),
                    audio_url: item.audio_url.clone(),
                    options,
                    answer: None,
                    is_correct: None,
                    correct: correct.to_owned(),
                }
            })
            .collect();

        Ok(Self { id: id.into(), case_type, language, evidence, status: GameStatus::Playing })
    }

    /// Records the answer for the evidence at `index`. The case is solved once every piece
    /// has been answered.
    ///
    /// # Errors
    /// * [`GameError::GameOver`] once solved.
    /// * [`GameError::InvalidGuess`] for an unknown index or evidence already answered.
    pub fn answer(&mut self, index: usize, answer: &str) -> Result<EvidenceOutcome, GameError> {
        if self.status.is_over() {
            return Err(game_over(&self.id, self.status));
        }
        let evidence = self.evidence.get_mut(index).ok_or_else(|| GameError::InvalidGuess {
            message: format!("no evidence #{index}").into(),
            context: Some(self.id.clone().into()),
        })?;
        if evidence.answer.is_some() {
            return Err(GameError::InvalidGuess {
                message: format!("evidence #{index} already answered").into(),
                context: Some(self.id.clone().into()),
            });
        }

        let is_correct = fold_case(answer) == fold_case(&evidence.correct);
        evidence.answer = Some(answer.trim().to_owned());
        evidence.is_correct = Some(is_correct);
        let outcome = EvidenceOutcome { is_correct, correct_answer: evidence.correct.clone() };

        if self.evidence.iter().all(|e| e.answer.is_some()) {
            self.status = GameStatus::Won;
            debug!(game = %self.id, correct = self.correct_answers(), total = self.evidence.len(), "Case solved");
        }
        Ok(outcome)
    }

    #[must_use]
    pub fn correct_answers(&self) -> usize {
        self.evidence.iter().filter(|e| e.is_correct == Some(true)).count()
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.evidence.is_empty() {
            return 0;
        }
        (self.correct_answers() as f64 / self.evidence.len() as f64 * 100.0).round() as u32
    }

    #[must_use]
    pub fn view(&self) -> DetectiveView {
        DetectiveView {
            id: self.id.clone(),
            case_type: self.case_type,
            language: self.language,
            frequency: radio_frequency(self.language).unwrap_or_default().to_owned(),
            evidence: self.evidence.clone(),
            answered: self.evidence.iter().filter(|e| e.answer.is_some()).count(),
            correct_answers: self.correct_answers(),
            percentage: self.percentage(),
            status: self.status,
        }
    }
}

fn builtin_items(language: Language, case_type: CaseType) -> Vec<VocabularyItem> {
    builtin_evidence(language, case_type.as_ref())
        .iter()
        .map(|(term, translation)| VocabularyItem {
            audio_url: Some(format!("{}_{}_{}.mp3", language.code(), case_type, audio_stem(term))),
            language,
            ..VocabularyItem::new(*term, *translation)
        })
        .collect()
}

/// `Großvater` is `grossvater`, `grand-père` is `grandpere`.
fn audio_stem(term: &str) -> String {
    strip_diacritics(&term.to_lowercase())
        .replace('ß', "ss")
        .replace('œ', "oe")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

impl Game for DetectiveCase {
    const KIND: GameKind = GameKind::Detective;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of pieces of evidence identified correctly.
    fn score(&self) -> u32 {
        self.correct_answers() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn builtin_colors_case() {
        let mut rng = StdRng::seed_from_u64(3);
        let case =
            DetectiveCase::new("d1", CaseType::Colors, Language::German, &[], DEFAULT_EVIDENCE, &mut rng).unwrap();
        let view = case.view();
        assert_eq!(view.frequency, "103.7 FM");
        assert_eq!(view.evidence.len(), 10);
        let white = view.evidence.iter().find(|e| e.word == "weiß").unwrap();
        assert_eq!(white.audio_url.as_deref(), Some("de_colors_weiss.mp3"));
        assert!(white.options.iter().any(|o| o == "white"));
        for evidence in &case.evidence {
            assert_eq!(evidence.options.len(), 3);
            assert!(evidence.options.contains(&evidence.correct));
        }
    }

    #[test]
    fn builtin_audio_names_are_lowercase_ascii() {
        let mut rng = StdRng::seed_from_u64(5);
        let case = DetectiveCase::new("d2", CaseType::Family, Language::German, &[], 10, &mut rng).unwrap();
        let audio: Vec<&str> = case.evidence.iter().filter_map(|e| e.audio_url.as_deref()).collect();
        assert_eq!(audio.len(), 10);
        assert!(audio.contains(&"de_family_grossvater.mp3"));
        assert!(audio.contains(&"de_family_vater.mp3"));

        assert_eq!(audio_stem("grand-père"), "grandpere");
        assert_eq!(audio_stem("sœur"), "soeur");
        assert_eq!(audio_stem("Löwe"), "lowe");
    }

    #[test]
    fn large_pools_are_sampled_down_to_count() {
        let mut rng = StdRng::seed_from_u64(9);
        let vocabulary: Vec<VocabularyItem> =
            (0..200).map(|n| VocabularyItem::new(format!("palabra{n}"), format!("word {n}"))).collect();

        let case = DetectiveCase::new("d3", CaseType::School, Language::Spanish, &vocabulary, DEFAULT_EVIDENCE, &mut rng)
            .unwrap();
        assert_eq!(case.evidence.len(), DEFAULT_EVIDENCE);
        let mut words: Vec<&str> = case.evidence.iter().map(|e| e.word.as_str()).collect();
        words.sort_unstable();
        words.dedup();
        assert_eq!(words.len(), DEFAULT_EVIDENCE);

        let case = DetectiveCase::new("d4", CaseType::School, Language::Spanish, &vocabulary, 4, &mut rng).unwrap();
        assert_eq!(case.evidence.len(), 4);

        let animals = DetectiveCase::new("d5", CaseType::Animals, Language::Spanish, &[], 50, &mut rng).unwrap();
        assert_eq!(animals.evidence.len(), 15);
    }

    #[test]
    fn unsupported_setups() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(DetectiveCase::new("d", CaseType::Colors, Language::English, &[], 10, &mut rng).is_err());
        assert!(DetectiveCase::new("d", CaseType::School, Language::Spanish, &[], 10, &mut rng).is_err());
        assert!(DetectiveCase::new("d", CaseType::Colors, Language::Spanish, &[], 0, &mut rng).is_err());
        let two = [VocabularyItem::new("uno", "one"), VocabularyItem::new("dos", "two")];
        assert!(DetectiveCase::new("d", CaseType::Numbers, Language::Spanish, &two, 10, &mut rng).is_err());
    }
}
