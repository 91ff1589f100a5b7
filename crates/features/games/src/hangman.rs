//! Hangman: guess the word a letter at a time before six mistakes.

use crate::error::GameError;
use crate::session::{Game, GameKind, GameStatus, game_over};
use chrono::{DateTime, Utc};
use gems_derive::api_model;
use gems_domain::language::{Difficulty, Language};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

pub const MAX_WRONG_GUESSES: u8 = 6;
pub const MAX_HINTS: u8 = 3;
const MIN_SCORE: i64 = 50;

/// Shown without being guessed: spaces, hyphens, apostrophes, digits and any other non-letter.
fn is_revealed_char(c: char) -> bool {
    !c.is_alphabetic()
}

#[api_model]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Hit,
    Miss,
    /// The letter was guessed before; nothing changed.
    Repeated,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct HangmanView {
    pub id: String,
    pub language: Language,
    pub difficulty: Difficulty,
    /// The word with `_` for every hidden letter.
    pub masked_word: String,
    pub guessed_letters: Vec<String>,
    pub wrong_guesses: u8,
    pub max_wrong_guesses: u8,
    pub hints_remaining: u8,
    /// On-screen keyboard keys beyond `a-z`.
    pub extra_letters: Vec<String>,
    pub status: GameStatus,
    pub score: u32,
    /// Revealed once the game is over.
    pub word: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Hangman {
    id: String,
    word: String,
    language: Language,
    difficulty: Difficulty,
    guessed: Vec<char>,
    wrong_guesses: u8,
    hints_used: u8,
    status: GameStatus,
    started_at: DateTime<Utc>,
    score: u32,
}

impl Hangman {
    /// # Errors
    /// [`GameError::InvalidSetup`] when the word has no letters to guess.
    pub fn new(
        id: impl Into<String>,
        word: &str,
        language: Language,
        difficulty: Difficulty,
        now: DateTime<Utc>,
    ) -> Result<Self, GameError> {
        let word = word.trim().to_lowercase();
        if word.chars().all(is_revealed_char) {
            return Err(GameError::InvalidSetup { message: "hangman word has no letters".into(), context: None });
        }

        Ok(Self {
            id: id.into(),
            word,
            language,
            difficulty,
            guessed: Vec::new(),
            wrong_guesses: 0,
            hints_used: 0,
            status: GameStatus::Playing,
            started_at: now,
            score: 0,
        })
    }

    /// Guess one letter, case-insensitively.
    ///
    /// # Errors
    /// * [`GameError::GameOver`] once won or lost.
    /// * [`GameError::InvalidGuess`] when `letter` is not a letter.
    pub fn guess(&mut self, letter: char, now: DateTime<Utc>) -> Result<GuessOutcome, GameError> {
        if self.status.is_over() {
            return Err(game_over(&self.id, self.status));
        }
        if !letter.is_alphabetic() {
            return Err(GameError::InvalidGuess {
                message: format!("'{letter}' is not a letter").into(),
                context: Some(self.id.clone().into()),
            });
        }

        let letter = letter.to_lowercase().next().unwrap_or(letter);
        if self.guessed.contains(&letter) {
            return Ok(GuessOutcome::Repeated);
        }
        self.guessed.push(letter);

        let outcome = if self.word.contains(letter) {
            GuessOutcome::Hit
        } else {
            self.wrong_guesses += 1;
            GuessOutcome::Miss
        };
        self.settle(now);
        Ok(outcome)
    }

    /// Reveals a random hidden letter. The hint counts as a (correct) guess.
    ///
    /// # Errors
    /// * [`GameError::GameOver`] once won or lost.
    /// * [`GameError::NoHintsLeft`] after three hints.
    pub fn hint(&mut self, rng: &mut impl Rng, now: DateTime<Utc>) -> Result<char, GameError> {
        if self.status.is_over() {
            return Err(game_over(&self.id, self.status));
        }
        if self.hints_used >= MAX_HINTS {
            return Err(GameError::NoHintsLeft {
                message: format!("all {MAX_HINTS} hints used").into(),
                context: Some(self.id.clone().into()),
            });
        }

        let hidden: Vec<char> = self.letters().filter(|c| !self.guessed.contains(c)).collect();
        let letter = *hidden.choose(rng).ok_or_else(|| GameError::from("playing hangman has no hidden letters"))?;
        self.guess(letter, now)?;
        self.hints_used += 1;
        debug!(game = %self.id, hints_used = self.hints_used, "Hangman hint used");
        Ok(letter)
    }

    #[must_use]
    pub fn masked_word(&self) -> String {
        self.word
            .chars()
            .map(|c| if is_revealed_char(c) || self.guessed.contains(&c) { c } else { '_' })
            .collect()
    }

    #[must_use]
    pub const fn wrong_guesses(&self) -> u8 {
        self.wrong_guesses
    }

    #[must_use]
    pub fn view(&self) -> HangmanView {
        HangmanView {
            id: self.id.clone(),
            language: self.language,
            difficulty: self.difficulty,
            masked_word: self.masked_word(),
            guessed_letters: self.guessed.iter().map(char::to_string).collect(),
            wrong_guesses: self.wrong_guesses,
            max_wrong_guesses: MAX_WRONG_GUESSES,
            hints_remaining: MAX_HINTS - self.hints_used,
            extra_letters: self.language.accented_letters().iter().map(char::to_string).collect(),
            status: self.status,
            score: self.score,
            word: self.status.is_over().then(|| self.word.clone()),
        }
    }

    /// Letters that must be guessed to win, duplicates included.
    fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.word.chars().filter(|c| !is_revealed_char(*c))
    }

    fn settle(&mut self, now: DateTime<Utc>) {
        if self.letters().all(|c| self.guessed.contains(&c)) {
            self.status = GameStatus::Won;
            self.score = score(self.difficulty, self.wrong_guesses, (now - self.started_at).num_seconds());
        } else if self.wrong_guesses >= MAX_WRONG_GUESSES {
            self.status = GameStatus::Lost;
        } else {
            return;
        }
        debug!(game = %self.id, status = %self.status, score = self.score, "Hangman finished");
    }
}

/// `max(base - 10 per mistake - 1 per 10 seconds, 50)`, base 100 to 400 by difficulty.
#[must_use]
pub fn score(difficulty: Difficulty, wrong_guesses: u8, elapsed_seconds: i64) -> u32 {
    let base = match difficulty {
        Difficulty::Beginner => 100,
        Difficulty::Intermediate => 200,
        Difficulty::Advanced => 300,
        Difficulty::Expert => 400,
    };
    let penalty = i64::from(wrong_guesses) * 10 + elapsed_seconds.max(0) / 10;
    (base - penalty).max(MIN_SCORE) as u32
}

impl Game for Hangman {
    const KIND: GameKind = GameKind::Hangman;

    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn game(word: &str) -> Hangman {
        Hangman::new("h1", word, Language::Spanish, Difficulty::Intermediate, Utc::now()).unwrap()
    }

    #[test]
    fn spaces_and_hyphens_are_shown() {
        let hangman = game("Arc-en Ciel");
        assert_eq!(hangman.masked_word(), "___-__ ____");
    }

    #[test]
    fn punctuation_and_digits_are_shown() {
        let start = Utc::now();
        let mut hangman = game("L'eau");
        assert_eq!(hangman.masked_word(), "_'___");
        for letter in ['l', 'e', 'a', 'u'] {
            hangman.guess(letter, start).unwrap();
        }
        assert_eq!(hangman.view().status, GameStatus::Won);

        assert_eq!(game("¿qué?").masked_word(), "¿___?");
        assert_eq!(game("4x4").masked_word(), "4_4");
        assert!(Hangman::new("h", "1-2 3", Language::Spanish, Difficulty::Beginner, start).is_err());
    }

    #[test]
    fn hints_are_spent_only_when_a_letter_is_revealed() {
        let mut rng = StdRng::seed_from_u64(1);
        let now = Utc::now();
        let mut hangman = game("d'où");
        assert_eq!(hangman.masked_word(), "_'__");
        for _ in 0..3 {
            let letter = hangman.hint(&mut rng, now).unwrap();
            assert!("doù".contains(letter));
        }
        assert_eq!(hangman.view().status, GameStatus::Won);
        assert!(matches!(hangman.hint(&mut rng, now), Err(GameError::GameOver { .. })));
        assert_eq!(hangman.view().hints_remaining, 0);
    }

    #[test]
    fn repeated_guess_is_a_no_op() {
        let mut hangman = game("gato");
        let now = Utc::now();
        assert_eq!(hangman.guess('x', now).unwrap(), GuessOutcome::Miss);
        assert_eq!(hangman.guess('X', now).unwrap(), GuessOutcome::Repeated);
        assert_eq!(hangman.wrong_guesses(), 1);
        assert!(hangman.guess('3', now).is_err());
    }

    #[test]
    fn score_formula() {
        assert_eq!(score(Difficulty::Beginner, 0, 0), 100);
        assert_eq!(score(Difficulty::Expert, 2, 95), 371);
        assert_eq!(score(Difficulty::Beginner, 5, 600), 50);
    }

    #[test]
    fn hints_reveal_hidden_letters_until_exhausted() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut hangman = game("murciélago");
        let now = Utc::now();
        for _ in 0..MAX_HINTS {
            let letter = hangman.hint(&mut rng, now).unwrap();
            assert!("murciélago".contains(letter));
        }
        assert_eq!(hangman.wrong_guesses(), 0);
        assert!(matches!(hangman.hint(&mut rng, now), Err(GameError::NoHintsLeft { .. })));
        assert_eq!(hangman.view().hints_remaining, 0);
    }

    #[test]
    fn winning_scores_by_time_and_mistakes() {
        let start = Utc::now();
        let mut hangman = Hangman::new("h2", "sol", Language::Spanish, Difficulty::Advanced, start).unwrap();
        hangman.guess('z', start).unwrap();
        hangman.guess('s', start).unwrap();
        hangman.guess('o', start).unwrap();
        hangman.guess('l', start + TimeDelta::seconds(42)).unwrap();

        let view = hangman.view();
        assert_eq!(view.status, GameStatus::Won);
        assert_eq!(view.score, 300 - 10 - 4);
        assert_eq!(view.word.as_deref(), Some("sol"));
        assert!(matches!(hangman.guess('a', start), Err(GameError::GameOver { .. })));
    }
}
