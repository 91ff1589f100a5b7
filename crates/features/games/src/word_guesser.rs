//! Word Guesser: a Wordle-style game over vocabulary words.
//!
//! Each guess is marked in two passes so that repeated letters are not over-counted: exact
//! positions first, each consuming one occurrence of its letter, then letters present
//! elsewhere while occurrences remain.

use crate::error::GameError;
use crate::session::{Game, GameKind, GameStatus, game_over};
use gems_derive::api_model;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_MAX_ATTEMPTS: u8 = 6;
pub const MAX_HINTS: u8 = 2;
const BASE_SCORE: u64 = 1000;
const MIN_SCORE: u64 = 100;

/// Ordered so that a key's state only ever moves up.
#[api_model]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LetterState {
    Absent,
    Present,
    Correct,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct LetterResult {
    pub letter: String,
    pub state: LetterState,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct Hint {
    /// 0-based position in the word.
    pub position: usize,
    pub letter: String,
}

#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct WordGuesserView {
    pub id: String,
    pub word_length: usize,
    pub max_attempts: u8,
    pub rows: Vec<Vec<LetterResult>>,
    /// Best state seen for each guessed letter.
    pub keyboard: BTreeMap<String, LetterState>,
    pub hints: Vec<Hint>,
    pub hints_remaining: u8,
    pub status: GameStatus,
    pub score: u32,
    /// Revealed once the game is over.
    pub word: Option<String>,
}

#[derive(Debug, Clone)]
pub struct WordGuesser {
    id: String,
    target: Vec<char>,
    max_attempts: u8,
    rows: Vec<Vec<(char, LetterState)>>,
    keyboard: BTreeMap<char, LetterState>,
    /// Revealed `(position, letter)` pairs.
    hints: Vec<(usize, char)>,
    status: GameStatus,
    score: u32,
}

/// Single-char uppercase; letters whose uppercase is longer (`ß`) stay as they are.
fn upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn normalize(word: &str) -> Vec<char> {
    word.trim().chars().map(upper).collect()
}

impl WordGuesser {
    /// # Errors
    /// [`GameError::InvalidSetup`] when the word is empty or not made of letters only, or when
    /// no attempts are allowed.
    pub fn new(id: impl Into<String>, word: &str, max_attempts: u8) -> Result<Self, GameError> {
        let target = normalize(word);
        if target.is_empty() || !target.iter().all(|c| c.is_alphabetic()) {
            return Err(GameError::InvalidSetup {
                message: format!("'{word}' is not a single word").into(),
                context: None,
            });
        }
        if max_attempts == 0 {
            return Err(GameError::InvalidSetup { message: "max attempts must be positive".into(), context: None });
        }

        Ok(Self {
            id: id.into(),
            target,
            max_attempts,
            rows: Vec::new(),
            keyboard: BTreeMap::new(),
            hints: Vec::new(),
            status: GameStatus::Playing,
            score: 0,
        })
    }

    /// # Errors
    /// * [`GameError::GameOver`] once won or lost.
    /// * [`GameError::InvalidGuess`] for a guess of the wrong length or with non-letters.
    pub fn guess(&mut self, guess: &str) -> Result<Vec<LetterResult>, GameError> {
        if self.status.is_over() {
            return Err(game_over(&self.id, self.status));
        }
        let guess = normalize(guess);
        if guess.len() != self.target.len() || !guess.iter().all(|c| c.is_alphabetic()) {
            return Err(GameError::InvalidGuess {
                message: format!("guess must be {} letters", self.target.len()).into(),
                context: Some(self.id.clone().into()),
            });
        }

        let row = evaluate(&self.target, &guess);
        for &(letter, state) in &row {
            let key = self.keyboard.entry(letter).or_insert(state);
            *key = (*key).max(state);
        }
        let marked = results(&row);
        self.rows.push(row);

        if guess == self.target {
            self.status = GameStatus::Won;
            self.score = score(self.rows.len(), self.hints.len());
        } else if self.rows.len() >= usize::from(self.max_attempts) {
            self.status = GameStatus::Lost;
        }
        if self.status.is_over() {
            debug!(game = %self.id, status = %self.status, attempts = self.rows.len(), "Word guesser finished");
        }

        Ok(marked)
    }

    /// Reveals the letter at a random position not yet found or hinted.
    ///
    /// # Errors
    /// * [`GameError::GameOver`] once won or lost.
    /// * [`GameError::NoHintsLeft`] after two hints, or when every position is already known.
    pub fn hint(&mut self, rng: &mut impl Rng) -> Result<Hint, GameError> {
        if self.status.is_over() {
            return Err(game_over(&self.id, self.status));
        }
        if self.hints.len() >= usize::from(MAX_HINTS) {
            return Err(GameError::NoHintsLeft {
                message: format!("all {MAX_HINTS} hints used").into(),
                context: Some(self.id.clone().into()),
            });
        }

        let hidden: Vec<usize> = (0..self.target.len())
            .filter(|&position| !self.rows.iter().any(|row| row[position].1 == LetterState::Correct))
            .filter(|&position| !self.hints.iter().any(|&(hinted, _)| hinted == position))
            .collect();
        let position = *hidden.choose(rng).ok_or_else(|| GameError::NoHintsLeft {
            message: "every letter is already revealed".into(),
            context: Some(self.id.clone().into()),
        })?;

        let letter = self.target[position];
        self.hints.push((position, letter));
        debug!(game = %self.id, position, "Word guesser hint used");
        Ok(Hint { position, letter: letter.to_string() })
    }

    #[must_use]
    pub fn view(&self) -> WordGuesserView {
        WordGuesserView {
            id: self.id.clone(),
            word_length: self.target.len(),
            max_attempts: self.max_attempts,
            rows: self.rows.iter().map(|row| results(row)).collect(),
            keyboard: self.keyboard.iter().map(|(letter, state)| (letter.to_string(), *state)).collect(),
            hints: self
                .hints
                .iter()
                .map(|&(position, letter)| Hint { position, letter: letter.to_string() })
                .collect(),
            hints_remaining: MAX_HINTS.saturating_sub(self.hints.len() as u8),
            status: self.status,
            score: self.score,
            word: self.status.is_over().then(|| self.target.iter().collect()),
        }
    }
}

/// Marks `guess` against `target`; both must have the same length.
#[must_use]
pub fn evaluate(target: &[char], guess: &[char]) -> Vec<(char, LetterState)> {
    let mut remaining: BTreeMap<char, usize> = BTreeMap::new();
    for &letter in target {
        *remaining.entry(letter).or_default() += 1;
    }

    let mut row: Vec<(char, LetterState)> = guess.iter().map(|&letter| (letter, LetterState::Absent)).collect();
    for (position, entry) in row.iter_mut().enumerate() {
        if target.get(position) == Some(&entry.0) {
            entry.1 = LetterState::Correct;
            if let Some(count) = remaining.get_mut(&entry.0) {
                *count -= 1;
            }
        }
    }
    for entry in &mut row {
        if entry.1 == LetterState::Correct {
            continue;
        }
        if let Some(count) = remaining.get_mut(&entry.0).filter(|count| **count > 0) {
            entry.1 = LetterState::Present;
            *count -= 1;
        }
    }
    row
}

/// `max(1000 - 100 per extra attempt - 200 per hint, 100)`.
#[must_use]
pub fn score(attempts: usize, hints: usize) -> u32 {
    let penalty = 100 * attempts.saturating_sub(1) as u64 + 200 * hints as u64;
    BASE_SCORE.saturating_sub(penalty).max(MIN_SCORE) as u32
}

fn results(row: &[(char, LetterState)]) -> Vec<LetterResult> {
    row.iter().map(|&(letter, state)| LetterResult { letter: letter.to_string(), state }).collect()
}

impl Game for WordGuesser {
    const KIND: GameKind = GameKind::WordGuesser;

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
