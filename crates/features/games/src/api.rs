use crate::Games;
use crate::detective::{CaseType, DEFAULT_EVIDENCE, DetectiveCase, DetectiveView, EvidenceOutcome};
use crate::error::GameError;
use crate::hangman::{GuessOutcome, Hangman, HangmanView};
use crate::word_guesser::{Hint, WordGuesser, WordGuesserView};
use crate::words::WordSource;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use gems_derive::{api_handler, api_model};
use gems_domain::constants::GAMES_TAG;
use gems_domain::language::{Difficulty, Language};
use gems_domain::vocabulary::VocabularyItem;
use gems_kernel::ids::verify_session_id;
use gems_kernel::safe_nanoid;
use gems_kernel::server::{ApiError, ApiResult, ApiState, ErrorBody};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        let message = err.to_string();
        match err {
            GameError::InvalidSetup { .. } | GameError::InvalidGuess { .. } => Self::bad_request(message),
            GameError::GameNotFound { .. } => Self::not_found(message),
            GameError::GameOver { .. } | GameError::NoHintsLeft { .. } => Self::conflict(message),
            GameError::Config { .. } | GameError::Event { .. } | GameError::Internal { .. } => Self::from(message),
        }
    }
}

/// Settings shared by the word games.
#[api_model]
#[derive(Default)]
pub struct NewWordGameRequest {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub category: Option<String>,
    /// Words to pick from before the vocabulary.
    #[serde(default)]
    pub custom_words: Vec<String>,
    #[serde(default)]
    pub vocabulary: Vec<VocabularyItem>,
    /// Word Guesser only; defaults to the configured limit.
    #[serde(default)]
    pub max_attempts: Option<u8>,
}

impl NewWordGameRequest {
    fn source(&self) -> WordSource<'_> {
        WordSource {
            custom_words: &self.custom_words,
            vocabulary: &self.vocabulary,
            language: self.language,
            category: self.category.as_deref(),
            difficulty: self.difficulty,
        }
    }
}

#[api_model]
pub struct LetterGuessRequest {
    pub letter: String,
}

#[api_model]
pub struct HangmanGuessResponse {
    pub outcome: GuessOutcome,
    pub game: HangmanView,
}

#[api_model]
pub struct HangmanHintResponse {
    pub letter: String,
    pub game: HangmanView,
}

#[api_model]
pub struct WordGuessRequest {
    pub word: String,
}

#[api_model]
pub struct WordHintResponse {
    pub hint: Hint,
    pub game: WordGuesserView,
}

#[api_model]
pub struct NewCaseRequest {
    pub case_type: CaseType,
    pub language: Language,
    /// Evidence source; the built-in words for the case are used when empty.
    #[serde(default)]
    pub vocabulary: Vec<VocabularyItem>,
    /// Pieces of evidence to draw; defaults to 10.
    #[serde(default)]
    pub count: Option<usize>,
}

#[api_model]
pub struct EvidenceAnswerRequest {
    /// 0-based evidence index.
    pub evidence: usize,
    pub answer: String,
}

#[api_model]
pub struct EvidenceAnswerResponse {
    pub outcome: EvidenceOutcome,
    pub game: DetectiveView,
}

fn single_letter(letter: &str) -> Result<char, GameError> {
    let mut chars = letter.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(GameError::InvalidGuess { message: "guess exactly one letter".into(), context: None }),
    }
}

// --- Hangman ---

#[api_handler(
    post,
    path = "/games/hangman",
    request_body = NewWordGameRequest,
    responses(
        (status = CREATED, description = "Game started", body = HangmanView),
        (status = BAD_REQUEST, body = ErrorBody),
    ),
    tag = GAMES_TAG,
)]
pub async fn new_hangman(
    State(state): State<ApiState>,
    Json(request): Json<NewWordGameRequest>,
) -> ApiResult<(StatusCode, Json<HangmanView>)> {
    let slice = state.try_get_slice::<Games>()?;
    let word = request.source().pick_phrase(&mut rand::rng());
    let game = Hangman::new(safe_nanoid!(), &word, request.language, request.difficulty, Utc::now())?;
    Ok((StatusCode::CREATED, Json(slice.hangman.insert(game, Hangman::view))))
}

#[api_handler(
    get,
    path = "/games/hangman/{id}",
    params(("id" = String, Path, description = "Game id")),
    responses(
        (status = OK, description = "Game state", body = HangmanView),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    tag = GAMES_TAG,
)]
pub async fn get_hangman(State(state): State<ApiState>, Path(id): Path<String>) -> ApiResult<Json<HangmanView>> {
    let slice = state.try_get_slice::<Games>()?;
    let id = verify_session_id(&id)?;
    Ok(Json(slice.hangman.with_game(id, |game| Ok(game.view()))?))
}

#[api_handler(
    post,
    path = "/games/hangman/{id}/guess",
    params(("id" = String, Path, description = "Game id")),
    request_body = LetterGuessRequest,
    responses(
        (status = OK, description = "Guess applied", body = HangmanGuessResponse),
        (status = BAD_REQUEST, body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
        (status = CONFLICT, body = ErrorBody),
    ),
    tag = GAMES_TAG,
)]
pub async fn guess_letter(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<LetterGuessRequest>,
) -> ApiResult<Json<HangmanGuessResponse>> {
    let slice = state.try_get_slice::<Games>()?;
    let id = verify_session_id(&id)?;
    let letter = single_letter(&request.letter)?;
    let response = slice.hangman.with_game(id, |game| {
        let outcome = game.guess(letter, Utc::now())?;
        Ok(HangmanGuessResponse { outcome, game: game.view() })
    })?;
    Ok(Json(response))
}

#[api_handler(
    post,
    path = "/games/hangman/{id}/hint",
    params(("id" = String, Path, description = "Game id")),
    responses(
        (status = OK, description = "A letter was revealed", body = HangmanHintResponse),
        (status = NOT_FOUND, body = ErrorBody),
        (status = CONFLICT, body = ErrorBody),
    ),
    tag = GAMES_TAG,
)]
pub async fn hangman_hint(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<HangmanHintResponse>> {
    let slice = state.try_get_slice::<Games>()?;
    let id = verify_session_id(&id)?;
    let response = slice.hangman.with_game(id, |game| {
        let letter = game.hint(&mut rand::rng(), Utc::now())?;
        Ok(HangmanHintResponse { letter: letter.to_string(), game: game.view() })
    })?;
    Ok(Json(response))
}

// --- Word Guesser ---

#[api_handler(
    post,
    path = "/games/word-guesser",
    request_body = NewWordGameRequest,
    responses(
        (status = CREATED, description = "Game started", body = WordGuesserView),
        (status = BAD_REQUEST, body = ErrorBody),
    ),
    tag = GAMES_TAG,
)]
pub async fn new_word_guesser(
    State(state): State<ApiState>,
    Json(request): Json<NewWordGameRequest>,
) -> ApiResult<(StatusCode, Json<WordGuesserView>)> {
    let slice = state.try_get_slice::<Games>()?;
    let word = request.source().pick_word(&mut rand::rng());
    let max_attempts = request.max_attempts.unwrap_or(slice.word_guesser_max_attempts);
    let game = WordGuesser::new(safe_nanoid!(), &word, max_attempts)?;
    Ok((StatusCode::CREATED, Json(slice.word_guesser.insert(game, WordGuesser::view))))
}

#[api_handler(
    get,
    path = "/games/word-guesser/{id}",
    params(("id" = String, Path, description = "Game id")),
    responses(
        (status = OK, description = "Game state", body = WordGuesserView),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    tag = GAMES_TAG,
)]
pub async fn get_word_guesser(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<WordGuesserView>> {
    let slice = state.try_get_slice::<Games>()?;
    let id = verify_session_id(&id)?;
    Ok(Json(slice.word_guesser.with_game(id, |game| Ok(game.view()))?))
}

#[api_handler(
    post,
    path = "/games/word-guesser/{id}/guess",
    params(("id" = String, Path, description = "Game id")),
    request_body = WordGuessRequest,
    responses(
        (status = OK, description = "Guess marked; the last row holds its result", body = WordGuesserView),
        (status = BAD_REQUEST, body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
        (status = CONFLICT, body = ErrorBody),
    ),
    tag = GAMES_TAG,
)]
pub async fn guess_word(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<WordGuessRequest>,
) -> ApiResult<Json<WordGuesserView>> {
    let slice = state.try_get_slice::<Games>()?;
    let id = verify_session_id(&id)?;
    let view = slice.word_guesser.with_game(id, |game| {
        game.guess(&request.word)?;
        Ok(game.view())
    })?;
    Ok(Json(view))
}

#[api_handler(
    post,
    path = "/games/word-guesser/{id}/hint",
    params(("id" = String, Path, description = "Game id")),
    responses(
        (status = OK, description = "A position was revealed", body = WordHintResponse),
        (status = NOT_FOUND, body = ErrorBody),
        (status = CONFLICT, body = ErrorBody),
    ),
    tag = GAMES_TAG,
)]
pub async fn word_guesser_hint(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<WordHintResponse>> {
    let slice = state.try_get_slice::<Games>()?;
    let id = verify_session_id(&id)?;
    let response = slice.word_guesser.with_game(id, |game| {
        let hint = game.hint(&mut rand::rng())?;
        Ok(WordHintResponse { hint, game: game.view() })
    })?;
    Ok(Json(response))
}

// --- Detective Listening ---

#[api_handler(
    post,
    path = "/games/detective",
    request_body = NewCaseRequest,
    responses(
        (status = CREATED, description = "Case opened", body = DetectiveView),
        (status = BAD_REQUEST, body = ErrorBody),
    ),
    tag = GAMES_TAG,
)]
pub async fn new_case(
    State(state): State<ApiState>,
    Json(request): Json<NewCaseRequest>,
) -> ApiResult<(StatusCode, Json<DetectiveView>)> {
    let slice = state.try_get_slice::<Games>()?;
    let case = DetectiveCase::new(
        safe_nanoid!(),
        request.case_type,
        request.language,
        &request.vocabulary,
        request.count.unwrap_or(DEFAULT_EVIDENCE),
        &mut rand::rng(),
    )?;
    Ok((StatusCode::CREATED, Json(slice.detective.insert(case, DetectiveCase::view))))
}

#[api_handler(
    post,
    path = "/games/detective/{id}/answer",
    params(("id" = String, Path, description = "Case id")),
    request_body = EvidenceAnswerRequest,
    responses(
        (status = OK, description = "Answer recorded", body = EvidenceAnswerResponse),
        (status = BAD_REQUEST, body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
        (status = CONFLICT, body = ErrorBody),
    ),
    tag = GAMES_TAG,
)]
pub async fn answer_evidence(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<EvidenceAnswerRequest>,
) -> ApiResult<Json<EvidenceAnswerResponse>> {
    let slice = state.try_get_slice::<Games>()?;
    let id = verify_session_id(&id)?;
    let response = slice.detective.with_game(id, |case| {
        let outcome = case.answer(request.evidence, &request.answer)?;
        Ok(EvidenceAnswerResponse { outcome, game: case.view() })
    })?;
    Ok(Json(response))
}

/// Games routes.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(new_hangman))
        .routes(routes!(get_hangman))
        .routes(routes!(guess_letter))
        .routes(routes!(hangman_hint))
        .routes(routes!(new_word_guesser))
        .routes(routes!(get_word_guesser))
        .routes(routes!(guess_word))
        .routes(routes!(word_guesser_hint))
        .routes(routes!(new_case))
        .routes(routes!(answer_evidence))
}
