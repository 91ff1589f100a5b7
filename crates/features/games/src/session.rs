use crate::error::GameError;
use crate::events::GameFinished;
use gems_derive::api_model;
use gems_domain::config::GamesConfig;
use gems_event_bus::EventBus;
use moka::sync::Cache;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use strum_macros::Display;
use tracing::debug;

#[api_model]
#[derive(Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "camelCase")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

#[api_model(rename_all = "kebab-case")]
#[derive(Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum GameKind {
    Hangman,
    WordGuesser,
    Detective,
}

/// A game that can live in a [`GameStore`].
pub trait Game: std::fmt::Debug + Send + Sync + 'static {
    const KIND: GameKind;

    fn id(&self) -> &str;

    fn status(&self) -> GameStatus;

    /// Final score; 0 while playing or after a loss.
    fn score(&self) -> u32;
}

/// Live games of one kind, evicted after a period without access.
#[derive(Debug)]
pub struct GameStore<T: Game> {
    games: Cache<String, Arc<Mutex<T>>>,
    events: EventBus,
}

impl<T: Game> GameStore<T> {
    #[must_use]
    pub fn new(config: &GamesConfig, events: EventBus) -> Self {
        let games = Cache::builder()
            .max_capacity(config.max_sessions)
            .time_to_idle(Duration::from_secs(config.session_idle_minutes.saturating_mul(60)))
            .build();
        Self { games, events }
    }

    /// Stores a new game and returns `view` of it.
    pub fn insert<R>(&self, game: T, view: impl FnOnce(&T) -> R) -> R {
        let output = view(&game);
        debug!(kind = %T::KIND, game = game.id(), "Game started");
        self.games.insert(game.id().to_owned(), Arc::new(Mutex::new(game)));
        output
    }

    /// Runs `op` under the game's lock and publishes [`GameFinished`] when `op` ended the game.
    ///
    /// # Errors
    /// [`GameError::GameNotFound`] for unknown or evicted ids, otherwise whatever `op` returns.
    pub fn with_game<R>(&self, id: &str, op: impl FnOnce(&mut T) -> Result<R, GameError>) -> Result<R, GameError> {
        let entry = self.games.get(id).ok_or_else(|| GameError::GameNotFound {
            message: id.to_owned().into(),
            context: Some(T::KIND.to_string().into()),
        })?;

        let mut game = entry.lock();
        let was_playing = !game.status().is_over();
        let outcome = op(&mut game);
        if was_playing && game.status().is_over() {
            let event = GameFinished {
                game_id: game.id().to_owned(),
                kind: T::KIND,
                status: game.status(),
                score: game.score(),
            };
            let delivered = self.events.publish(event)?;
            debug!(kind = %T::KIND, game = game.id(), delivered, "GameFinished published");
        }
        outcome
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.games.run_pending_tasks();
        self.games.entry_count()
    }
}

/// Error for moves on a finished game.
pub(crate) fn game_over(id: &str, status: GameStatus) -> GameError {
    GameError::GameOver { message: format!("game already {status}").into(), context: Some(id.to_owned().into()) }
}
