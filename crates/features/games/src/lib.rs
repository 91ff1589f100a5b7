//! Vocabulary games: Hangman, Word Guesser and Detective Listening.
//!
//! Engines are plain state machines that take the current time and a random source from the
//! caller; [`session::GameStore`] keeps live games between requests and announces finished
//! ones on the event bus.

#[cfg(feature = "server")]
pub mod api;
pub mod detective;
mod error;
pub mod events;
pub mod hangman;
pub mod session;
pub mod word_guesser;
pub mod words;

pub use crate::error::{GameError, GameErrorExt};

use crate::detective::DetectiveCase;
use crate::hangman::Hangman;
use crate::session::GameStore;
use crate::word_guesser::WordGuesser;
use gems_domain::config::ApiConfig;
use gems_event_bus::EventBus;
use gems_kernel::domain::registry::InitializedSlice;

/// Games feature state
#[gems_derive::gems_slice]
pub struct Games {
    pub hangman: GameStore<Hangman>,
    pub word_guesser: GameStore<WordGuesser>,
    pub detective: GameStore<DetectiveCase>,
    pub word_guesser_max_attempts: u8,
}

/// Initialize the games feature.
///
/// # Errors
/// Returns [`GameError::Config`] when session capacity or Word Guesser attempts are zero.
pub fn init(config: &ApiConfig, events: &EventBus) -> Result<InitializedSlice, GameError> {
    let settings = &config.games;
    if settings.max_sessions == 0 || settings.word_guesser_max_attempts == 0 {
        return Err(GameError::Config {
            message: "session capacity and word guesser attempts must be positive".into(),
            context: Some("games".into()),
        });
    }

    let inner = GamesInner {
        hangman: GameStore::new(settings, events.clone()),
        word_guesser: GameStore::new(settings, events.clone()),
        detective: GameStore::new(settings, events.clone()),
        word_guesser_max_attempts: settings.word_guesser_max_attempts,
    };
    tracing::info!(
        max_sessions = settings.max_sessions,
        idle_minutes = settings.session_idle_minutes,
        "Games slice initialized"
    );

    Ok(Games::new(inner).into())
}
