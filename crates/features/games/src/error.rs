use gems_event_bus::EventBusError;
use std::borrow::Cow;

/// A specialized [`GameError`] enum of this crate.
#[gems_derive::gems_error]
pub enum GameError {
    #[error("Games config error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// A game cannot be built from the given words or settings.
    #[error("Invalid game setup{}: {message}", format_context(.context))]
    InvalidSetup { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Game not found{}: {message}", format_context(.context))]
    GameNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The game was already won or lost.
    #[error("Game over{}: {message}", format_context(.context))]
    GameOver { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Invalid guess{}: {message}", format_context(.context))]
    InvalidGuess { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("No hints left{}: {message}", format_context(.context))]
    NoHintsLeft { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Games event error{}: {source}", format_context(.context))]
    Event { source: EventBusError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal games error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
