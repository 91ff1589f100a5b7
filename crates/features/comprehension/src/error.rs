use std::borrow::Cow;

/// A specialized [`ComprehensionError`] enum of this crate.
#[gems_derive::gems_error]
pub enum ComprehensionError {
    #[error("Comprehension config error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Invalid task{}: {message}", format_context(.context))]
    InvalidTask { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Question not found{}: {message}", format_context(.context))]
    QuestionNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The session was already submitted.
    #[error("Session closed{}: {message}", format_context(.context))]
    SessionClosed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Time ran out; the session has been submitted automatically.
    #[error("Session expired{}: {message}", format_context(.context))]
    SessionExpired { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal comprehension error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
