use gems_event_bus::EventBusError;
use std::borrow::Cow;

/// A specialized [`AssessmentError`] enum of this crate.
#[gems_derive::gems_error]
pub enum AssessmentError {
    #[error("Assessment config error{}: {message}", format_context(.context))]
    Config { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The paper cannot be sat (for example it has no student questions).
    #[error("Invalid paper{}: {message}", format_context(.context))]
    InvalidPaper { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Attempt not found{}: {message}", format_context(.context))]
    AttemptNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Question out of range{}: {message}", format_context(.context))]
    QuestionOutOfRange { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The attempt was already submitted.
    #[error("Attempt closed{}: {message}", format_context(.context))]
    AttemptClosed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Manual marks need a finished attempt.
    #[error("Attempt in progress{}: {message}", format_context(.context))]
    AttemptInProgress { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The time limit passed; the attempt has been submitted automatically.
    #[error("Attempt expired{}: {message}", format_context(.context))]
    AttemptExpired { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Assessment event error{}: {source}", format_context(.context))]
    Event { source: EventBusError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal assessment error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
