use std::borrow::Cow;

/// Errors that can occur during event bus operations.
#[gems_derive::gems_error]
pub enum EventBusError {
    /// The stored channel does not carry the requested event type.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Broadcast capacity must be greater than zero.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
