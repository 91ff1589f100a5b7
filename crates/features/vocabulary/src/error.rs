use std::borrow::Cow;

/// A specialized [`VocabularyError`] enum of this crate.
#[gems_derive::gems_error]
pub enum VocabularyError {
    #[error("Invalid review{}: {message}", format_context(.context))]
    InvalidReview { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal vocabulary error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
