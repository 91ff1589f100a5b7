//! Vocabulary practice: spaced repetition scheduling for teacher-curated words.
//!
//! Review states are owned by the caller and passed in with every request.

#[cfg(feature = "server")]
pub mod api;
mod error;
pub mod srs;

pub use crate::error::{VocabularyError, VocabularyErrorExt};
