//! `OpenAPI` tags and fixed strings shared across slices.

pub const SYSTEM_TAG: &str = "System";
pub const ASSESSMENT_TAG: &str = "Assessments";
pub const COMPREHENSION_TAG: &str = "Comprehension";
pub const GAMES_TAG: &str = "Games";
pub const VOCABULARY_TAG: &str = "Vocabulary";

/// Marker text identifying moderation-only questions that students never see.
pub const STANDARDIZATION_MARKER: &str = "Standardization question";
