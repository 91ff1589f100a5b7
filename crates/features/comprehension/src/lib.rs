//! Reading comprehension: passages with questions, checked by tolerant matching.
//!
//! Students' answers are accepted despite case, accents, punctuation, small typos and,
//! for multi-part answers, synonyms and plurals. See [`matching`].

#[cfg(feature = "server")]
pub mod api;
mod error;
pub mod grade;
pub mod matching;
pub mod normalize;
pub mod session;
pub mod task;

pub use crate::error::{ComprehensionError, ComprehensionErrorExt};

use gems_domain::config::{ApiConfig, ComprehensionConfig};
use gems_kernel::domain::registry::InitializedSlice;

/// Comprehension feature state
#[gems_derive::gems_slice]
pub struct Comprehension {
    pub config: ComprehensionConfig,
}

/// Initialize the comprehension feature.
///
/// # Errors
/// Returns [`ComprehensionError::Config`] when the passing score is above 100 or no time is allowed.
pub fn init(config: &ApiConfig) -> Result<InitializedSlice, ComprehensionError> {
    let settings = &config.comprehension;
    if settings.passing_score > 100 || settings.default_time_limit_minutes == 0 {
        return Err(ComprehensionError::Config {
            message: "passing score must be at most 100 and the time limit positive".into(),
            context: Some("comprehension".into()),
        });
    }

    tracing::info!(
        passing_score = settings.passing_score,
        time_limit_minutes = settings.default_time_limit_minutes,
        "Comprehension slice initialized"
    );
    Ok(Comprehension::new(ComprehensionInner { config: settings.clone() }).into())
}
