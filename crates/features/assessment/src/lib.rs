//! GCSE-style assessment papers: question scoring, results and timed attempts.
//!
//! Reading and listening questions are auto-marked against the answer keys stored in their
//! `data`; writing and free-text questions are left for a teacher. See [`question`] for the
//! per-type rules.

pub mod answer;
#[cfg(feature = "server")]
pub mod api;
pub mod attempt;
mod error;
pub mod events;
pub mod paper;
pub mod question;
pub mod result;
pub mod store;

pub use crate::error::{AssessmentError, AssessmentErrorExt};

use crate::store::AttemptStore;
use gems_domain::config::ApiConfig;
use gems_event_bus::EventBus;
use gems_kernel::domain::registry::InitializedSlice;

/// Assessment feature state
#[gems_derive::gems_slice]
pub struct Assessments {
    pub attempts: AttemptStore,
}

/// Initialize the assessment feature.
///
/// # Errors
/// Returns [`AssessmentError::Config`] when the configured limits are unusable.
pub fn init(config: &ApiConfig, events: &EventBus) -> Result<InitializedSlice, AssessmentError> {
    let settings = &config.assessment;
    if settings.default_time_limit_minutes == 0 || settings.max_attempts == 0 {
        return Err(AssessmentError::Config {
            message: "time limit and attempt capacity must be positive".into(),
            context: Some("assessment".into()),
        });
    }

    let inner = AssessmentsInner { attempts: AttemptStore::new(settings, events.clone()) };
    tracing::info!(
        time_limit_minutes = settings.default_time_limit_minutes,
        max_attempts = settings.max_attempts,
        "Assessment slice initialized"
    );

    Ok(Assessments::new(inner).into())
}
