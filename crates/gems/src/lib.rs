//! Facade crate for the `LanguageGems` feature slices and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `gems` with the `server` feature.
//! - Call `gems::init` to build every feature slice, then `gems::server::router::api_router`
//!   for their routes.

pub use gems_domain as domain;
use gems_event_bus::EventBus;
pub use gems_kernel as kernel;
use gems_kernel::prelude::{ApiConfig, InitializedSlice};

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use gems_kernel::server::ApiState;
        pub use gems_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// System routes merged with the routes of every feature slice.
        #[must_use]
        pub fn api_router() -> OpenApiRouter<ApiState> {
            system_router()
                .merge(crate::features::assessment::api::router())
                .merge(crate::features::comprehension::api::router())
                .merge(crate::features::games::api::router())
                .merge(crate::features::vocabulary::api::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use gems_assessment as assessment;
    pub use gems_comprehension as comprehension;
    pub use gems_games as games;
    pub use gems_vocabulary as vocabulary;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "assessment",
        "comprehension",
        "games",
        "vocabulary",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize every feature slice that keeps state between requests.
///
/// Vocabulary reviews are stateless and have no slice.
///
/// # Errors
/// Returns an error if any feature rejects its configuration.
pub fn init(
    config: &ApiConfig,
    events: &EventBus,
) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let slices = vec![
        features::assessment::init(config, events)?,
        features::comprehension::init(config)?,
        features::games::init(config, events)?,
    ];
    Ok(slices)
}
