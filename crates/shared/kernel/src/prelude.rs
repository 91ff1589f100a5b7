//! Common imports for slice crates.

pub use crate::domain::config::ApiConfig;
pub use crate::domain::language::{Difficulty, Language, Skill, Tier};
pub use crate::domain::registry::{FeatureSlice, InitializedSlice};
pub use crate::safe_nanoid;
#[cfg(feature = "server")]
pub use crate::server::{ApiError, ApiResult, ApiState};
