//! Axum plumbing shared by every slice: state registry, error mapping and system routes.

pub mod error;
mod health;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorBody};
pub use state::{ApiState, ApiStateBuilder, ApiStateError};
